use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::codec::{self, FormatError};
use crate::job::JobRecordSet;

/// The record files kept in the output directory.
#[derive(Display, Debug, EnumIter, Clone, Copy, PartialEq, Eq)]
pub enum RecordFile {
    #[strum(to_string = "RiotJobsNew.txt")]
    New,

    #[strum(to_string = "RiotJobs.txt")]
    Current,

    #[strum(to_string = "AllJobsEver.txt")]
    AllEver,
}

impl RecordFile {
    pub const fn title(&self) -> &'static str {
        match self {
            Self::New => "Riot Games New Jobs",
            Self::Current => "Riot Games Current Jobs",
            Self::AllEver => "All Jobs Ever Seen",
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to create output directory {}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to read {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed record file {}", path.display())]
    Format { path: PathBuf, source: FormatError },
}

#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn path(&self, file: RecordFile) -> PathBuf {
        self.dir.join(file.to_string())
    }

    /// Reads a record file. A file that does not exist yet reads as empty.
    pub fn load(&self, file: RecordFile) -> Result<JobRecordSet, StorageError> {
        let path = self.path(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist yet, starting empty", path.display());
                return Ok(JobRecordSet::new());
            }
            Err(source) => return Err(StorageError::Read { path, source }),
        };
        codec::decode(&text).map_err(|source| StorageError::Format { path, source })
    }

    /// Replaces a record file whole. The text goes to a hidden sibling first
    /// and is renamed over the target.
    pub fn save(&self, file: RecordFile, jobs: &JobRecordSet) -> Result<(), StorageError> {
        let path = self.path(file);
        let temp_path = self.dir.join(format!(".{file}.tmp"));
        let text = codec::encode(file.title(), jobs);

        write_and_rename(&temp_path, &path, text.as_bytes()).map_err(|source| {
            let _ = fs::remove_file(&temp_path);
            StorageError::Write {
                path: path.clone(),
                source,
            }
        })?;
        debug!("wrote {} records to {}", jobs.len(), path.display());
        Ok(())
    }
}

fn write_and_rename(temp_path: &Path, path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut temp = fs::File::create(temp_path)?;
    temp.write_all(bytes)?;
    temp.sync_all()?;
    drop(temp);
    fs::rename(temp_path, path)
}
