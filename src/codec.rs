//! Plain-text record file format.
//!
//! ```text
//! Riot Games Current Jobs
//!
//! Title: Senior Gameplay Engineer
//! Department: Engineering
//! Project: League of Legends
//! Location: Los Angeles, USA
//!
//! Title: ...
//! ```
//!
//! The first line is a free-form title and is ignored when reading. Every
//! record is four field lines in fixed order followed by a blank line; the
//! blank line after the last record may be missing.

use strum::VariantArray;
use strum_macros::{Display, VariantArray};
use thiserror::Error;

use crate::job::{JobRecord, JobRecordSet};

const FIELDS_PER_RECORD: usize = Field::VARIANTS.len();
const LINES_PER_BLOCK: usize = FIELDS_PER_RECORD + 1;
const HEADER_LINES: usize = 2;

#[derive(Display, Debug, VariantArray, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Department,
    Project,
    Location,
}

impl Field {
    fn value(self, job: &JobRecord) -> &str {
        match self {
            Self::Title => &job.title,
            Self::Department => &job.department,
            Self::Project => &job.project,
            Self::Location => &job.location,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: expected a blank line after the file title")]
    HeaderSeparator { line: usize },
    #[error("line {line}: record has {found} of 4 field lines")]
    TruncatedRecord { line: usize, found: usize },
    #[error("line {line}: expected a blank line between records")]
    MissingSeparator { line: usize },
    #[error("line {line}: expected the {expected} field, found a {found} label")]
    MislabeledField {
        line: usize,
        expected: Field,
        found: Field,
    },
}

pub fn encode(title: &str, jobs: &JobRecordSet) -> String {
    let mut out = format!("{title}\n\n");
    for job in jobs {
        for field in Field::VARIANTS {
            out.push_str(&format!("{field}: {}\n", field.value(job)));
        }
        out.push('\n');
    }
    out
}

pub fn decode(text: &str) -> Result<JobRecordSet, FormatError> {
    let lines: Vec<&str> = text.lines().collect();

    if let Some(separator) = lines.get(1)
        && !separator.trim().is_empty()
    {
        return Err(FormatError::HeaderSeparator { line: 2 });
    }

    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |i| i + 1);
    let body = lines.get(HEADER_LINES..end).unwrap_or_default();

    let mut jobs = JobRecordSet::new();
    for (index, block) in body.chunks(LINES_PER_BLOCK).enumerate() {
        let first_line = HEADER_LINES + index * LINES_PER_BLOCK + 1;
        jobs.insert(decode_block(block, first_line)?);
    }
    Ok(jobs)
}

fn decode_block(block: &[&str], first_line: usize) -> Result<JobRecord, FormatError> {
    let found = block
        .iter()
        .take(FIELDS_PER_RECORD)
        .take_while(|line| !line.trim().is_empty())
        .count();
    if found < FIELDS_PER_RECORD {
        return Err(FormatError::TruncatedRecord {
            line: first_line,
            found,
        });
    }

    if let Some(separator) = block.get(FIELDS_PER_RECORD)
        && !separator.trim().is_empty()
    {
        return Err(FormatError::MissingSeparator {
            line: first_line + FIELDS_PER_RECORD,
        });
    }

    let mut values = [""; FIELDS_PER_RECORD];
    for (offset, (field, line)) in Field::VARIANTS.iter().zip(block).enumerate() {
        values[offset] = field_value(*field, line.trim(), first_line + offset)?;
    }

    let [title, department, project, location] = values.map(str::to_owned);
    Ok(JobRecord {
        title,
        department,
        project,
        location,
    })
}

/// Strips the `Label:` prefix when it matches `expected`. Lines without any
/// known label are taken as bare values.
fn field_value(expected: Field, line: &str, line_no: usize) -> Result<&str, FormatError> {
    for field in Field::VARIANTS {
        let label = format!("{field}:");
        if let Some(value) = line.strip_prefix(label.as_str()) {
            if *field != expected {
                return Err(FormatError::MislabeledField {
                    line: line_no,
                    expected,
                    found: *field,
                });
            }
            return Ok(value.trim());
        }
    }
    Ok(line)
}
