use color_eyre::{Result, eyre::WrapErr};
use log::info;
use reqwest::blocking::Client;

use crate::config::Config;
use crate::diff::JobDiff;
use crate::job::JobRecordSet;
use crate::notify;
use crate::scraper;
use crate::storage::{RecordFile, Store, StorageError};

/// What the record files held before this run.
#[derive(Debug)]
pub struct History {
    pub previous: JobRecordSet,
    pub ever_seen: JobRecordSet,
}

impl History {
    pub fn load(store: &Store) -> Result<Self, StorageError> {
        Ok(Self {
            previous: store.load(RecordFile::Current)?,
            ever_seen: store.load(RecordFile::AllEver)?,
        })
    }

    /// Diffs the live listing against history and rewrites all three record
    /// files, even when nothing changed.
    pub fn record(&self, store: &Store, live: &JobRecordSet) -> Result<JobDiff, StorageError> {
        let diff = JobDiff::compute(&self.previous, &self.ever_seen, live);
        store.save(RecordFile::AllEver, &diff.ever_seen)?;
        store.save(RecordFile::Current, live)?;
        store.save(RecordFile::New, &diff.new_jobs)?;
        Ok(diff)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub listed: usize,
    pub new: usize,
    pub closed: usize,
    pub ever_seen: usize,
}

pub fn run(config: &Config) -> Result<RunSummary> {
    let client = scraper::build_client(config).wrap_err("failed to build http client")?;
    run_with_client(config, &client)
}

pub fn run_with_client(config: &Config, client: &Client) -> Result<RunSummary> {
    let store = Store::open(&config.output_dir)?;
    let history = History::load(&store)?;

    let live = scraper::scrape(client, &config.careers_url)?;

    let diff = history.record(&store, &live)?;
    for job in &diff.new_jobs {
        info!("new posting: {job}");
    }
    for job in &diff.closed_jobs {
        info!("no longer listed: {job}");
    }

    if let Some(webhook_url) = &config.webhook_url
        && !diff.is_empty()
    {
        notify::send_webhook_notifications(client, webhook_url, &config.careers_url, &diff)
            .wrap_err("failed to send webhook notifications")?;
    }

    Ok(RunSummary {
        listed: live.len(),
        new: diff.new_jobs.len(),
        closed: diff.closed_jobs.len(),
        ever_seen: diff.ever_seen.len(),
    })
}
