use log::{debug, info};
use once_cell::sync::Lazy;
use reqwest::Url;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::config::Config;
use crate::job::{JobRecord, JobRecordSet};

static JOB_LIST: Lazy<Selector> = Lazy::new(|| selector("ul.job-list__body"));
static JOB_ROW: Lazy<Selector> = Lazy::new(|| selector("li.job-row"));
static PRIMARY_COL: Lazy<Selector> = Lazy::new(|| selector("div.job-row__col--primary"));
static SECONDARY_COL: Lazy<Selector> = Lazy::new(|| selector("div.job-row__col--secondary"));

/// Department, project and location, in that order.
const SECONDARY_COLUMNS: usize = 3;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("job listing selectors are valid CSS")
}

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to fetch careers page")]
    Fetch(#[from] reqwest::Error),
    #[error("careers page has no job list (`ul.job-list__body`)")]
    MissingJobList,
    #[error("job row {row} has no title column")]
    MissingTitle { row: usize },
    #[error("job row {row} has {found} of 3 detail columns")]
    MissingColumns { row: usize, found: usize },
}

pub fn build_client(config: &Config) -> reqwest::Result<Client> {
    Client::builder().user_agent(&config.user_agent).build()
}

/// Fetches the careers page. Non-2xx responses are errors.
pub fn fetch_page(client: &Client, url: &Url) -> Result<String, ScrapeError> {
    debug!("fetching {url}");
    let html = client.get(url.clone()).send()?.error_for_status()?.text()?;
    Ok(html)
}

pub fn extract_jobs(html: &str) -> Result<JobRecordSet, ScrapeError> {
    let document = Html::parse_document(html);
    // Postings may be split across several lists, e.g. one per department.
    let lists: Vec<ElementRef> = document.select(&JOB_LIST).collect();
    if lists.is_empty() {
        return Err(ScrapeError::MissingJobList);
    }

    let mut jobs = JobRecordSet::new();
    let rows = lists.iter().flat_map(|list| list.select(&JOB_ROW));
    for (row, element) in rows.enumerate() {
        jobs.insert(extract_row(&element, row)?);
    }
    Ok(jobs)
}

fn extract_row(element: &ElementRef, row: usize) -> Result<JobRecord, ScrapeError> {
    let title = element
        .select(&PRIMARY_COL)
        .next()
        .map(text_of)
        .ok_or(ScrapeError::MissingTitle { row })?;

    let columns: Vec<String> = element.select(&SECONDARY_COL).map(text_of).collect();
    if columns.len() < SECONDARY_COLUMNS {
        return Err(ScrapeError::MissingColumns {
            row,
            found: columns.len(),
        });
    }

    Ok(JobRecord::new(title, &columns[0], &columns[1], &columns[2]))
}

fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

pub fn scrape(client: &Client, url: &Url) -> Result<JobRecordSet, ScrapeError> {
    let html = fetch_page(client, url)?;
    let jobs = extract_jobs(&html)?;
    info!("found {} job postings on {url}", jobs.len());
    Ok(jobs)
}
