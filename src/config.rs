use std::path::PathBuf;

use color_eyre::{Result, eyre::WrapErr};
use serde::Deserialize;
use url::Url;

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_careers_url")]
    pub careers_url: Url,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    pub webhook_url: Option<Url>,
    pub sentry_dsn: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment, after merging in
    /// a `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>().wrap_err("failed to load config")
    }
}

fn default_careers_url() -> Url {
    Url::parse("https://www.riotgames.com/en/work-with-us").expect("default careers url is valid")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("job-records")
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36".into()
}
