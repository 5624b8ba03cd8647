use color_eyre::Result;
use log::{error, info};

mod codec;
mod config;
mod diff;
mod job;
mod notify;
mod scraper;
mod storage;
#[cfg(test)]
mod testing;
mod tracker;

use config::Config;

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    match tracker::run(&config) {
        Ok(summary) => {
            info!(
                "{} postings listed, {} new, {} no longer listed, {} seen overall (records in {})",
                summary.listed,
                summary.new,
                summary.closed,
                summary.ever_seen,
                config.output_dir.display()
            );
            Ok(())
        }
        Err(err) => {
            error!("run failed: {err:#}");
            sentry::capture_message(&format!("{err:?}"), sentry::Level::Error);
            Err(err)
        }
    }
}
