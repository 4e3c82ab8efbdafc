mod cli;

use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use tracing::{error, info, Level};
use vod_ranking_scraper::{HttpFetcher, Pipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = cli.to_config();
    let pipeline = Pipeline::new(Arc::new(HttpFetcher::new()), config)?;

    match pipeline.run().await {
        Ok(report) => {
            match &report.export {
                Some(summary) => info!(
                    "Exported {} unique titles for {} to {}",
                    summary.rows,
                    report.year,
                    summary.path.display()
                ),
                None => info!(
                    "Reconciled {} unique titles for {}, no file written",
                    report.unique_titles, report.year
                ),
            }
            Ok(())
        }
        Err(e) => {
            error!("Scrape failed: {}", e);
            std::process::exit(1);
        }
    }
}
