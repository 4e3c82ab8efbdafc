use clap::Parser;
use std::path::PathBuf;
use vod_ranking_scraper::types::{
    is_valid_year, ExportPolicy, ScrapeConfig, DEFAULT_BASE_URL, DEFAULT_OUTPUT_PATH,
    DEFAULT_PROVIDER_LIMIT, DEFAULT_TITLE_LIMIT,
};

#[derive(Parser, Debug)]
#[command(name = "vod-rank")]
#[command(about = "Scrape top VOD providers and export their best-rated titles to CSV")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output CSV file (overwritten on every run)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Ranking year (defaults to the current year)
    #[arg(short, long, value_parser = parse_year)]
    pub year: Option<String>,

    /// Number of providers taken from the ranking
    #[arg(long, default_value_t = DEFAULT_PROVIDER_LIMIT)]
    pub providers: usize,

    /// Number of titles taken per provider
    #[arg(long, default_value_t = DEFAULT_TITLE_LIMIT)]
    pub titles: usize,

    /// Site base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Fail the run when the CSV file cannot be written
    #[arg(long)]
    pub strict_export: bool,
}

impl Cli {
    pub fn to_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            provider_limit: self.providers,
            title_limit: self.titles,
            year: self.year.clone(),
            output_path: self.output.clone(),
            export_policy: if self.strict_export {
                ExportPolicy::Strict
            } else {
                ExportPolicy::BestEffort
            },
            ..Default::default()
        }
    }
}

fn parse_year(value: &str) -> Result<String, String> {
    if is_valid_year(value) {
        Ok(value.to_string())
    } else {
        Err(format!("expected a four digit year, got '{}'", value))
    }
}
