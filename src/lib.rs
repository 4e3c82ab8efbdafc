//! # VOD Ranking Scraper
//!
//! Scrapes the VOD ranking of a movie site, collects the top titles of the
//! leading streaming providers, keeps the best-rated occurrence of every
//! title and exports the result as CSV.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use vod_ranking_scraper::{HttpFetcher, Pipeline, ScrapeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ScrapeConfig {
//!         year: Some("2023".to_string()),
//!         output_path: PathBuf::from("./movies.csv"),
//!         ..Default::default()
//!     };
//!
//!     let pipeline = Pipeline::new(Arc::new(HttpFetcher::new()), config)?;
//!     let report = pipeline.run().await?;
//!
//!     println!("Exported {} unique titles", report.unique_titles);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod services;
pub mod types;

// Re-export main types and services for easier usage
pub use error::{Result, ScraperError};
pub use services::{
    normalize_provider_name, CsvExporter, HttpFetcher, MarkupExtractor, PageFetcher, Pipeline,
    RankingResolver, Reconciler,
};
pub use types::{
    ExportPolicy, ExportSummary, PageLayout, ProviderLink, RawMovie, RunReport, ScoredMovie,
    ScrapeConfig,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
