use crate::error::{Result, ScraperError};
use chrono::Datelike;
use serde::Serialize;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://www.filmweb.pl";
pub const DEFAULT_RANKING_PATH: &str = "/ranking/vod/film";
pub const DEFAULT_OUTPUT_PATH: &str = "./movies.csv";
pub const DEFAULT_PROVIDER_LIMIT: usize = 4;
pub const DEFAULT_TITLE_LIMIT: usize = 10;

/// A provider entry as read from the ranking overview. Both fields are
/// optional because the anchor or its attributes may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderLink {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMovie {
    pub title: String,
    /// Locale-formatted rating text, e.g. `8,5`.
    pub rating: String,
    pub provider_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMovie {
    pub title: String,
    pub rating: String,
    pub provider_name: String,
    pub rating_value: f64,
}

/// One exported CSV row. The header is written separately so that an
/// empty export still carries it.
#[derive(Debug, Serialize)]
pub struct CsvRow<'a> {
    pub title: &'a str,
    pub vod_name: &'a str,
    pub rating: &'a str,
}

impl<'a> From<&'a ScoredMovie> for CsvRow<'a> {
    fn from(movie: &'a ScoredMovie) -> Self {
        Self {
            title: &movie.title,
            vod_name: &movie.provider_name,
            rating: &movie.rating,
        }
    }
}

/// CSS selectors describing the two page shapes the scraper depends on.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub provider_container: String,
    pub provider_item: String,
    pub provider_anchor: String,
    pub ranking_container: String,
    pub ranking_entry: String,
    pub title_link: String,
    pub rating_value: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            provider_container: ".rankingProvider__list".to_string(),
            provider_item: "li".to_string(),
            provider_anchor: "a".to_string(),
            ranking_container: ".rankingTypeSection__container".to_string(),
            ranking_entry: ".rankingType.hasVod".to_string(),
            title_link: ".rankingType__title a".to_string(),
            rating_value: ".rankingType__rate--value".to_string(),
        }
    }
}

/// What to do when the CSV file cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportPolicy {
    /// Log the failure and report the run as successful.
    #[default]
    BestEffort,
    /// Abort the run with the write error.
    Strict,
}

#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: String,
    pub ranking_path: String,
    pub provider_limit: usize,
    pub title_limit: usize,
    /// Ranking year; the current calendar year when `None`.
    pub year: Option<String>,
    pub output_path: PathBuf,
    pub export_policy: ExportPolicy,
    pub layout: PageLayout,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ranking_path: DEFAULT_RANKING_PATH.to_string(),
            provider_limit: DEFAULT_PROVIDER_LIMIT,
            title_limit: DEFAULT_TITLE_LIMIT,
            year: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            export_policy: ExportPolicy::default(),
            layout: PageLayout::default(),
        }
    }
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url)?;

        if self.provider_limit == 0 {
            return Err(ScraperError::Config {
                reason: "Provider limit must be greater than 0".to_string(),
            });
        }

        if self.title_limit == 0 {
            return Err(ScraperError::Config {
                reason: "Title limit must be greater than 0".to_string(),
            });
        }

        if let Some(year) = &self.year {
            if !is_valid_year(year) {
                return Err(ScraperError::Config {
                    reason: format!("Year must be four digits, got '{}'", year),
                });
            }
        }

        Ok(())
    }

    pub fn ranking_url(&self) -> String {
        format!("{}{}", self.base(), self.ranking_path)
    }

    pub fn provider_year_url(&self, provider_url: &str, year: &str) -> String {
        format!("{}{}/{}", self.base(), provider_url, year)
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn resolved_year(&self) -> String {
        self.year.clone().unwrap_or_else(current_year)
    }
}

pub fn current_year() -> String {
    chrono::Local::now().year().to_string()
}

pub fn is_valid_year(year: &str) -> bool {
    year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub year: String,
    pub providers: usize,
    pub titles_fetched: usize,
    pub unique_titles: usize,
    /// `None` when a best-effort export failed.
    pub export: Option<ExportSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_fixed_run() {
        let config = ScrapeConfig::default();
        assert_eq!(config.ranking_url(), "https://www.filmweb.pl/ranking/vod/film");
        assert_eq!(config.provider_limit, 4);
        assert_eq!(config.title_limit, 10);
        assert_eq!(config.export_policy, ExportPolicy::BestEffort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_provider_year_url() {
        let config = ScrapeConfig::default();
        assert_eq!(
            config.provider_year_url("/ranking/vod/netflix/film", "2023"),
            "https://www.filmweb.pl/ranking/vod/netflix/film/2023"
        );
    }

    #[test]
    fn test_trailing_slash_on_base_url() {
        let config = ScrapeConfig {
            base_url: "https://example.test/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.ranking_url(), "https://example.test/ranking/vod/film");
        assert_eq!(
            config.provider_year_url("/ranking/vod/max/film", "2024"),
            "https://example.test/ranking/vod/max/film/2024"
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ScrapeConfig {
            year: Some("23".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScraperError::Config { .. })));

        let config = ScrapeConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ScraperError::InvalidUrl(_))));

        let config = ScrapeConfig {
            provider_limit: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolved_year_defaults_to_current() {
        let config = ScrapeConfig::default();
        let year = config.resolved_year();
        assert!(is_valid_year(&year));
        assert_eq!(year, current_year());

        let config = ScrapeConfig {
            year: Some("2021".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_year(), "2021");
    }
}
