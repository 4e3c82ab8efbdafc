use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP status error: {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

pub type Result<T> = std::result::Result<T, ScraperError>;
