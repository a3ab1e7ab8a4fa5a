//! Error taxonomy for fetching and extraction.
//!
//! Every variant is caught at the public boundary of [`crate::Site`] and
//! turned into an empty result or an explanatory string; internal code
//! propagates with `?`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Connection failure, timeout or body decoding error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// No usable structure was found in the page.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid header {name}: {reason}")]
    Header { name: String, reason: String },

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
