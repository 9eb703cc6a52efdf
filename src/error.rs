//! Error types shared across the crate

use thiserror::Error;

/// Result type for content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching or shaping content
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input shape or range, rejected before any I/O
    #[error("invalid input: {0}")]
    Validation(String),

    /// Timestamp that cannot be parsed as ISO-8601
    #[error("unparseable date: {0}")]
    InvalidDate(String),

    /// Network failure or non-2xx response from the content API
    #[error("content API request failed{}: {message}", status_suffix(.status))]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// Upstream payload did not match the expected shape
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API root exposed no master ref to query against
    #[error("content API exposes no master ref")]
    MissingRef,
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {}", code),
        None => String::new(),
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
