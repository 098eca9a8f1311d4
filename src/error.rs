// Error types for octofeed.
// Covers GitHub API failures, cache file problems, and timestamp parsing.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OctofeedError {
    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("API rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Http { status: StatusCode, body: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timestamp '{input}' does not match YYYY-MM-DDTHH:MM:SSZ")]
    Timestamp { input: String },
}

pub type Result<T> = std::result::Result<T, OctofeedError>;
