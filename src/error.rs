//! Error types for directory retrieval

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("response body is not a record array: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fetch task stopped before a response arrived")]
    Interrupted,
}
