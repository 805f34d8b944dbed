//! Error handling module
//!
//! Defines error types and handling logic used in the project

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP client error
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem error carrying the offending path
    #[error("File error at {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Claude API returned a non-success status
    #[error("Claude API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Completion response carried no text content block
    #[error("Completion response contained no text content")]
    EmptyResponse,

    /// Document assembly or packaging failed
    #[error("Document error: {0}")]
    Document(String),
}

impl AppError {
    /// Wrap an I/O error together with the path it occurred on
    pub fn file(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        AppError::File {
            path: path.to_string(),
            source,
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
