//! Error types for bench-trends

use thiserror::Error;

/// Result type alias for bench-trends operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bench-trends
#[derive(Error, Debug)]
pub enum Error {
    #[error("Core error: {0}")]
    CoreError(#[from] bench_trends_core::Error),

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CI API error: {0}")]
    CiError(String),

    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),
}
