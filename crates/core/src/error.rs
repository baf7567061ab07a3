//! Error types for bench-trends-core (WASM-compatible)

use thiserror::Error;

/// Result type alias for bench-trends-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that work in both native and WASM environments
#[derive(Error, Debug)]
pub enum Error {
    #[error("Benchmark history is empty")]
    EmptyHistory,

    #[error("Metric group '{group}' is missing from the most recent snapshot")]
    MissingGroup { group: String },

    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
