//! Error types for the persistent disk layer
//!
//! The accessor core is total and never produces an error. Failures only
//! come from the edges: decoding revision records, configuration, and
//! metrics registration.

use thiserror::Error;

/// Unified error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown compute API version: {0}")]
    UnknownApiVersion(String),

    #[error("Unknown input format: {0}")]
    UnknownFormat(String),

    // =========================================================================
    // Decode Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // Metrics Errors
    // =========================================================================
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if retrying the same operation could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;
