// src/utils/error.rs
use thiserror::Error;

// Errors raised while obtaining the raw page
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),

    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Could not read local page {path}: {source}")]
    LocalFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Caller-contract violations of the extractor.
///
/// Malformed rows, unparseable cells and empty documents are not errors;
/// they shrink the output instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Invalid {role} selector '{selector}': {reason}")]
    InvalidSelector {
        role: &'static str,
        selector: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Fetching the page failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
