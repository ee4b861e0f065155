//! Error types for the winelog-core library.
//!
//! Parsing itself is total and never produces these; they cover the
//! configuration file, catalog snapshots and the import boundary.

use thiserror::Error;

/// Main error type for the winelog library.
#[derive(Error, Debug)]
pub enum WinelogError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unrecognised parse mode name.
    #[error("unknown parse mode: {0} (expected standard, receipt or label)")]
    UnknownMode(String),

    /// Catalog integrity error raised during an import.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Errors raised by a [`crate::import::CatalogStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A wine id that the store never issued.
    #[error("unknown wine id: {0}")]
    UnknownWine(u64),

    /// A vintage id that the store never issued.
    #[error("unknown vintage id: {0}")]
    UnknownVintage(u64),

    /// A purchase batch id that the store never issued.
    #[error("unknown purchase batch id: {0}")]
    UnknownBatch(u64),
}

/// Result type for the winelog library.
pub type Result<T> = std::result::Result<T, WinelogError>;
