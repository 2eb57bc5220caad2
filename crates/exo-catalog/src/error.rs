//! Dataset error types.

use std::path::PathBuf;

/// Errors that can occur while loading the exoplanet dataset.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the dataset file.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed or returned an error status.
    #[error("failed to fetch dataset from {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    /// The HTTP body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The body is not a JSON array of records.
    #[error("dataset is not a valid record array: {0}")]
    Parse(#[from] serde_json::Error),
}
