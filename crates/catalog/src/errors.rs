//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while fetching or caching item datasets.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The API answered with a non-success status.
    #[error("Catalog API error: {status} for {dataset}")]
    ApiError { dataset: String, status: u16 },

    /// A network error occurred while talking to the API.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Reading or writing a cache file failed.
    #[error("Cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    /// A cache file exists but does not parse.
    #[error("Cache file for {dataset} is corrupt: {message}")]
    CacheCorrupt { dataset: String, message: String },

    /// No usable data for a dataset: the fetch failed and no cache exists.
    #[error("No data available for dataset {0}")]
    NoData(String),
}

impl From<CatalogError> for craftimizer_core::Error {
    fn from(err: CatalogError) -> Self {
        craftimizer_core::Error::Catalog(err.to_string())
    }
}
