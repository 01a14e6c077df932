//! Catalog error types

/// Catalog error types
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    // Store errors
    #[error("category not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    // Data errors
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Wire errors
    #[error("transport error: {0}")]
    Transport(String),

    #[error("stream error: {0}")]
    Stream(String),
}

impl CatalogError {
    /// Whether this error means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
