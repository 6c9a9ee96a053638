//! Unified error type for report renderers.

use thiserror::Error;

/// Unified error type for all renderer operations.
#[derive(Debug, Error)]
pub enum ObserverError {
    /// Error from the JSON renderer.
    #[cfg(feature = "json")]
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic rendering error.
    #[error("render error: {0}")]
    Render(String),
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, ObserverError>;
