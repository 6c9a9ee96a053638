//! Unified error type for store construction and collection.
//!
//! Counting and generation are infallible by contract; every error a store
//! can produce is either a construction-time configuration error or a
//! failure of a named external backend.

use thiserror::Error;

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// More than one counter backend was selected at construction.
    #[error("cannot enable more than one counter backend at the same time")]
    ConflictingBackends,

    /// Error from the Prometheus backend.
    #[cfg(feature = "prometheus")]
    #[error("prometheus backend error: {0}")]
    Prometheus(#[from] PrometheusError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Error type specific to the Prometheus backend.
#[cfg(feature = "prometheus")]
#[derive(Debug, Error)]
pub enum PrometheusError {
    /// Error creating or registering a metric.
    #[error("metric error: {0}")]
    Metric(String),

    /// Error encoding metrics to the text exposition format.
    #[error("encode error: {0}")]
    Encode(String),

    /// Error converting encoded bytes to UTF-8.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[cfg(feature = "prometheus")]
impl From<prometheus::Error> for PrometheusError {
    fn from(err: prometheus::Error) -> Self {
        PrometheusError::Metric(err.to_string())
    }
}

#[cfg(feature = "prometheus")]
impl From<prometheus::Error> for StoreError {
    fn from(err: prometheus::Error) -> Self {
        StoreError::Prometheus(PrometheusError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_backends_message() {
        let msg = StoreError::ConflictingBackends.to_string();
        assert!(msg.contains("more than one counter backend"));
    }

    #[cfg(feature = "prometheus")]
    #[test]
    fn test_prometheus_error_wraps() {
        let err: StoreError = PrometheusError::Encode("boom".into()).into();
        assert!(err.to_string().contains("boom"));
    }
}
