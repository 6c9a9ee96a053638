//! Renderers for a [`UsageReport`](crate::report::UsageReport).
//!
//! The store dumps plain data; these modules turn a report into something
//! displayable:
//!
//! - [`json`] - serialize the report to JSON with the `serde_json` crate
//! - [`table`] - render rows and maxima as text tables with the `tabled` crate
//!
//! # Unified Error Handling
//!
//! Both renderers use a single [`ObserverError`] type, so callers can switch
//! renderer without changing error handling.
//!
//! # Feature Flags
//!
//! Each renderer is gated behind a feature flag to keep dependencies
//! minimal:
//!
//! - `json` - enables the [`json`] module
//! - `table` - enables the [`table`] module
//! - `full` - enables all renderers (and the Prometheus backend)

mod error;

pub use error::{ObserverError, Result};

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "table")]
pub mod table;
