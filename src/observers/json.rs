//! JSON renderer for usage reports.
//!
//! # Feature Flag
//!
//! This module requires the `json` feature (which implies `serde`):
//!
//! ```toml
//! [dependencies]
//! ritornello = { version = "0.3", features = ["json"] }
//! ```

use crate::observers::Result;
use crate::report::UsageReport;

/// Renderer that serializes a [`UsageReport`] to JSON.
///
/// # Examples
///
/// ```rust,ignore
/// use ritornello::observers::json::JsonObserver;
/// use ritornello::report::{HitRow, UsageReport};
///
/// let report = UsageReport::from_rows(vec![HitRow::new("int1=3&int2=5", 2)]);
///
/// let json = JsonObserver::new().render(&report)?;
/// assert!(json.contains(r#""total":2"#));
///
/// // Pretty-printed:
/// let pretty = JsonObserver::new().pretty(true).render(&report)?;
/// # Ok::<(), ritornello::observers::ObserverError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonObserver {
    pretty: bool,
}

impl JsonObserver {
    /// Creates a new JSON renderer with compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables pretty-printing.
    pub fn pretty(mut self, enabled: bool) -> Self {
        self.pretty = enabled;
        self
    }

    /// Serializes the report.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render(&self, report: &UsageReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}
