//! Usage report types: counted rows and their maxima.
//!
//! A [`UsageReport`] is the dump format shared by every store backend: all
//! recorded `(key, total)` rows in unspecified order, plus the subset of
//! rows whose total equals the current maximum (ties included). The types
//! are plain data, suitable for direct display or for serialization by the
//! caller.
//!
//! # Serde
//!
//! With the `serde` feature enabled the report types derive `Serialize` and
//! `Deserialize`:
//!
//! ```toml
//! [dependencies]
//! ritornello = { version = "0.3", features = ["serde"] }
//! ```

/// One counted row: a canonical request key and its running total.
///
/// # Examples
///
/// ```rust
/// use ritornello::report::HitRow;
///
/// let row = HitRow::new("int1=3&int2=5&limit=10&str1=fizz&str2=buzz", 7);
/// assert_eq!(row.total, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitRow {
    /// Canonical request key, `name=value&…`.
    pub request: String,
    /// Number of times this exact key has been recorded.
    pub total: u64,
}

impl HitRow {
    /// Creates a new row.
    pub fn new(request: impl Into<String>, total: u64) -> Self {
        Self {
            request: request.into(),
            total,
        }
    }
}

/// Point-in-time dump of a hit counter store.
///
/// `rows` holds every stored row in unspecified order; `maxima` holds the
/// rows whose total equals the highest total, including ties. An empty store
/// dumps as two empty lists, which is a valid terminal state rather than an
/// error.
///
/// # Examples
///
/// ```rust
/// use ritornello::report::{HitRow, UsageReport};
///
/// let report = UsageReport::from_rows(vec![
///     HitRow::new("int1=1&int2=1&limit=10&str1=a&str2=b", 1),
///     HitRow::new("int1=2&int2=2&limit=10&str1=a&str2=b", 3),
/// ]);
///
/// assert_eq!(report.rows.len(), 2);
/// assert_eq!(report.maxima.len(), 1);
/// assert_eq!(report.maxima[0].total, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsageReport {
    /// Every stored row, unspecified order.
    pub rows: Vec<HitRow>,
    /// The rows at the maximum total, ties included.
    pub maxima: Vec<HitRow>,
}

impl UsageReport {
    /// Creates an empty report.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a report from raw rows, computing the maxima in a single pass.
    ///
    /// A row strictly above the running maximum resets the maxima list; a row
    /// equal to it is appended. Row order is preserved as given.
    pub fn from_rows(rows: Vec<HitRow>) -> Self {
        let mut maxima: Vec<HitRow> = Vec::new();
        let mut max_total = 0u64;

        for row in &rows {
            if row.total > max_total {
                max_total = row.total;
                maxima.clear();
                maxima.push(row.clone());
            } else if row.total == max_total {
                maxima.push(row.clone());
            }
        }

        Self { rows, maxima }
    }

    /// Returns `true` if the report holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds a row by its canonical key.
    pub fn get(&self, request: &str) -> Option<&HitRow> {
        self.rows.iter().find(|row| row.request == request)
    }

    /// Returns the report with both lists sorted by key.
    ///
    /// Dump order is unspecified; sorting is left to downstream consumers
    /// that need a stable display, which this helper provides.
    pub fn sorted(mut self) -> Self {
        self.rows.sort_by(|a, b| a.request.cmp(&b.request));
        self.maxima.sort_by(|a, b| a.request.cmp(&b.request));
        self
    }
}
