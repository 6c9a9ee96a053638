//! Text-table renderer for usage reports, built on the `tabled` crate.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! ritornello = { version = "0.3", features = ["table"] }
//! ```

use tabled::{settings::Style, Table, Tabled};

use crate::report::{HitRow, UsageReport};

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// No borders, just spacing
    Blank,
}

/// Internal row representation for tabled.
#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Request")]
    request: String,
    #[tabled(rename = "Total")]
    total: u64,
}

impl From<&HitRow> for ReportRow {
    fn from(row: &HitRow) -> Self {
        Self {
            request: row.request.clone(),
            total: row.total,
        }
    }
}

/// Renderer that formats a [`UsageReport`] as two text tables, one for all
/// rows and one for the maxima.
///
/// # Examples
///
/// ```rust,ignore
/// use ritornello::observers::table::{TableObserver, TableStyle};
/// use ritornello::report::{HitRow, UsageReport};
///
/// let report = UsageReport::from_rows(vec![
///     HitRow::new("int1=3&int2=5&limit=10&str1=fizz&str2=buzz", 2),
/// ]);
///
/// let output = TableObserver::new()
///     .with_style(TableStyle::Markdown)
///     .sorted(true)
///     .render(&report);
/// println!("{output}");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TableObserver {
    style: TableStyle,
    sorted: bool,
}

impl TableObserver {
    /// Creates a renderer with the default rounded style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Sorts rows and maxima by key before rendering.
    ///
    /// Dump order is unspecified, so sorting gives a stable display.
    pub fn sorted(mut self, enabled: bool) -> Self {
        self.sorted = enabled;
        self
    }

    fn styled(&self, rows: &[HitRow]) -> String {
        let mut table = Table::new(rows.iter().map(ReportRow::from));
        match self.style {
            TableStyle::Ascii => table.with(Style::ascii()),
            TableStyle::Rounded => table.with(Style::rounded()),
            TableStyle::Sharp => table.with(Style::sharp()),
            TableStyle::Modern => table.with(Style::modern()),
            TableStyle::Markdown => table.with(Style::markdown()),
            TableStyle::Blank => table.with(Style::blank()),
        };
        table.to_string()
    }

    /// Renders only the rows table.
    pub fn render_rows(&self, report: &UsageReport) -> String {
        if self.sorted {
            self.styled(&report.clone().sorted().rows)
        } else {
            self.styled(&report.rows)
        }
    }

    /// Renders only the maxima table.
    pub fn render_maxima(&self, report: &UsageReport) -> String {
        if self.sorted {
            self.styled(&report.clone().sorted().maxima)
        } else {
            self.styled(&report.maxima)
        }
    }

    /// Renders both tables, headed by their section names.
    pub fn render(&self, report: &UsageReport) -> String {
        format!(
            "Requests\n{}\n\nMost frequent\n{}",
            self.render_rows(report),
            self.render_maxima(report)
        )
    }
}
