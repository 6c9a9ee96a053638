//! Hit counter store: backends, construction, and the counting contract.
//!
//! A store records one hit per call for a canonical [`CounterKey`] and dumps
//! its state as a [`UsageReport`]. Exactly one backend is active per store,
//! chosen at construction time:
//!
//! | Backend | Module | Description |
//! |---------|--------|-------------|
//! | [`MemoryStore`] | [`memory`] | In-process map of atomic per-key cells |
//! | `PrometheusStore` | `prometheus` | Counter vector in an owned Prometheus registry (`prometheus` feature) |
//! | [`NoopStore`] | [`noop`] | Counting disabled; records nothing |
//!
//! Backends are never combined: [`StoreBuilder::build`] rejects a
//! configuration that selects more than one, at construction rather than at
//! first use.
//!
//! # Concurrency contract
//!
//! [`record`](HitCounter::record) and [`report`](HitCounter::report) are
//! synchronous and complete in bounded time without I/O, from any number of
//! concurrent callers. Increments to the same key are never lost, and a
//! report observes every increment that completed before it began - an
//! increment is visible in full or not at all, never partially.
//!
//! # Examples
//!
//! ```rust
//! use ritornello::key::CounterKey;
//! use ritornello::sequence::SequenceSpec;
//! use ritornello::store::StoreBuilder;
//!
//! let store = StoreBuilder::new().with_memory().build()?;
//!
//! let spec = SequenceSpec::new(3, 5, 10, "fizz", "buzz");
//! store.record(&CounterKey::from_spec(&spec));
//! store.record(&CounterKey::from_spec(&spec));
//!
//! let report = store.report()?;
//! assert_eq!(report.maxima[0].total, 2);
//! # Ok::<(), ritornello::store::StoreError>(())
//! ```

mod error;

pub use error::{Result, StoreError};

#[cfg(feature = "prometheus")]
pub use error::PrometheusError;

pub mod memory;
pub mod noop;

#[cfg(feature = "prometheus")]
pub mod prometheus;

pub use memory::MemoryStore;
pub use noop::NoopStore;

#[cfg(feature = "prometheus")]
pub use prometheus::PrometheusStore;

use std::fmt::Debug;

use crate::key::CounterKey;
use crate::report::UsageReport;

/// The counting capability shared by all backends.
///
/// A store is an explicitly owned handle: construct one at startup with
/// [`StoreBuilder`] and pass it (typically as `Arc<dyn HitCounter>` or a
/// shared reference) to whatever handles requests. There is no process-wide
/// instance.
pub trait HitCounter: Send + Sync + Debug {
    /// Records one hit for the given key.
    ///
    /// Creates the entry with total 1 if the key was never seen, otherwise
    /// increments its total by 1. Infallible and non-blocking; safe for
    /// unbounded concurrent callers.
    fn record(&self, key: &CounterKey);

    /// Dumps every stored row plus the subset at the maximum total.
    ///
    /// An empty store yields an empty report, not an error.
    ///
    /// # Errors
    ///
    /// Only an external collection backend can fail (e.g. exposition
    /// encoding); in that case the whole report is withheld - no partial
    /// results. The in-memory and noop backends never return an error.
    fn report(&self) -> Result<UsageReport>;
}

/// Construction-time backend selection.
///
/// The builder mirrors how the store is meant to be deployed: pick the
/// backend once, validate the choice eagerly, and thread the built handle
/// through the program. Selecting no backend yields the [`NoopStore`];
/// selecting more than one is a configuration error.
///
/// # Examples
///
/// ```rust
/// use ritornello::store::{StoreBuilder, StoreError};
///
/// let store = StoreBuilder::new().with_memory().build()?;
/// assert!(store.report()?.is_empty());
/// # Ok::<(), StoreError>(())
/// ```
///
/// With the Prometheus backend:
///
/// ```rust,ignore
/// let store = StoreBuilder::new().with_prometheus().build()?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreBuilder {
    memory: bool,
    #[cfg(feature = "prometheus")]
    prometheus: bool,
}

impl StoreBuilder {
    /// Creates a builder with no backend selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the in-memory map backend.
    pub fn with_memory(mut self) -> Self {
        self.memory = true;
        self
    }

    /// Selects the Prometheus collector backend.
    #[cfg(feature = "prometheus")]
    pub fn with_prometheus(mut self) -> Self {
        self.prometheus = true;
        self
    }

    /// Builds the configured store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConflictingBackends`] when more than one backend
    /// is selected, and a backend error if the Prometheus collector cannot be
    /// set up.
    pub fn build(self) -> Result<Box<dyn HitCounter>> {
        #[cfg(feature = "prometheus")]
        if self.memory && self.prometheus {
            return Err(StoreError::ConflictingBackends);
        }

        if self.memory {
            log::debug!("hit counting backed by the in-memory store");
            return Ok(Box::new(MemoryStore::new()));
        }

        #[cfg(feature = "prometheus")]
        if self.prometheus {
            log::debug!("hit counting backed by the prometheus collector");
            return Ok(Box::new(PrometheusStore::new()?));
        }

        Ok(Box::new(NoopStore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_builds_noop() {
        let store = StoreBuilder::new().build().unwrap();
        let report = store.report().unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_memory_backend_selected() {
        let store = StoreBuilder::new().with_memory().build().unwrap();
        store.record(&CounterKey::from_values([crate::key::FieldValue::from(1u32)]));
        assert_eq!(store.report().unwrap().rows.len(), 1);
    }

    #[cfg(feature = "prometheus")]
    #[test]
    fn test_conflicting_backends_fail_at_build() {
        let err = StoreBuilder::new()
            .with_memory()
            .with_prometheus()
            .build()
            .unwrap_err();
        assert!(matches!(err, StoreError::ConflictingBackends));
    }

    #[test]
    fn test_builder_is_reusable() {
        let builder = StoreBuilder::new().with_memory();
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        // Two builds yield two independent stores.
        a.record(&CounterKey::from_values([crate::key::FieldValue::from(1u32)]));
        assert_eq!(a.report().unwrap().rows.len(), 1);
        assert!(b.report().unwrap().is_empty());
    }
}
