//! Disabled hit counting.
//!
//! [`NoopStore`] is what [`StoreBuilder`](crate::store::StoreBuilder)
//! produces when no backend is selected: recording is a no-op and every
//! report is empty. Useful for deployments that want the sequence API
//! without usage tracking.

use crate::key::CounterKey;
use crate::report::UsageReport;
use crate::store::{HitCounter, Result};

/// Hit counter that counts nothing.
///
/// # Examples
///
/// ```rust
/// use ritornello::key::{CounterKey, FieldValue};
/// use ritornello::store::noop::NoopStore;
/// use ritornello::store::HitCounter;
///
/// let store = NoopStore::new();
/// store.record(&CounterKey::from_values([FieldValue::from(3u32)]));
/// assert!(store.report().unwrap().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct NoopStore {
    _private: (),
}

impl NoopStore {
    /// Creates a disabled store and logs that counting is off.
    pub fn new() -> Self {
        log::info!("hit counting is disabled");
        Self { _private: () }
    }
}

impl HitCounter for NoopStore {
    fn record(&self, _key: &CounterKey) {}

    fn report(&self) -> Result<UsageReport> {
        Ok(UsageReport::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::FieldValue;

    #[test]
    fn test_record_is_dropped() {
        let store = NoopStore::new();
        store.record(&CounterKey::from_values([FieldValue::from(1u32)]));
        store.record(&CounterKey::from_values([FieldValue::from(1u32)]));

        let report = store.report().unwrap();
        assert!(report.rows.is_empty());
        assert!(report.maxima.is_empty());
    }
}
