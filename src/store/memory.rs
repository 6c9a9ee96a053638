//! In-memory hit counter backend.
//!
//! [`MemoryStore`] keeps one atomic cell per canonical key inside a map
//! guarded by a reader/writer lock. The lock protects the *shape* of the map
//! (which keys exist); the totals themselves are atomics, so the common case
//! of incrementing an existing key only needs the shared read lock:
//!
//! ```text
//!                   ┌──────────────────────────────────────────┐
//!                   │        RwLock<HashMap<key, cell>>        │
//!                   ├──────────────────────────────────────────┤
//!   record (hit) ──►│ read lock ── fetch_add on the key's cell │
//!   record (new) ──►│ write lock ─ insert cell, then fetch_add │
//!   report       ──►│ read lock ── load every cell, one scan   │
//!                   └──────────────────────────────────────────┘
//! ```
//!
//! Each cell is wrapped in [`crossbeam_utils::CachePadded`] so that cells of
//! unrelated keys never share a cache line; hot keys hammered from many
//! threads then update without invalidating their neighbours. All cell
//! operations use `Ordering::Relaxed`: totals do not establish
//! happens-before relationships with other memory, they only need atomicity.
//!
//! A report holds the read lock for the duration of its scan, so it can
//! never observe a half-applied increment; increments racing with the scan
//! land either entirely inside or entirely outside the report.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use crossbeam_utils::CachePadded;

use crate::key::CounterKey;
use crate::report::{HitRow, UsageReport};
use crate::store::{HitCounter, Result};

/// Hit counter backed by an in-process map of atomic cells.
///
/// The store is created empty, grows only through [`record`], and keeps its
/// entries for its whole lifetime; totals are monotonically non-decreasing
/// and equal the number of recordings issued for that exact key.
///
/// [`record`]: MemoryStore::record
///
/// # Examples
///
/// ```rust
/// use ritornello::key::CounterKey;
/// use ritornello::sequence::SequenceSpec;
/// use ritornello::store::memory::MemoryStore;
/// use ritornello::store::HitCounter;
///
/// let store = MemoryStore::new();
/// let key = CounterKey::from_spec(&SequenceSpec::new(3, 5, 10, "fizz", "buzz"));
///
/// store.record(&key);
/// store.record(&key);
///
/// let report = store.report()?;
/// assert_eq!(report.rows[0].total, 2);
/// # Ok::<(), ritornello::store::StoreError>(())
/// ```
///
/// Shared across threads:
///
/// ```rust
/// use std::sync::Arc;
/// use std::thread;
/// use ritornello::key::{CounterKey, FieldValue};
/// use ritornello::store::memory::MemoryStore;
/// use ritornello::store::HitCounter;
///
/// let store = Arc::new(MemoryStore::new());
/// let mut handles = vec![];
///
/// for _ in 0..4 {
///     let store = Arc::clone(&store);
///     handles.push(thread::spawn(move || {
///         let key = CounterKey::from_values([FieldValue::from(7u32)]);
///         for _ in 0..100 {
///             store.record(&key);
///         }
///     }));
/// }
///
/// for h in handles {
///     h.join().unwrap();
/// }
///
/// assert_eq!(store.report().unwrap().rows[0].total, 400);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    cells: RwLock<HashMap<String, CachePadded<AtomicU64>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of distinct keys recorded so far.
    pub fn len(&self) -> usize {
        self.cells
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the total for one key, if it has been recorded.
    pub fn total(&self, key: &CounterKey) -> Option<u64> {
        self.cells
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key.as_str())
            .map(|cell| cell.load(Ordering::Relaxed))
    }
}

impl HitCounter for MemoryStore {
    fn record(&self, key: &CounterKey) {
        {
            let cells = self.cells.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cell) = cells.get(key.as_str()) {
                cell.fetch_add(1, Ordering::Relaxed);
                return;
            }
        }

        // First sighting of this key: take the write lock to insert the
        // cell. Another thread may have inserted it in the meantime, so go
        // through the entry API rather than a blind insert.
        let mut cells = self.cells.write().unwrap_or_else(PoisonError::into_inner);
        cells
            .entry(key.as_str().to_owned())
            .or_insert_with(|| CachePadded::new(AtomicU64::new(0)))
            .fetch_add(1, Ordering::Relaxed);
    }

    fn report(&self) -> Result<UsageReport> {
        let cells = self.cells.read().unwrap_or_else(PoisonError::into_inner);
        let rows = cells
            .iter()
            .map(|(key, cell)| HitRow::new(key.clone(), cell.load(Ordering::Relaxed)))
            .collect();
        Ok(UsageReport::from_rows(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::FieldValue;
    use crate::sequence::SequenceSpec;
    use std::sync::Arc;
    use std::thread;

    fn spec_key(d1: u32, d2: u32, limit: u32, s1: &str, s2: &str) -> CounterKey {
        CounterKey::from_spec(&SequenceSpec::new(d1, d2, limit, s1, s2))
    }

    #[test]
    fn test_empty_store_reports_empty() {
        let store = MemoryStore::new();
        let report = store.report().unwrap();
        assert!(report.rows.is_empty());
        assert!(report.maxima.is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_single_record() {
        let store = MemoryStore::new();
        let key = spec_key(3, 5, 10, "fizz", "buzz");
        store.record(&key);

        let report = store.report().unwrap();
        assert_eq!(report.rows, vec![HitRow::new(key.as_str(), 1)]);
        assert_eq!(report.maxima, report.rows);
    }

    #[test]
    fn test_totals_count_exact_recordings() {
        let store = MemoryStore::new();
        let key = spec_key(3, 5, 10, "fizz", "buzz");
        for _ in 0..7 {
            store.record(&key);
        }
        assert_eq!(store.total(&key), Some(7));
    }

    #[test]
    fn test_distinct_keys_do_not_interfere() {
        let store = MemoryStore::new();
        let a = spec_key(1, 1, 10, "a", "b");
        let b = spec_key(2, 2, 10, "a", "b");

        store.record(&a);
        store.record(&b);
        store.record(&b);
        store.record(&b);

        assert_eq!(store.total(&a), Some(1));
        assert_eq!(store.total(&b), Some(3));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_maxima_tracks_single_winner() {
        let store = MemoryStore::new();
        let a = spec_key(1, 1, 10, "a", "b");
        let b = spec_key(2, 2, 10, "a", "b");

        store.record(&a);
        for _ in 0..3 {
            store.record(&b);
        }

        let report = store.report().unwrap();
        assert_eq!(report.maxima, vec![HitRow::new(b.as_str(), 3)]);
    }

    #[test]
    fn test_maxima_includes_ties() {
        let store = MemoryStore::new();
        let a = spec_key(3, 5, 10, "fizz", "buzz");
        let b = spec_key(3, 5, 20, "fizz", "buzz");
        let c = spec_key(3, 5, 30, "fizz", "buzz");

        store.record(&a);
        store.record(&a);
        store.record(&b);
        store.record(&b);
        store.record(&c);

        let report = store.report().unwrap().sorted();
        assert_eq!(
            report.maxima,
            vec![HitRow::new(a.as_str(), 2), HitRow::new(b.as_str(), 2)]
        );
    }

    #[test]
    fn test_report_idempotent_without_records() {
        let store = MemoryStore::new();
        store.record(&spec_key(3, 5, 10, "fizz", "buzz"));
        store.record(&spec_key(7, 9, 10, "x", "y"));

        let first = store.report().unwrap().sorted();
        let second = store.report().unwrap().sorted();
        assert_eq!(first, second);
    }

    #[test]
    fn test_type_collisions_aggregate() {
        let store = MemoryStore::new();
        store.record(&CounterKey::from_values([FieldValue::Unsigned(5)]));
        store.record(&CounterKey::from_values([FieldValue::Text("5".into())]));

        let report = store.report().unwrap();
        assert_eq!(report.rows, vec![HitRow::new("int1=5", 2)]);
    }

    #[test]
    fn test_concurrent_records_small() {
        concurrent_records(10, 2);
    }

    #[test]
    fn test_concurrent_records_large() {
        concurrent_records(1000, 8);
    }

    fn concurrent_records(total: u64, threads: u64) {
        let store = Arc::new(MemoryStore::new());
        let per_thread = total / threads;
        assert_eq!(per_thread * threads, total);

        let mut handles = vec![];
        for _ in 0..threads {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let key = spec_key(3, 5, 10, "fizz", "buzz");
                for _ in 0..per_thread {
                    store.record(&key);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let key = spec_key(3, 5, 10, "fizz", "buzz");
        assert_eq!(store.total(&key), Some(total));
    }

    #[test]
    fn test_concurrent_records_mixed_keys() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = vec![];

        for t in 0..4u32 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for i in 0..250u32 {
                    let key = spec_key(t + 1, 5, 10, "fizz", "buzz");
                    store.record(&key);
                    // Every thread also hammers one shared key.
                    if i % 2 == 0 {
                        store.record(&spec_key(9, 9, 9, "s", "s"));
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let report = store.report().unwrap();
        assert_eq!(report.rows.len(), 5);
        assert_eq!(store.total(&spec_key(9, 9, 9, "s", "s")), Some(500));
        assert_eq!(report.maxima, vec![HitRow::new(spec_key(9, 9, 9, "s", "s").as_str(), 500)]);
    }

    #[test]
    fn test_reports_concurrent_with_records() {
        let store = Arc::new(MemoryStore::new());
        let key = spec_key(3, 5, 10, "fizz", "buzz");
        store.record(&key);

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let key = spec_key(3, 5, 10, "fizz", "buzz");
                for _ in 0..1000 {
                    store.record(&key);
                }
            })
        };

        // Totals observed while the writer runs never decrease.
        let mut last = 0;
        for _ in 0..50 {
            let report = store.report().unwrap();
            let total = report.rows[0].total;
            assert!(total >= last);
            last = total;
        }

        writer.join().unwrap();
        assert_eq!(store.total(&key), Some(1001));
    }
}
