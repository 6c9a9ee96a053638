//! Prometheus-backed hit counter.
//!
//! [`PrometheusStore`] keeps the totals inside an [`IntCounterVec`] labeled
//! with the fixed field list, registered in a [`Registry`] owned by the
//! store instance - never in the process-wide default registry, so two
//! stores can coexist and tests stay hermetic.
//!
//! Reports are rebuilt from a registry gather: each collected metric's label
//! pairs are joined back into the canonical `name=value&…` key, producing
//! the same rows the in-memory backend would for the same recordings.
//!
//! # Feature Flag
//!
//! This module requires the `prometheus` feature:
//!
//! ```toml
//! [dependencies]
//! ritornello = { version = "0.3", features = ["prometheus"] }
//! ```
//!
//! # Exposition
//!
//! Beyond the [`HitCounter`] contract, the store can render its registry in
//! the Prometheus text exposition format via
//! [`exposition`](PrometheusStore::exposition), ready to be served on a
//! `/metrics` endpoint by the embedding application.

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

use crate::key::{CounterKey, FIELD_NAMES};
use crate::report::{HitRow, UsageReport};
use crate::store::{HitCounter, PrometheusError, Result};

/// Name of the counter family holding the per-request totals.
pub const METRIC_NAME: &str = "fizzbuzz_requests_total";

const METRIC_HELP: &str = "Total number of FizzBuzz requests";

/// Hit counter backed by a Prometheus counter vector in an owned registry.
///
/// # Examples
///
/// ```rust,ignore
/// use ritornello::key::CounterKey;
/// use ritornello::sequence::SequenceSpec;
/// use ritornello::store::prometheus::PrometheusStore;
/// use ritornello::store::HitCounter;
///
/// let store = PrometheusStore::new()?;
/// let key = CounterKey::from_spec(&SequenceSpec::new(3, 5, 10, "fizz", "buzz"));
///
/// store.record(&key);
/// let report = store.report()?;
/// assert_eq!(report.rows[0].request, key.as_str());
///
/// // Text exposition for a /metrics endpoint:
/// let text = store.exposition()?;
/// assert!(text.contains("fizzbuzz_requests_total"));
/// # Ok::<(), ritornello::store::StoreError>(())
/// ```
pub struct PrometheusStore {
    registry: Registry,
    hits: IntCounterVec,
}

impl std::fmt::Debug for PrometheusStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusStore")
            .field("metric", &METRIC_NAME)
            .finish_non_exhaustive()
    }
}

impl PrometheusStore {
    /// Creates a store with a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the counter vector cannot be created or
    /// registered.
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::new())
    }

    /// Creates a store registering its counter vector into an existing
    /// registry.
    ///
    /// Useful when the embedding application already exposes a registry and
    /// wants the request totals collected alongside its other metrics.
    ///
    /// # Errors
    ///
    /// Returns a backend error if the counter vector cannot be created, or
    /// if a collector with the same name is already registered.
    pub fn with_registry(registry: Registry) -> Result<Self> {
        let hits = IntCounterVec::new(Opts::new(METRIC_NAME, METRIC_HELP), &FIELD_NAMES)?;
        registry.register(Box::new(hits.clone()))?;
        Ok(Self { registry, hits })
    }

    /// Returns a reference to the underlying registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Renders the registry in the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns a backend error if encoding fails; no partial output is
    /// produced.
    pub fn exposition(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&families, &mut buffer)
            .map_err(|e| PrometheusError::Encode(e.to_string()))?;
        Ok(String::from_utf8(buffer).map_err(PrometheusError::from)?)
    }
}

impl HitCounter for PrometheusStore {
    fn record(&self, key: &CounterKey) {
        let values: Vec<&str> = key.values().collect();
        match self.hits.get_metric_with_label_values(&values) {
            Ok(counter) => counter.inc(),
            // A key whose arity does not match the fixed label list cannot
            // be represented in the counter vector; drop the sample rather
            // than panic.
            Err(err) => log::warn!("dropped hit sample for {:?}: {}", key.as_str(), err),
        }
    }

    fn report(&self) -> Result<UsageReport> {
        let mut rows = Vec::new();

        for family in self.registry.gather() {
            if family.get_name() != METRIC_NAME {
                continue;
            }
            for metric in family.get_metric() {
                // Gather returns label pairs sorted by name, which coincides
                // with the fixed field order int1, int2, limit, str1, str2.
                let request = metric
                    .get_label()
                    .iter()
                    .map(|pair| format!("{}={}", pair.get_name(), pair.get_value()))
                    .collect::<Vec<_>>()
                    .join("&");
                rows.push(HitRow::new(request, metric.get_counter().value() as u64));
            }
        }

        Ok(UsageReport::from_rows(rows))
    }
}
