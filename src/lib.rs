//! # Ritornello - FizzBuzz Sequences with Concurrent Hit Counting
//!
//! A Rust library for generating generalized FizzBuzz sequences and counting
//! how often each distinct parameter combination is requested, safely from
//! any number of concurrent callers.
//!
//! ## The Problem
//!
//! A sequence endpoint is trivially stateless: the same five parameters
//! always produce the same list of strings. The interesting state lives next
//! to it - a usage counter that must aggregate hits *per distinct parameter
//! combination*, survive heavy write concurrency without losing updates, and
//! dump a consistent snapshot of all totals plus the most-requested
//! combinations on demand.
//!
//! Done naively, that counter becomes either a global mutable map (racy,
//! untestable) or a process-wide metrics registry (an implicit singleton
//! that leaks across instances). This library makes it an explicitly owned
//! store with a small, backend-agnostic contract.
//!
//! ## Components
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | [`SequenceSpec`](sequence::SequenceSpec) | [`sequence`] | Pure generation of substitution sequences |
//! | [`CounterKey`](key::CounterKey) | [`key`] | Deterministic canonical keys for parameter tuples |
//! | [`HitCounter`](store::HitCounter) | [`store`] | Counting contract with selectable backends |
//! | [`UsageReport`](report::UsageReport) | [`report`] | Dump format: all rows plus tie-aware maxima |
//! | Renderers | [`observers`] | JSON / table output for reports (feature-gated) |
//!
//! ## Design
//!
//! 1. **Canonical keys**: every request tuple is flattened to a
//!    deterministic `name=value&…` string over the fixed field order
//!    `int1, int2, limit, str1, str2`. Aggregation is by string form, so two
//!    requests that print identically count as one combination regardless of
//!    the original value types.
//!
//! 2. **One backend, chosen up front**: the in-memory map, the Prometheus
//!    collector, or nothing at all. The choice is validated when the store
//!    is built - conflicting selections fail immediately, not at first use -
//!    and the built handle is threaded through the program explicitly.
//!
//! 3. **Reads share, writes to hot keys share too**: the in-memory backend
//!    guards the map with a reader/writer lock but keeps each total in an
//!    atomic, cache-line-padded cell. Incrementing an existing key only
//!    takes the shared lock, so concurrent hits on the same combination
//!    never serialize on the map itself.
//!
//! ## Quick Start
//!
//! ```rust
//! use ritornello::key::CounterKey;
//! use ritornello::sequence::SequenceSpec;
//! use ritornello::store::StoreBuilder;
//!
//! # fn main() -> Result<(), ritornello::store::StoreError> {
//! let store = StoreBuilder::new().with_memory().build()?;
//!
//! // Handle a request: generate the body, record the hit.
//! let spec = SequenceSpec::new(3, 5, 10, "fizz", "buzz");
//! let body = spec.generate();
//! store.record(&CounterKey::from_spec(&spec));
//!
//! assert_eq!(body[2], "fizz");
//!
//! // Later, render a usage report.
//! let report = store.report()?;
//! assert_eq!(report.maxima[0].total, 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Stores are `Send + Sync`; share one across threads with
//! `Arc<dyn HitCounter>`. Increments to the same key are never lost, and a
//! report observes every increment that completed before it began - an
//! increment lands in a report entirely or not at all.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `prometheus` | Prometheus collector backend + text exposition |
//! | `serde` | `Serialize`/`Deserialize` for the report types |
//! | `json` | JSON renderer (implies `serde`) |
//! | `table` | Text-table renderer via `tabled` |
//! | `full` | All of the above |
//! | `demo` | `full` plus the clap-driven demo example |
//!
//! ### Example: Prometheus Backend
//!
//! ```toml
//! [dependencies]
//! ritornello = { version = "0.3", features = ["prometheus"] }
//! ```
//!
//! ```rust,ignore
//! use ritornello::store::StoreBuilder;
//!
//! let store = StoreBuilder::new().with_prometheus().build()?;
//! ```
//!
//! ### Example: Table Output
//!
//! ```rust,ignore
//! use ritornello::observers::table::TableObserver;
//!
//! println!("{}", TableObserver::new().sorted(true).render(&store.report()?));
//! ```

pub mod key;
pub mod observers;
pub mod report;
pub mod sequence;
pub mod store;
