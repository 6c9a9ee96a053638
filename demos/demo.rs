//! Demo application showcasing the sequence generator and the hit counter
//! backends.
//!
//! Run with:
//! ```bash
//! cargo run --example demo --features demo -- --help
//! ```

use clap::{Parser, ValueEnum};
use ritornello::key::CounterKey;
use ritornello::observers::json::JsonObserver;
use ritornello::observers::table::{TableObserver, TableStyle};
use ritornello::sequence::SequenceSpec;
use ritornello::store::prometheus::PrometheusStore;
use ritornello::store::{HitCounter, StoreBuilder};
use std::error::Error;
use std::sync::Arc;
use std::thread;

/// Counter backend selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Backend {
    /// In-memory map of atomic cells
    #[default]
    Memory,
    /// Prometheus counter vector in an owned registry
    Prometheus,
    /// Counting disabled
    Disabled,
}

/// Output format for the usage report.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Text tables (rows + maxima)
    #[default]
    Table,
    /// JSON
    Json,
    /// Prometheus text exposition (requires the prometheus backend)
    Exposition,
}

/// Table style selection.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum StyleChoice {
    Ascii,
    #[default]
    Rounded,
    Sharp,
    Modern,
    Markdown,
    Blank,
}

impl From<StyleChoice> for TableStyle {
    fn from(choice: StyleChoice) -> Self {
        match choice {
            StyleChoice::Ascii => TableStyle::Ascii,
            StyleChoice::Rounded => TableStyle::Rounded,
            StyleChoice::Sharp => TableStyle::Sharp,
            StyleChoice::Modern => TableStyle::Modern,
            StyleChoice::Markdown => TableStyle::Markdown,
            StyleChoice::Blank => TableStyle::Blank,
        }
    }
}

/// Demo for ritornello - FizzBuzz sequences with concurrent hit counting.
///
/// Simulates a burst of concurrent sequence requests against the selected
/// backend, prints one generated sequence, and renders the usage report.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Counter backend
    #[arg(short, long, value_enum, default_value = "memory")]
    backend: Backend,

    /// Report output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Table style (for the table format)
    #[arg(short, long, value_enum, default_value = "rounded")]
    style: StyleChoice,

    /// Number of recording threads
    #[arg(long, default_value = "4")]
    threads: u32,

    /// Requests per thread
    #[arg(long, default_value = "100")]
    requests: u32,

    /// Pretty print JSON output
    #[arg(long)]
    pretty: bool,
}

fn traffic() -> Vec<SequenceSpec> {
    vec![
        SequenceSpec::new(3, 5, 10, "fizz", "buzz"),
        SequenceSpec::new(3, 5, 10, "fizz", "buzz"),
        SequenceSpec::new(3, 5, 100, "fizz", "buzz"),
        SequenceSpec::new(2, 7, 20, "pim", "pam"),
    ]
}

fn simulate(store: &Arc<dyn HitCounter>, threads: u32, requests: u32) {
    let mut handles = vec![];
    for _ in 0..threads {
        let store = Arc::clone(store);
        handles.push(thread::spawn(move || {
            let specs = traffic();
            for i in 0..requests {
                let spec = &specs[(i as usize) % specs.len()];
                let _body = spec.generate();
                store.record(&CounterKey::from_spec(spec));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("recording thread panicked");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Keep the concrete Prometheus store around: the exposition format is
    // not part of the HitCounter contract.
    let (store, prometheus): (Arc<dyn HitCounter>, Option<Arc<PrometheusStore>>) =
        match args.backend {
            Backend::Memory => (Arc::from(StoreBuilder::new().with_memory().build()?), None),
            Backend::Disabled => (Arc::from(StoreBuilder::new().build()?), None),
            Backend::Prometheus => {
                let store = Arc::new(PrometheusStore::new()?);
                (store.clone(), Some(store))
            }
        };

    simulate(&store, args.threads, args.requests);

    let spec = SequenceSpec::new(3, 5, 15, "fizz", "buzz");
    println!("{} -> {}\n", spec, spec.generate().join(" "));

    let report = store.report()?;
    match args.format {
        OutputFormat::Table => {
            let observer = TableObserver::new().with_style(args.style.into()).sorted(true);
            println!("{}", observer.render(&report));
        }
        OutputFormat::Json => {
            let observer = JsonObserver::new().pretty(args.pretty);
            println!("{}", observer.render(&report)?);
        }
        OutputFormat::Exposition => match prometheus {
            Some(store) => println!("{}", store.exposition()?),
            None => return Err("the exposition format requires --backend prometheus".into()),
        },
    }

    Ok(())
}
