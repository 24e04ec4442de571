//! ptrsweep - bulk reverse DNS sweeps over a CIDR range.
//!
//! This is the command-line interface for the ptrsweep library.

use anyhow::Result;
use clap::Parser;
use ptrsweep::{LookupReport, SweepConfig, SweepEngine};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Get the version string for ptrsweep
fn get_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(env!("CARGO_PKG_VERSION"), "-UNRELEASED")
    } else {
        env!("CARGO_PKG_VERSION")
    }
}

/// Command-line arguments for the sweep tool.
#[derive(Parser, Debug)]
#[clap(author, version = get_version(), about = "Bulk reverse DNS sweeps over a CIDR range", long_about = None)]
struct Args {
    /// Network prefix to sweep, in CIDR notation (e.g. 192.0.2.0/24 or 2001:db8::/120)
    prefix: String,

    /// Number of concurrent resolver workers
    #[clap(short, long, default_value_t = 32)]
    workers: usize,

    /// Nameserver every query is sent to (host:port)
    #[clap(short, long, default_value = "127.0.0.1:53")]
    nameserver: String,

    /// Timeout for individual lookups in milliseconds
    #[clap(long, default_value_t = 1000)]
    lookup_timeout_ms: u64,

    /// Enable verbose output (use -vv for per-lookup detail)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Route diagnostics to stderr; stdout carries only result lines.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = SweepConfig::builder()
        .prefix(&args.prefix)
        .nameserver(&args.nameserver)
        .workers(args.workers)
        .lookup_timeout(Duration::from_millis(args.lookup_timeout_ms))
        .build()?;
    let engine = SweepEngine::new(config)?;

    let (report_tx, mut report_rx) = mpsc::unbounded_channel::<LookupReport>();
    let printer = tokio::spawn(async move {
        while let Some(report) = report_rx.recv().await {
            match &report.result {
                Ok(names) => match names.first() {
                    Some(name) => println!("{} {}", report.worker_id, name),
                    None => println!("WorkerID: {} Err: no PTR records found", report.worker_id),
                },
                Err(error) => println!("WorkerID: {} Err: {}", report.worker_id, error),
            }
        }
    });

    let summary = engine.run_with_reports(report_tx).await?;
    printer.await?;

    debug!(
        addresses = summary.addresses,
        resolved = summary.resolved,
        failed = summary.failed,
        duration_ms = summary.duration.as_millis() as u64,
        "sweep finished"
    );
    Ok(())
}
