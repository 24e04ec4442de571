//! Sweep dispatcher: wires the range enumerator, work queue, and worker pool

use crate::dns::{PtrLookup, PtrResolver};
use crate::range::AddrRange;
use crate::sweep::config::SweepConfig;
use crate::sweep::error::SweepError;
use crate::sweep::pool;
use crate::sweep::result::{LookupReport, SweepSummary};
use futures::future::join_all;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Barrier, Mutex};
use tracing::{debug, info};

/// High-level API for running a reverse DNS sweep
///
/// The engine enumerates every address in the configured prefix and feeds
/// them through a bounded queue to a fixed-size pool of resolver workers.
/// The queue capacity equals the pool size, so the feed loop blocks once the
/// workers fall behind; backpressure, not buffering, bounds memory use.
///
/// # Examples
///
/// ```no_run
/// use ptrsweep::{SweepConfig, SweepEngine};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SweepConfig::builder()
///     .prefix("192.0.2.0/28")
///     .nameserver("192.0.2.53:53")
///     .workers(8)
///     .build()?;
///
/// let summary = SweepEngine::new(config)?.run().await?;
/// println!("resolved {} of {}", summary.resolved, summary.addresses);
/// # Ok(())
/// # }
/// ```
pub struct SweepEngine {
    config: SweepConfig,
    resolver: Arc<dyn PtrLookup>,
}

impl SweepEngine {
    /// Create an engine from configuration
    ///
    /// Resolves the configured `host:port` nameserver once, through the
    /// system resolver, and pins a [`PtrResolver`] to it. Only the sweep's
    /// own PTR queries bypass the system configuration.
    ///
    /// # Errors
    ///
    /// * [`SweepError::Config`] - the configuration failed validation
    /// * [`SweepError::InvalidNameserver`] - the nameserver string did not
    ///   resolve to a usable socket address
    pub fn new(config: SweepConfig) -> Result<Self, SweepError> {
        config.validate()?;
        let nameserver = resolve_nameserver(&config.nameserver)?;
        let resolver = Arc::new(PtrResolver::new(nameserver, config.lookup_timeout));
        Ok(Self { config, resolver })
    }

    /// Create an engine with a custom resolver
    ///
    /// Useful for testing the pipeline with a stub lookup implementation.
    pub fn with_resolver(
        config: SweepConfig,
        resolver: Arc<dyn PtrLookup>,
    ) -> Result<Self, SweepError> {
        config.validate()?;
        Ok(Self { config, resolver })
    }

    /// Run the sweep, discarding per-address reports.
    pub async fn run(self) -> Result<SweepSummary, SweepError> {
        let (report_tx, mut report_rx) = mpsc::unbounded_channel();
        let drain = tokio::spawn(async move { while report_rx.recv().await.is_some() {} });
        let summary = self.run_with_reports(report_tx).await;
        let _ = drain.await;
        summary
    }

    /// Run the sweep, sending a [`LookupReport`] for every address to
    /// `report_tx`.
    ///
    /// Returns once every address in the range has been looked up and all
    /// workers have exited. Reports arrive in completion order, which is not
    /// the enqueue order.
    ///
    /// # Errors
    ///
    /// * [`SweepError::InvalidPrefix`] - the prefix failed to parse; nothing
    ///   was looked up
    /// * [`SweepError::Pool`] - a worker panicked or the pool shut down
    ///   before the range was drained
    pub async fn run_with_reports(
        self,
        report_tx: mpsc::UnboundedSender<LookupReport>,
    ) -> Result<SweepSummary, SweepError> {
        let started = Instant::now();
        let range = AddrRange::from_prefix(&self.config.prefix)
            .map_err(|e| SweepError::InvalidPrefix(e.to_string()))?;
        info!(
            range = %range,
            workers = self.config.workers,
            nameserver = %self.config.nameserver,
            "starting sweep"
        );

        let (work_tx, work_rx) = mpsc::channel(self.config.workers);
        let work_rx = Arc::new(Mutex::new(work_rx));
        let barrier = Arc::new(Barrier::new(self.config.workers + 1));
        let handles = pool::spawn(
            self.config.workers,
            work_rx,
            Arc::clone(&self.resolver),
            Arc::clone(&barrier),
            report_tx,
        );

        // Every worker is parked at its receive loop once the barrier opens,
        // so feeding cannot outrun pool startup.
        barrier.wait().await;

        let mut enqueued: u64 = 0;
        for addr in range.iter() {
            if work_tx.send(addr).await.is_err() {
                return Err(SweepError::Pool(
                    "all workers exited before the range was drained".to_string(),
                ));
            }
            enqueued += 1;
        }
        // Closing the queue is the end-of-work signal; workers exit once it
        // is drained.
        drop(work_tx);

        let mut resolved = 0;
        let mut failed = 0;
        for joined in join_all(handles).await {
            let stats = joined.map_err(|e| SweepError::Pool(e.to_string()))?;
            resolved += stats.resolved;
            failed += stats.failed;
        }

        let summary = SweepSummary {
            addresses: enqueued,
            resolved,
            failed,
            duration: started.elapsed(),
        };
        debug!(
            addresses = summary.addresses,
            resolved = summary.resolved,
            failed = summary.failed,
            "sweep complete"
        );
        Ok(summary)
    }
}

fn resolve_nameserver(endpoint: &str) -> Result<SocketAddr, SweepError> {
    endpoint
        .to_socket_addrs()
        .map_err(|e| SweepError::InvalidNameserver(format!("{endpoint}: {e}")))?
        .next()
        .ok_or_else(|| SweepError::InvalidNameserver(format!("{endpoint}: no usable address")))
}
