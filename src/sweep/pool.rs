//! Bounded worker pool draining the shared lookup queue

use crate::dns::{PtrLookup, PtrLookupError};
use crate::sweep::result::LookupReport;
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, UnboundedSender};
use tokio::sync::{Barrier, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Per-worker lookup counters, returned when a worker exits.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerStats {
    pub(crate) resolved: u64,
    pub(crate) failed: u64,
}

/// Spawn `workers` tasks competing over the shared `queue`.
///
/// Each worker identity is value-captured at spawn time. Workers park on the
/// barrier until every sibling (and the dispatcher) has arrived, then drain
/// the queue until it is closed and empty.
pub(crate) fn spawn(
    workers: usize,
    queue: Arc<Mutex<Receiver<IpAddr>>>,
    resolver: Arc<dyn PtrLookup>,
    barrier: Arc<Barrier>,
    report_tx: UnboundedSender<LookupReport>,
) -> Vec<JoinHandle<WorkerStats>> {
    (0..workers)
        .map(|worker_id| {
            let queue = Arc::clone(&queue);
            let resolver = Arc::clone(&resolver);
            let barrier = Arc::clone(&barrier);
            let report_tx = report_tx.clone();
            tokio::spawn(run_worker(worker_id, queue, resolver, barrier, report_tx))
        })
        .collect()
}

async fn run_worker(
    worker_id: usize,
    queue: Arc<Mutex<Receiver<IpAddr>>>,
    resolver: Arc<dyn PtrLookup>,
    barrier: Arc<Barrier>,
    report_tx: UnboundedSender<LookupReport>,
) -> WorkerStats {
    barrier.wait().await;
    let mut stats = WorkerStats::default();

    loop {
        // Hold the queue lock only across the receive; lookups run unlocked,
        // so at most `workers` of them are in flight at once.
        let next = { queue.lock().await.recv().await };
        let Some(addr) = next else {
            break;
        };

        // Success with zero names must never reach a consumer that indexes
        // the name list; normalize it to an error here.
        let result = match resolver.lookup_ptr(addr).await {
            Ok(names) if names.is_empty() => Err(PtrLookupError::NoRecords),
            other => other,
        };

        match &result {
            Ok(names) => {
                stats.resolved += 1;
                trace!(worker_id, %addr, names = names.len(), "resolved");
            }
            Err(error) => {
                stats.failed += 1;
                debug!(worker_id, %addr, %error, "lookup failed");
            }
        }

        // The sink may have been dropped by a caller that only wants the
        // summary; keep draining the queue either way.
        let _ = report_tx.send(LookupReport {
            worker_id,
            addr,
            result,
        });
    }

    trace!(worker_id, "queue closed and drained, worker exiting");
    stats
}
