//! The parallel orchestrator filters dead partitions, fans work out to a
//! fixed-size native thread pool, and folds completions back into the global heap.
//! A sequential counterpart runs the same partitions on the calling thread for the
//! non-parallel mode.

use std::panic;
use std::sync::mpsc;

use threadpool::ThreadPool;

use crate::error::{MiningError, Result};
use crate::heap::TopKHeap;
use crate::partition::PrefixPartition;
use crate::processor::process_partition;
use crate::ItemType;

/// Runs every live partition on the calling thread, merging each local heap into
/// `global_mh` as soon as it's produced.
pub fn run_sequential<T: ItemType>(partitions: Vec<PrefixPartition<T>>, global_mh: &mut TopKHeap<T>) {
    for partition in partitions.into_iter().filter(|p| !p.is_dead()) {
        log::trace!("sequential: processing partition {:?}", partition.prefix_item);
        let snapshot = global_mh.clone();
        let local_mh = process_partition(&partition, snapshot);
        merge(global_mh, local_mh);
    }
}

/// Runs every live partition on a pool of `workers` OS threads. Each worker receives
/// a by-value snapshot of `global_mh` and the current `rmsup` taken at dispatch time.
/// Completions are collected through an `mpsc` channel and merged on the calling
/// thread in completion order. The first worker failure (panic) is recorded, the
/// remaining already-queued completions are still drained but no longer merged, and
/// the failure is re-raised after the pool has fully drained.
pub fn run_parallel<T>(
    partitions: Vec<PrefixPartition<T>>,
    global_mh: &mut TopKHeap<T>,
    workers: usize,
) -> Result<()>
where
    T: ItemType + Send + 'static,
{
    let live: Vec<PrefixPartition<T>> = partitions.into_iter().filter(|p| !p.is_dead()).collect();
    log::debug!(
        "orchestrator: dispatching {} live partitions to {} workers",
        live.len(),
        workers
    );
    let dispatched = live.len();

    let pool = ThreadPool::new(workers.max(1));
    let (tx, rx) = mpsc::channel();

    for partition in live {
        let snapshot = global_mh.clone();
        let prefix = format!("{:?}", partition.prefix_item);
        let tx = tx.clone();
        pool.execute(move || {
            let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                process_partition(&partition, snapshot)
            }))
            .map_err(|_| MiningError::WorkerPanicked { prefix });
            // The receiver only disappears if the orchestrator already bailed out on
            // an earlier failure; there is nothing useful to do with a send error.
            let _ = tx.send(outcome);
        });
    }
    drop(tx);

    let mut first_err = None;
    for _ in 0..dispatched {
        match rx.recv() {
            Ok(Ok(local_mh)) => merge(global_mh, local_mh),
            Ok(Err(e)) => {
                log::warn!("orchestrator: {}", e);
                first_err = Some(e);
                break;
            }
            Err(_) => break,
        }
    }

    pool.join();
    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn merge<T: ItemType>(global_mh: &mut TopKHeap<T>, local_mh: TopKHeap<T>) {
    for (itemset, support) in local_mh.drain_sorted() {
        global_mh.insert(support, itemset);
    }
}
