//! The driver validates `MineConfig`, sequences the mining stages, and exposes
//! the crate's single public entry point, [`mine`].

use crate::cooccurrence::CoOccurrenceMatrix;
use crate::error::{MiningError, Result};
use crate::heap::TopKHeap;
use crate::orchestrator::{run_parallel, run_sequential};
use crate::partition::PrefixPartition;
use crate::source::TransactionSource;
use crate::tidset::TidsetStore;
use crate::ItemType;

/// The mining options. Validated eagerly by its constructors so that, by the time
/// a `MineConfig` value exists, `mine` never has to reject it.
#[derive(Debug, Clone, Copy)]
pub struct MineConfig {
    k: usize,
    parallel: bool,
    workers: usize,
}

impl MineConfig {
    /// A sequential-mode config requesting the top `k` itemsets.
    pub fn sequential(k: usize) -> Result<Self> {
        Self::validated(k, false, 1)
    }

    /// A parallel-mode config with a pool of `workers` threads.
    pub fn parallel(k: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(MiningError::InvalidConfig {
                reason: "workers must be >= 1 when parallel".to_string(),
            });
        }
        Self::validated(k, true, workers)
    }

    fn validated(k: usize, parallel: bool, workers: usize) -> Result<Self> {
        if k == 0 {
            return Err(MiningError::InvalidConfig {
                reason: "k must be >= 1".to_string(),
            });
        }
        Ok(MineConfig {
            k,
            parallel,
            workers,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

/// Mines `source` for the top-`k` frequent itemsets per `config`, returning them
/// sorted by support descending then itemset ascending.
///
/// Zero transactions or zero items is not an error: `mine` returns `Ok(vec![])`.
pub fn mine<T, S>(source: &mut S, config: &MineConfig) -> Result<Vec<(Vec<T>, usize)>>
where
    T: ItemType + Send + 'static,
    S: TransactionSource<T>,
{
    log::debug!("driver: scanning transaction source");
    let (store, co) = scan(source)?;

    if store.is_empty() {
        log::debug!("driver: empty item universe, returning empty result");
        return Ok(vec![]);
    }

    let mut global_mh = TopKHeap::new(config.k);
    log::debug!("driver: bootstrapping rmsup from co-occurrence pairs");
    bootstrap(&co, &mut global_mh);

    let rmsup = global_mh.min_support();
    let mut frequent_items: Vec<T> = store
        .items()
        .copied()
        .filter(|item| store.support(item) > rmsup)
        .collect();
    // `TidsetStore::items` iterates its backing hash map in arbitrary order; sort so
    // partitions are always built and processed in the same item order.
    frequent_items.sort();
    log::debug!(
        "driver: {} frequent items above bootstrap rmsup={}",
        frequent_items.len(),
        rmsup
    );

    let partitions: Vec<PrefixPartition<T>> = frequent_items
        .into_iter()
        .map(|item| PrefixPartition::build(item, &store, &co, rmsup))
        .collect();

    if config.parallel {
        log::debug!(
            "driver: processing {} partitions in parallel ({} workers)",
            partitions.len(),
            config.workers
        );
        run_parallel(partitions, &mut global_mh, config.workers)?;
    } else {
        log::debug!(
            "driver: processing {} partitions sequentially",
            partitions.len()
        );
        run_sequential(partitions, &mut global_mh);
    }

    // The partition processor only ever produces itemsets of size >= 2. Fill any
    // slots it left empty with singletons, highest support first.
    top_up_singletons(&store, &mut global_mh);

    Ok(global_mh.drain_sorted())
}

fn top_up_singletons<T: ItemType>(store: &TidsetStore<T>, global_mh: &mut TopKHeap<T>) {
    if global_mh.len() >= global_mh.k() {
        return;
    }
    let mut singles: Vec<(T, usize)> = store.items().map(|&item| (item, store.support(&item))).collect();
    singles.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (item, support) in singles {
        if global_mh.len() >= global_mh.k() {
            break;
        }
        global_mh.insert(support, vec![item]);
    }
}

fn scan<T, S>(source: &mut S) -> Result<(TidsetStore<T>, CoOccurrenceMatrix<T>)>
where
    T: ItemType,
    S: TransactionSource<T>,
{
    let mut store = TidsetStore::new();
    let mut co = CoOccurrenceMatrix::new();
    let mut tid: u32 = 0;
    while let Some(items) = source.next_transaction()? {
        store.record(tid, &items);
        co.record(&items);
        tid += 1;
    }
    Ok((store, co))
}

/// Seeds the global heap with every 2-itemset implied by the co-occurrence matrix.
/// `rmsup` after this pass is the bootstrap pruning threshold used to build and
/// filter partitions.
///
/// Pairs are sorted by support descending (ties broken by the pair itself, ascending)
/// before insertion, rather than inserted in `CoOccurrenceMatrix`'s arbitrary hash-map
/// order, so eviction ties between equally-supported pairs resolve the same way on
/// every run.
fn bootstrap<T: ItemType>(co: &CoOccurrenceMatrix<T>, global_mh: &mut TopKHeap<T>) {
    let mut pairs: Vec<(T, T, u32)> = co.pairs().collect();
    pairs.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));
    for (i, j, count) in pairs {
        global_mh.insert(count as usize, vec![i, j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::VecTransactionSource;

    fn run(transactions: Vec<Vec<i32>>, k: usize) -> Vec<(Vec<i32>, usize)> {
        let mut source = VecTransactionSource::new(transactions);
        let config = MineConfig::sequential(k).unwrap();
        mine(&mut source, &config).unwrap()
    }

    #[test]
    fn config_rejects_zero_k() {
        assert!(MineConfig::sequential(0).is_err());
        assert!(MineConfig::parallel(0, 2).is_err());
    }

    #[test]
    fn config_rejects_zero_workers_when_parallel() {
        assert!(MineConfig::parallel(3, 0).is_err());
        assert!(MineConfig::parallel(3, 1).is_ok());
    }

    #[test]
    fn s1_smoke() {
        let transactions = vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]];
        let result = run(transactions, 3);
        assert_eq!(result.len(), 3);
        for (itemset, support) in &result {
            assert_eq!(itemset.len(), 2);
            assert_eq!(*support, 3);
        }
    }

    #[test]
    fn s2_prefix_depth() {
        let transactions = vec![
            vec![1, 2, 3, 4],
            vec![1, 2, 3, 4],
            vec![1, 2, 3],
            vec![1, 2],
        ];
        let result = run(transactions, 4);
        assert_eq!(
            result,
            vec![
                (vec![1, 2], 4),
                (vec![1, 2, 3], 3),
                (vec![1, 3], 3),
                (vec![2, 3], 3),
            ]
        );
    }

    #[test]
    fn s3_duplicates_within_a_transaction_collapse() {
        let transactions = vec![vec![1, 1, 2], vec![2, 1]];
        let result = run(transactions, 2);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0], (vec![1, 2], 2));
        assert_eq!(result[1].1, 2);
    }

    #[test]
    fn s4_k_larger_than_the_result_space() {
        let transactions = vec![vec![1], vec![2]];
        let result = run(transactions, 10);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn s5_empty_database_is_not_an_error() {
        let result = run(vec![], 5);
        assert!(result.is_empty());
    }

    #[test]
    fn s6_sequential_and_parallel_are_bit_identical() {
        // A modest synthetic database; exhaustively checking sequential/parallel
        // agreement on a larger corpus is covered by the orchestrator's own test.
        let mut transactions = Vec::new();
        for i in 0..200u32 {
            let mut txn: Vec<i32> = (0..6).map(|j| ((i + j * 7) % 50) as i32).collect();
            txn.sort();
            txn.dedup();
            transactions.push(txn);
        }

        let seq_config = MineConfig::sequential(10).unwrap();
        let mut seq_source = VecTransactionSource::new(transactions.clone());
        let seq_result = mine(&mut seq_source, &seq_config).unwrap();

        let par_config = MineConfig::parallel(10, 4).unwrap();
        let mut par_source = VecTransactionSource::new(transactions);
        let par_result = mine(&mut par_source, &par_config).unwrap();

        assert_eq!(seq_result, par_result);
    }
}
