//! `PrefixPartition`: for each frequent item `x_i`, the ordered promising-item
//! array `AR_i` and its restricted, `Arc`-shared tidset map.

use std::collections::HashMap;

use crate::cooccurrence::CoOccurrenceMatrix;
use crate::tidset::{SharedTidset, TidsetStore};
use crate::ItemType;

/// One prefix partition `P_i`, rooted at `prefix_item`.
pub struct PrefixPartition<T> {
    pub prefix_item: T,
    /// `AR_i`: `prefix_item` at index 0, followed by promising items sorted by
    /// descending co-occurrence with `prefix_item`, ties broken ascending by item.
    pub ar: Vec<T>,
    /// Restricted tidset map: `{ x -> T({x}) : x in AR_i }`, shared (not copied)
    /// from the global tidset store.
    pub tidsets: HashMap<T, SharedTidset>,
}

impl<T: ItemType> PrefixPartition<T> {
    /// Builds `P_i` for `prefix_item`, using `rmsup` as the promising-item threshold:
    /// an item `x_j` is promising only if `CO[x_i][x_j] > rmsup`.
    pub fn build(
        prefix_item: T,
        store: &TidsetStore<T>,
        co: &CoOccurrenceMatrix<T>,
        rmsup: usize,
    ) -> Self {
        let mut promising: Vec<(T, u32)> = co
            .partners(prefix_item)
            .filter(|&(_, count)| count as usize > rmsup)
            .collect();
        // Descending by co-occurrence count, ties broken ascending by item.
        promising.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut ar = Vec::with_capacity(promising.len() + 1);
        ar.push(prefix_item);
        ar.extend(promising.iter().map(|&(item, _)| item));

        let mut tidsets = HashMap::with_capacity(ar.len());
        for &item in &ar {
            if let Some(shared) = store.get_shared(&item) {
                tidsets.insert(item, shared);
            }
        }

        PrefixPartition {
            prefix_item,
            ar,
            tidsets,
        }
    }

    /// Whether this partition can be safely skipped: no promising co-occurrence
    /// above `rmsup` means it cannot produce any 2-itemset, or by anti-monotonicity
    /// of support, any larger itemset, exceeding `rmsup`.
    pub fn is_dead(&self) -> bool {
        self.ar.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_store_and_co(transactions: &[Vec<i32>]) -> (TidsetStore<i32>, CoOccurrenceMatrix<i32>) {
        let mut store = TidsetStore::new();
        let mut co = CoOccurrenceMatrix::new();
        for (tid, txn) in transactions.iter().enumerate() {
            store.record(tid as u32, txn);
            co.record(txn);
        }
        (store, co)
    }

    #[test]
    fn ar_starts_with_prefix_item_and_is_sorted_by_co_desc() {
        let transactions = vec![
            vec![1, 2, 3],
            vec![1, 2, 3],
            vec![1, 2],
            vec![1, 3],
        ];
        let (store, co) = build_store_and_co(&transactions);
        let partition = PrefixPartition::build(1, &store, &co, 0);
        assert_eq!(partition.ar[0], 1);
        // CO[1][2] = 3, CO[1][3] = 3 -> tie, broken ascending by item.
        assert_eq!(partition.ar[1..], [2, 3]);
    }

    #[test]
    fn promising_items_are_filtered_by_rmsup() {
        let transactions = vec![vec![1, 2], vec![1, 2], vec![1, 3]];
        let (store, co) = build_store_and_co(&transactions);
        // CO[1][2] = 2, CO[1][3] = 1. With rmsup = 1, only item 2 survives.
        let partition = PrefixPartition::build(1, &store, &co, 1);
        assert_eq!(partition.ar, vec![1, 2]);
    }

    #[test]
    fn dead_partition_has_no_promising_items() {
        let transactions = vec![vec![1, 2]];
        let (store, co) = build_store_and_co(&transactions);
        let partition = PrefixPartition::build(1, &store, &co, 10);
        assert!(partition.is_dead());
    }
}
