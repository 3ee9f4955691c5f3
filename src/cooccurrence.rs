//! `CoOccurrenceMatrix` is the sparse, symmetric pairwise co-occurrence count,
//! built during the same scan as the tidset store.

use std::collections::HashMap;

use itertools::Itertools;

use crate::ItemType;

/// `CO[i][j] = |T({i}) ∩ T({j})|` for `i < j`, stored only when the count is > 0.
/// Reads for an unordered pair go through [`CoOccurrenceMatrix::get`], which
/// normalizes the pair to `(min, max)` before looking it up.
#[derive(Default)]
pub struct CoOccurrenceMatrix<T> {
    counts: HashMap<T, HashMap<T, u32>>,
}

impl<T: ItemType> CoOccurrenceMatrix<T> {
    pub fn new() -> Self {
        CoOccurrenceMatrix {
            counts: HashMap::new(),
        }
    }

    /// Increments every unordered pair of distinct items found in one (already
    /// duplicate-free) transaction.
    pub fn record(&mut self, items: &[T]) {
        for (a, b) in items.iter().tuple_combinations() {
            let (lo, hi) = if a < b { (*a, *b) } else { (*b, *a) };
            *self.counts.entry(lo).or_insert_with(HashMap::new).entry(hi).or_insert(0) += 1;
        }
    }

    /// `CO[i][j]`, or 0 if the pair never co-occurred.
    pub fn get(&self, i: T, j: T) -> u32 {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.counts
            .get(&lo)
            .and_then(|row| row.get(&hi))
            .copied()
            .unwrap_or(0)
    }

    /// All items that co-occur with `item` and their counts, in arbitrary order.
    pub fn partners(&self, item: T) -> impl Iterator<Item = (T, u32)> + '_ {
        let as_lo = self
            .counts
            .get(&item)
            .into_iter()
            .flat_map(|row| row.iter().map(|(&j, &c)| (j, c)));
        let as_hi = self.counts.iter().filter_map(move |(&lo, row)| {
            if lo == item {
                None
            } else {
                row.get(&item).map(|&c| (lo, c))
            }
        });
        as_lo.chain(as_hi)
    }

    /// All `((i, j), count)` pairs with `i < j`, in arbitrary order. Used to
    /// bootstrap the global top-k heap from 2-itemsets.
    pub fn pairs(&self) -> impl Iterator<Item = (T, T, u32)> + '_ {
        self.counts
            .iter()
            .flat_map(|(&lo, row)| row.iter().map(move |(&hi, &c)| (lo, hi, c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_unordered_pairs_symmetrically() {
        let mut co = CoOccurrenceMatrix::new();
        co.record(&[1, 2, 3]);
        co.record(&[2, 3]);
        assert_eq!(co.get(1, 2), 1);
        assert_eq!(co.get(2, 1), 1);
        assert_eq!(co.get(2, 3), 2);
        assert_eq!(co.get(1, 3), 1);
        assert_eq!(co.get(1, 9), 0);
    }

    #[test]
    fn partners_sees_both_directions() {
        let mut co = CoOccurrenceMatrix::new();
        co.record(&[1, 2]);
        co.record(&[3, 1]);
        let mut partners: Vec<(i32, u32)> = co.partners(1).collect();
        partners.sort();
        assert_eq!(partners, vec![(2, 1), (3, 1)]);
    }

    #[test]
    fn pairs_round_trips_against_tidset_intersection() {
        use crate::tidset::{intersect, TidsetStore};
        let transactions: Vec<Vec<i32>> = vec![vec![1, 2, 3], vec![1, 2], vec![2, 3]];
        let mut store = TidsetStore::new();
        let mut co = CoOccurrenceMatrix::new();
        for (tid, txn) in transactions.iter().enumerate() {
            store.record(tid as u32, txn);
            co.record(txn);
        }
        for (i, j, count) in co.pairs() {
            let ti = store.get(&i).unwrap();
            let tj = store.get(&j).unwrap();
            assert_eq!(intersect(ti, tj).len() as u32, count);
        }
    }
}
