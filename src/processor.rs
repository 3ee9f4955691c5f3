//! The partition processor mines one prefix partition into a local top-k heap via
//! high-support-first expansion, pruned by checking whether a candidate's left
//! sibling already survived the same pass.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::heap::TopKHeap;
use crate::partition::PrefixPartition;
use crate::tidset::{intersect, Tidset};
use crate::ItemType;

/// One entry in the expansion queue `qe`: an itemset (kept in ascending, canonical
/// form) together with its tidset and support. Priority is by support, ties broken
/// by the itemset's ascending tuple.
struct QueueEntry<T> {
    support: usize,
    itemset: Vec<T>,
    tidset: Tidset,
}

impl<T: PartialEq> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.support == other.support && self.itemset == other.itemset
    }
}

impl<T: Eq> Eq for QueueEntry<T> {}

impl<T: Ord> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Ord> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // `BinaryHeap` is a max-heap, so the natural "highest support first" priority
        // falls out directly; on a support tie we want the *smaller* itemset to win,
        // so the itemset comparison is reversed.
        self.support
            .cmp(&other.support)
            .then_with(|| other.itemset.cmp(&self.itemset))
    }
}

/// Inserts `item` into an already-ascending slice, producing a new ascending `Vec`.
fn insert_sorted<T: Ord + Copy>(sorted: &[T], item: T) -> Vec<T> {
    let pos = sorted.partition_point(|&x| x < item);
    let mut out = Vec::with_capacity(sorted.len() + 1);
    out.extend_from_slice(&sorted[..pos]);
    out.push(item);
    out.extend_from_slice(&sorted[pos..]);
    out
}

/// Mines one partition, starting from a snapshot of the global heap, and returns
/// the resulting local heap. `local_mh`'s `min_support()` is used as the initial
/// `local_rmsup`.
pub fn process_partition<T: ItemType>(
    partition: &PrefixPartition<T>,
    mut local_mh: TopKHeap<T>,
) -> TopKHeap<T> {
    let mut local_rmsup = local_mh.min_support();
    let mut ht: HashMap<Vec<T>, Tidset> = HashMap::new();
    let mut qe: BinaryHeap<QueueEntry<T>> = BinaryHeap::new();

    let ar_index: HashMap<T, usize> = partition
        .ar
        .iter()
        .enumerate()
        .map(|(i, &item)| (item, i))
        .collect();

    let prefix_item = partition.prefix_item;
    let prefix_tidset = match partition.tidsets.get(&prefix_item) {
        Some(t) => t.as_slice(),
        None => return local_mh,
    };

    // Seed the queue with every 2-itemset that survives rmsup.
    for &y in &partition.ar[1..] {
        let y_tidset = match partition.tidsets.get(&y) {
            Some(t) => t.as_slice(),
            None => continue,
        };
        let tset = intersect(prefix_tidset, y_tidset);
        let sup = tset.len();
        if sup > local_rmsup {
            let itemset = insert_sorted(&[prefix_item], y);
            ht.insert(itemset.clone(), tset.clone());
            qe.push(QueueEntry {
                support: sup,
                itemset,
                tidset: tset,
            });
        }
    }

    // Pop the highest-support candidate and try to extend it.
    while let Some(top) = qe.pop() {
        if top.support <= local_rmsup {
            break;
        }
        if top.itemset.len() >= 3 {
            if local_mh.insert(top.support, top.itemset.clone()) {
                local_rmsup = local_mh.min_support();
            }
        }

        let last = *top.itemset.last().expect("queue entries are never empty");
        let p = match ar_index.get(&last) {
            Some(&p) => p,
            None => continue,
        };
        let prefix_of_x = &top.itemset[..top.itemset.len() - 1];

        for &y in &partition.ar[p + 1..] {
            if top.itemset.contains(&y) {
                continue;
            }
            let left_sibling = insert_sorted(prefix_of_x, y);
            let sibling_tidset = match ht.get(&left_sibling) {
                Some(t) => t,
                None => continue, // left sibling didn't survive rmsup: this extension can't either
            };
            let new_tidset = intersect(&top.tidset, sibling_tidset);
            let sup_new = new_tidset.len();
            if sup_new > local_rmsup {
                let new_itemset = insert_sorted(&top.itemset, y);
                ht.insert(new_itemset.clone(), new_tidset.clone());
                qe.push(QueueEntry {
                    support: sup_new,
                    itemset: new_itemset,
                    tidset: new_tidset,
                });
            }
        }
    }

    local_mh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooccurrence::CoOccurrenceMatrix;
    use crate::tidset::TidsetStore;

    fn setup(transactions: &[Vec<i32>]) -> (TidsetStore<i32>, CoOccurrenceMatrix<i32>) {
        let mut store = TidsetStore::new();
        let mut co = CoOccurrenceMatrix::new();
        for (tid, txn) in transactions.iter().enumerate() {
            store.record(tid as u32, txn);
            co.record(txn);
        }
        (store, co)
    }

    #[test]
    fn expands_three_item_candidate_when_left_sibling_present() {
        // {1,2,3} occurs in txns 0,1; {1,2} and {1,3} both occur in 0,1,2.
        let transactions = vec![
            vec![1, 2, 3],
            vec![1, 2, 3],
            vec![1, 2],
            vec![1, 3],
        ];
        let (store, co) = setup(&transactions);
        let partition = PrefixPartition::build(1, &store, &co, 0);
        let local_mh = TopKHeap::new(5);
        let result = process_partition(&partition, local_mh);
        let drained = result.drain_sorted();
        assert!(drained.contains(&(vec![1, 2, 3], 2)));
    }

    #[test]
    fn respects_local_rmsup_termination() {
        let transactions = vec![vec![1, 2, 3], vec![1, 2], vec![1, 3]];
        let (store, co) = setup(&transactions);
        let partition = PrefixPartition::build(1, &store, &co, 0);
        // Seed a local heap already full of high-support entries so local_rmsup is high
        // enough that nothing in this tiny partition can beat it.
        let mut local_mh = TopKHeap::new(1);
        local_mh.insert(100, vec![9, 10]);
        let result = process_partition(&partition, local_mh);
        assert_eq!(result.drain_sorted(), vec![(vec![9, 10], 100)]);
    }

    #[test]
    fn never_inserts_seeded_two_itemsets_directly_into_local_heap() {
        let transactions = vec![vec![1, 2], vec![1, 2]];
        let (store, co) = setup(&transactions);
        let partition = PrefixPartition::build(1, &store, &co, 0);
        let result = process_partition(&partition, TopKHeap::new(5));
        // Seeding only populates the expansion queue; {1,2} must not appear in local_mh.
        assert!(result.drain_sorted().is_empty());
    }
}
