//! `TidsetStore` holds the vertical (per-item) tidset representation, built by a
//! single pass over the transaction source.

use std::collections::HashMap;
use std::sync::Arc;

use crate::ItemType;

/// A strictly increasing sequence of transaction ids. `support(X) = T(X).len()`.
pub type Tidset = Vec<u32>;

/// Singleton tidsets are shared read-only across partitions and worker threads via
/// `Arc`. Cloning a `SharedTidset` bumps a refcount instead of copying the list.
pub type SharedTidset = Arc<Tidset>;

/// Intersects two tidsets with a linear two-pointer merge.
/// Both inputs must already be strictly ascending; the result is too.
pub fn intersect(a: &[u32], b: &[u32]) -> Tidset {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

/// Maps every item that appears at least once to its sorted tid list, behind an
/// `Arc` so handing a tidset to a worker thread is a refcount bump, not a copy.
#[derive(Default)]
pub struct TidsetStore<T> {
    tidsets: HashMap<T, SharedTidset>,
    transaction_count: u32,
}

impl<T: ItemType> TidsetStore<T> {
    pub fn new() -> Self {
        TidsetStore {
            tidsets: HashMap::new(),
            transaction_count: 0,
        }
    }

    /// Appends `tid` to the tidset of every distinct item in the transaction.
    /// Transactions must be fed in tid-ascending order so every tidset stays sorted.
    /// No clone of the store exists yet during this build pass, so `Arc::make_mut`
    /// never has to clone the backing vector.
    pub fn record(&mut self, tid: u32, items: &[T]) {
        for &item in items {
            let tids = self.tidsets.entry(item).or_insert_with(|| Arc::new(Vec::new()));
            Arc::make_mut(tids).push(tid);
        }
        self.transaction_count = self.transaction_count.max(tid + 1);
    }

    /// The tidset of a singleton item, or `None` if it never occurred.
    pub fn get(&self, item: &T) -> Option<&Tidset> {
        self.tidsets.get(item).map(Arc::as_ref)
    }

    /// A cheap `Arc` clone of a singleton's tidset, suitable for handing to a
    /// partition or worker thread without copying its contents.
    pub fn get_shared(&self, item: &T) -> Option<SharedTidset> {
        self.tidsets.get(item).cloned()
    }

    /// Support of a singleton item (0 if it never occurred).
    pub fn support(&self, item: &T) -> usize {
        self.tidsets.get(item).map(|t| t.len()).unwrap_or(0)
    }

    /// Every item observed at least once, in arbitrary order.
    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.tidsets.keys()
    }

    pub fn transaction_count(&self) -> u32 {
        self.transaction_count
    }

    pub fn is_empty(&self) -> bool {
        self.tidsets.is_empty()
    }
}
