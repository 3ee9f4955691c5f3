//! A Prefix-partitioned Top-k Frequent itemset mining (PTF) engine.
//!
//! Given a transaction database (a multiset of transactions over an item universe)
//! and an integer `k`, [`mine`] returns the `k` itemsets with the highest supports
//! (transaction counts), together with their supports, sorted by support descending
//! then itemset ascending.
//!
//! # Usage
//!
//! ```
//! use ptf_miner::{mine, MineConfig, VecTransactionSource};
//!
//! let transactions = vec![
//!     vec![1, 2, 3],
//!     vec![1, 2],
//!     vec![1, 3],
//!     vec![2, 3],
//! ];
//! let mut source = VecTransactionSource::new(transactions);
//! let config = MineConfig::sequential(3).unwrap();
//! let result = mine(&mut source, &config).unwrap();
//! for (itemset, support) in &result {
//!     println!("{:?} {}", itemset, support);
//! }
//! assert_eq!(result.len(), 3);
//! ```
//!
//! Running the same database in parallel mode finds the same itemsets:
//!
//! ```
//! use ptf_miner::{mine, MineConfig, VecTransactionSource};
//!
//! let transactions = vec![vec![1, 2, 3], vec![1, 2], vec![1, 3], vec![2, 3]];
//! let mut source = VecTransactionSource::new(transactions);
//! let config = MineConfig::parallel(3, 2).unwrap();
//! let result = mine(&mut source, &config).unwrap();
//! assert_eq!(result.len(), 3);
//! ```

use std::{fmt::Debug, hash::Hash};

pub mod cooccurrence;
pub mod driver;
pub mod error;
pub mod heap;
pub mod orchestrator;
pub mod partition;
pub mod processor;
pub mod source;
pub mod tidset;

pub use driver::{mine, MineConfig};
pub use error::{MiningError, Result};
pub use source::{TextTransactionSource, TransactionSource, VecTransactionSource};

/// The bound every item identifier in this crate must satisfy: a total order for
/// canonicalizing itemsets, `Hash` for the tidset/co-occurrence maps, `Copy` so
/// itemsets can be built up cheaply, and `Debug` for diagnostics.
pub trait ItemType: Eq + Ord + Hash + Copy + Debug {}

impl<T> ItemType for T where T: Eq + Ord + Hash + Copy + Debug {}
