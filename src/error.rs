//! The crate's error taxonomy.
//!
//! A single [`MiningError`] enum covers every way a mining run can fail to produce a
//! result at all. Algorithmic pruning decisions (an itemset falling below `rmsup`, a
//! partition being filtered out) are not errors. They are ordinary control flow and
//! never surface here.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MiningError>;

/// Everything that can keep [`crate::mine`] from returning a result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MiningError {
    /// A transaction source produced a token that isn't a non-negative integer item id.
    #[error("malformed input at line {line}: {token:?} is not a valid item id")]
    MalformedInput { line: usize, token: String },

    /// `MineConfig` was constructed with an invalid combination of options.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Allocation failed while building the tidset store or co-occurrence matrix.
    #[error("resource exhausted while building {during}")]
    ResourceExhausted { during: &'static str },

    /// A worker thread panicked while processing a partition.
    #[error("worker panicked while processing partition rooted at prefix item {prefix}")]
    WorkerPanicked { prefix: String },
}
