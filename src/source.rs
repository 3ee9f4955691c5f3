//! `TransactionSource`: the abstract single-pass transaction feed, plus two
//! in-memory reference adapters. Neither adapter touches the filesystem; callers
//! wire their own file reading and hand this crate a `BufRead` or an
//! already-materialized `Vec<Vec<T>>`.

use std::collections::HashSet;
use std::io::BufRead;

use crate::error::{MiningError, Result};
use crate::ItemType;

/// A lazy, single-pass sequence of transactions. Each call to `next_transaction`
/// yields the next transaction's deduplicated items, or `None` once exhausted. The
/// source is expected to be drained exactly once; re-use after exhaustion is
/// unspecified.
pub trait TransactionSource<T> {
    fn next_transaction(&mut self) -> Result<Option<Vec<T>>>;
}

/// Wraps an already-materialized in-memory transaction list, the simplest
/// possible source, taking ownership of ready-made transactions.
pub struct VecTransactionSource<T> {
    transactions: std::vec::IntoIter<Vec<T>>,
}

impl<T: ItemType> VecTransactionSource<T> {
    pub fn new(transactions: Vec<Vec<T>>) -> Self {
        VecTransactionSource {
            transactions: transactions.into_iter(),
        }
    }
}

impl<T: ItemType> TransactionSource<T> for VecTransactionSource<T> {
    fn next_transaction(&mut self) -> Result<Option<Vec<T>>> {
        Ok(self.transactions.next().map(|txn| dedup(txn)))
    }
}

/// Parses the reference textual dataset format: one whitespace-separated line of
/// non-negative integer item ids per transaction, blank lines ignored, no header.
pub struct TextTransactionSource<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TextTransactionSource<R> {
    pub fn new(reader: R) -> Self {
        TextTransactionSource {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> TransactionSource<u64> for TextTransactionSource<R> {
    fn next_transaction(&mut self) -> Result<Option<Vec<u64>>> {
        loop {
            let line = match self.lines.next() {
                None => return Ok(None),
                Some(line) => line.map_err(|_| MiningError::MalformedInput {
                    line: self.line_no + 1,
                    token: String::new(),
                })?,
            };
            self.line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            let mut items = Vec::new();
            for token in line.split_whitespace() {
                let item: u64 = token.parse().map_err(|_| MiningError::MalformedInput {
                    line: self.line_no,
                    token: token.to_string(),
                })?;
                items.push(item);
            }
            return Ok(Some(dedup(items)));
        }
    }
}

fn dedup<T: ItemType>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items.into_iter().filter(|item| seen.insert(*item)).collect()
}
