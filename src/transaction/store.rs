//! The append-only list of transactions owned by a session.

use crate::transaction::Transaction;

/// The transactions recorded in one session, in the order they were added.
///
/// Transactions can only be appended. Nothing is ever edited or removed, so
/// the store only grows until its session is dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `transaction` to the end of the store.
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// All transactions in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions in the store.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether no transactions have been added yet.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
