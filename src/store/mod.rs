use thiserror::Error;

use crate::{account::AccountRecord, transaction::TransactionRecord};

pub mod file_store;
pub mod in_memory_store;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ledger I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Ledger encoding failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Durable home of the account set and the transaction journal.
///
/// Loading is permissive: a malformed line is skipped, a missing backing file reads as empty.
/// Writes are not retried.
pub trait LedgerStore {
    fn load_all(&self) -> Result<Vec<AccountRecord>, StoreError>;

    /// Replaces the whole account set, keeping the given order.
    fn save_all(&mut self, records: &[AccountRecord]) -> Result<(), StoreError>;

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError>;

    /// Adds one account after the existing ones without rewriting them.
    fn create_account(&mut self, record: &AccountRecord) -> Result<(), StoreError>;

    fn load_transactions(&self) -> Result<Vec<TransactionRecord>, StoreError>;
}
