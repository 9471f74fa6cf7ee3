use std::io;

use crate::{account::AccountRecord, transaction::TransactionRecord};

use super::{LedgerStore, StoreError};

/// Store that keeps everything in vectors. Writes can be made to fail once, to observe how
/// callers behave when the disk gives up halfway through an operation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedgerStore {
    pub accounts: Vec<AccountRecord>,
    pub journal: Vec<TransactionRecord>,
    fail_next_append: bool,
    fail_next_save: bool,
}

impl InMemoryLedgerStore {
    pub fn with_accounts(accounts: Vec<AccountRecord>) -> Self {
        Self {
            accounts,
            ..Default::default()
        }
    }

    pub fn fail_next_append(&mut self) {
        self.fail_next_append = true;
    }

    pub fn fail_next_save(&mut self) {
        self.fail_next_save = true;
    }
}

fn injected_failure(what: &str) -> StoreError {
    StoreError::Io(io::Error::other(format!("injected {what} failure")))
}

impl LedgerStore for InMemoryLedgerStore {
    fn load_all(&self) -> Result<Vec<AccountRecord>, StoreError> {
        Ok(self.accounts.clone())
    }

    fn save_all(&mut self, records: &[AccountRecord]) -> Result<(), StoreError> {
        if std::mem::take(&mut self.fail_next_save) {
            return Err(injected_failure("save"));
        }
        self.accounts = records.to_vec();
        Ok(())
    }

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError> {
        if std::mem::take(&mut self.fail_next_append) {
            return Err(injected_failure("append"));
        }
        self.journal.push(record.clone());
        Ok(())
    }

    fn create_account(&mut self, record: &AccountRecord) -> Result<(), StoreError> {
        self.accounts.push(record.clone());
        Ok(())
    }

    fn load_transactions(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        Ok(self.journal.clone())
    }
}
