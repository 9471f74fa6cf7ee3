use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use csv::StringRecord;
use tracing::{debug, warn};

use crate::{
    account::AccountRecord,
    codec::{self, AccountRow, RecordError, TransactionRow},
    config::LedgerConfig,
    transaction::TransactionRecord,
};

use super::{LedgerStore, StoreError};

/// Ledger kept in two plain text files.
///
/// There is no file locking: a single process is expected to own both files. `save_all`
/// truncates the account file and writes it again in place, so a crash in the middle of a
/// save can leave it truncated.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    accounts_path: PathBuf,
    journal_path: PathBuf,
}

impl FileLedgerStore {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            accounts_path: config.accounts_path,
            journal_path: config.journal_path,
        }
    }

    pub fn accounts_path(&self) -> &Path {
        &self.accounts_path
    }

    pub fn journal_path(&self) -> &Path {
        &self.journal_path
    }
}

impl LedgerStore for FileLedgerStore {
    fn load_all(&self) -> Result<Vec<AccountRecord>, StoreError> {
        let accounts = read_permissive(
            &self.accounts_path,
            "account",
            codec::decode_account_record,
        )?;
        debug!(
            path = %self.accounts_path.display(),
            count = accounts.len(),
            "Loaded accounts"
        );
        Ok(accounts)
    }

    fn save_all(&mut self, records: &[AccountRecord]) -> Result<(), StoreError> {
        let file = File::create(&self.accounts_path)?;
        let mut writer = codec::writer_builder().from_writer(file);
        for record in records {
            writer.serialize(AccountRow::from(record))?;
        }
        // make sure write errors surface here rather than being lost on drop
        writer.flush()?;
        debug!(
            path = %self.accounts_path.display(),
            count = records.len(),
            "Saved accounts"
        );
        Ok(())
    }

    fn append_transaction(&mut self, record: &TransactionRecord) -> Result<(), StoreError> {
        append_row(&self.journal_path, TransactionRow::from(record))?;
        debug!(path = %self.journal_path.display(), "Appended journal entry");
        Ok(())
    }

    fn create_account(&mut self, record: &AccountRecord) -> Result<(), StoreError> {
        append_row(&self.accounts_path, AccountRow::from(record))?;
        debug!(
            path = %self.accounts_path.display(),
            id = record.id(),
            "Appended account"
        );
        Ok(())
    }

    fn load_transactions(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        read_permissive(
            &self.journal_path,
            "journal",
            codec::decode_transaction_record,
        )
    }
}

fn append_row<S: serde::Serialize>(path: &Path, row: S) -> Result<(), StoreError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = codec::writer_builder().from_writer(file);
    writer.serialize(row)?;
    writer.flush()?;
    Ok(())
}

/// Reads every line of `path`, skipping the ones `decode` rejects.
fn read_permissive<T>(
    path: &Path,
    kind: &str,
    decode: fn(&StringRecord) -> Result<T, RecordError>,
) -> Result<Vec<T>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No {kind} file yet");
            return Ok(Vec::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut reader = codec::reader_builder().from_reader(file);
    let mut items = Vec::new();
    for row in reader.records() {
        match row {
            Ok(record) => match decode(&record) {
                Ok(item) => items.push(item),
                Err(err) => {
                    let line = record.position().map(|pos| pos.line()).unwrap_or_default();
                    warn!(path = %path.display(), line, "Skipping malformed {kind} line: {err}");
                }
            },
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|pos| pos.line()).unwrap_or_default();
                warn!(path = %path.display(), line, "Skipping unreadable {kind} line: {err}");
            }
        }
    }
    Ok(items)
}
