use std::path::{Path, PathBuf};

pub const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";
pub const DEFAULT_JOURNAL_FILE: &str = "transactions.txt";

/// Locations of the two files making up a ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub accounts_path: PathBuf,
    pub journal_path: PathBuf,
}

impl LedgerConfig {
    pub fn new(accounts_path: impl Into<PathBuf>, journal_path: impl Into<PathBuf>) -> Self {
        Self {
            accounts_path: accounts_path.into(),
            journal_path: journal_path.into(),
        }
    }

    /// Default file names placed under `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(
            dir.join(DEFAULT_ACCOUNTS_FILE),
            dir.join(DEFAULT_JOURNAL_FILE),
        )
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ACCOUNTS_FILE, DEFAULT_JOURNAL_FILE)
    }
}
