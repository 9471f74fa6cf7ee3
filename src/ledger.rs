use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    account::{self, AccountError, AccountId, AccountRecord},
    command::{BalanceAction, BalanceCommand, CommandError, TransferCommand},
    config::LedgerConfig,
    store::{LedgerStore, StoreError, file_store::FileLedgerStore},
    transaction::TransactionRecord,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InsufficientFunds,
    AccountNotFound,
    IoFailure,
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error("Account {id} not found")]
    AccountNotFound { id: AccountId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Command(_) | LedgerError::Account(AccountError::InvalidArgument(_)) => {
                ErrorKind::InvalidArgument
            }
            LedgerError::Account(AccountError::InsufficientFunds { .. }) => {
                ErrorKind::InsufficientFunds
            }
            LedgerError::AccountNotFound { .. } => ErrorKind::AccountNotFound,
            LedgerError::Store(_) => ErrorKind::IoFailure,
        }
    }
}

/// Balances of both sides once a transfer is committed, plus the journal entry written for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub from: AccountRecord,
    pub to: AccountRecord,
    pub transaction: TransactionRecord,
}

/// Account operations over a [`LedgerStore`].
///
/// Every operation loads the full account set, works on it in memory and writes it back.
/// Nothing is written until validation has passed, so a rejected operation leaves the store
/// untouched.
pub struct Ledger<S> {
    store: S,
}

impl Ledger<FileLedgerStore> {
    pub fn open(config: LedgerConfig) -> Self {
        Self::new(FileLedgerStore::new(config))
    }
}

impl<S> Ledger<S>
where
    S: LedgerStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Moves `amount` from `from_id` to `to_id` and journals it.
    ///
    /// The journal entry is appended before the account file is rewritten. If that rewrite
    /// fails, the journal holds an entry whose balance change never reached the store.
    pub fn transfer(
        &mut self,
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
    ) -> Result<TransferReceipt, LedgerError> {
        let command = TransferCommand::new(from_id, to_id, amount).inspect_err(|err| {
            info!(from_id, to_id, %amount, "Transfer rejected: {err}");
        })?;
        debug!(from_id, to_id, %amount, "Transfer validated");

        let mut accounts = self.store.load_all()?;
        let (from_idx, to_idx) = match locate_pair(&accounts, &command) {
            Ok(indices) => indices,
            Err(err) => {
                info!(from_id, to_id, %amount, "Transfer rejected: {err}");
                return Err(err);
            }
        };

        let from = &accounts[from_idx];
        if from.balance() < command.amount {
            let err = AccountError::InsufficientFunds {
                balance: from.balance(),
                requested: command.amount,
            };
            info!(from_id, to_id, %amount, "Transfer rejected: {err}");
            return Err(err.into());
        }

        accounts[from_idx] = account::withdraw(&accounts[from_idx], command.amount)?;
        accounts[to_idx] = account::deposit(&accounts[to_idx], command.amount)?;
        debug!(from_id, to_id, %amount, "Transfer applied in memory");

        let transaction = TransactionRecord::transfer(command.from_id, command.to_id, command.amount)?;
        self.store.append_transaction(&transaction)?;
        debug!(from_id, to_id, %amount, "Transfer logged");

        if let Err(err) = self.store.save_all(&accounts) {
            error!(
                from_id,
                to_id,
                %amount,
                "Transfer journaled but accounts were not saved: {err}"
            );
            return Err(err.into());
        }
        info!(from_id, to_id, %amount, "Transfer committed");

        Ok(TransferReceipt {
            from: accounts[from_idx].clone(),
            to: accounts[to_idx].clone(),
            transaction,
        })
    }

    /// Appends a new account. Identifiers are not checked for uniqueness.
    pub fn open_account(
        &mut self,
        owner: impl Into<String>,
        id: AccountId,
        opening_balance: Decimal,
    ) -> Result<AccountRecord, LedgerError> {
        let record = AccountRecord::new(owner, id, opening_balance)?;
        self.store.create_account(&record)?;
        info!(id, owner = record.owner(), "Account opened");
        Ok(record)
    }

    pub fn deposit(&mut self, id: AccountId, amount: Decimal) -> Result<AccountRecord, LedgerError> {
        self.apply(BalanceCommand::deposit(id, amount)?)
    }

    pub fn withdraw(&mut self, id: AccountId, amount: Decimal) -> Result<AccountRecord, LedgerError> {
        self.apply(BalanceCommand::withdraw(id, amount)?)
    }

    pub fn accounts(&self) -> Result<Vec<AccountRecord>, LedgerError> {
        Ok(self.store.load_all()?)
    }

    /// First account carrying `id`, in store order.
    pub fn find_account(&self, id: AccountId) -> Result<AccountRecord, LedgerError> {
        let accounts = self.store.load_all()?;
        let idx = find_index(&accounts, id).ok_or(LedgerError::AccountNotFound { id })?;
        Ok(accounts[idx].clone())
    }

    pub fn transactions(&self) -> Result<Vec<TransactionRecord>, LedgerError> {
        Ok(self.store.load_transactions()?)
    }

    fn apply(&mut self, command: BalanceCommand) -> Result<AccountRecord, LedgerError> {
        let mut accounts = self.store.load_all()?;
        let idx = find_index(&accounts, command.id)
            .ok_or(LedgerError::AccountNotFound { id: command.id })?;
        let updated = match command.action {
            BalanceAction::Withdraw => account::withdraw(&accounts[idx], command.amount)?,
            BalanceAction::Deposit => account::deposit(&accounts[idx], command.amount)?,
        };
        accounts[idx] = updated.clone();
        self.store.save_all(&accounts)?;
        info!(
            id = command.id,
            action = ?command.action,
            amount = %command.amount,
            balance = %updated.balance(),
            "Balance updated"
        );
        Ok(updated)
    }
}

fn find_index(accounts: &[AccountRecord], id: AccountId) -> Option<usize> {
    accounts.iter().position(|acc| acc.id() == id)
}

fn locate_pair(
    accounts: &[AccountRecord],
    command: &TransferCommand,
) -> Result<(usize, usize), LedgerError> {
    let from_idx = find_index(accounts, command.from_id).ok_or(LedgerError::AccountNotFound {
        id: command.from_id,
    })?;
    let to_idx = find_index(accounts, command.to_id).ok_or(LedgerError::AccountNotFound {
        id: command.to_id,
    })?;
    Ok((from_idx, to_idx))
}
