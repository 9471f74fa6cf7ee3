use std::fmt;

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::codec::{self, RecordError};

pub type AccountId = i32;

/// Character separating fields of a persisted line.
pub const FIELD_DELIMITER: char = '|';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds {
        balance: Decimal,
        requested: Decimal,
    },
}

/// Anything that can render a one-line human readable summary.
pub trait Displayable {
    fn details(&self, full: bool) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    id: AccountId,
    owner: String,
    balance: Decimal,
}

impl AccountRecord {
    pub fn new(
        owner: impl Into<String>,
        id: AccountId,
        balance: Decimal,
    ) -> Result<Self, AccountError> {
        let owner = owner.into();
        validate_text("owner", &owner)?;
        if balance < Decimal::zero() {
            return Err(AccountError::InvalidArgument(format!(
                "balance must not be negative, got {balance}"
            )));
        }
        Ok(Self { id, owner, balance })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        check_not_negative(amount, "Deposit")?;
        self.balance = self.balance.checked_add(amount).ok_or_else(|| {
            AccountError::InvalidArgument(format!(
                "balance would overflow: {} + {amount}",
                self.balance
            ))
        })?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        check_not_negative(amount, "Withdrawal")?;
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Renders the record as a single `owner|id|balance` line, without the line terminator.
    pub fn serialize(&self) -> String {
        codec::encode_account(self)
    }

    pub fn deserialize(text: &str) -> Result<Self, RecordError> {
        codec::decode_account(text)
    }
}

/// Returns a copy of `record` credited with `amount`.
pub fn deposit(record: &AccountRecord, amount: Decimal) -> Result<AccountRecord, AccountError> {
    let mut updated = record.clone();
    updated.deposit(amount)?;
    Ok(updated)
}

/// Returns a copy of `record` debited by `amount`. `record` itself is never touched.
pub fn withdraw(record: &AccountRecord, amount: Decimal) -> Result<AccountRecord, AccountError> {
    let mut updated = record.clone();
    updated.withdraw(amount)?;
    Ok(updated)
}

impl Displayable for AccountRecord {
    fn details(&self, full: bool) -> String {
        if full {
            format!(
                "Acc#: {} | Name: {} | Balance: {:.2}",
                self.id, self.owner, self.balance
            )
        } else {
            format!("Acc#: {} | Name: {}", self.id, self.owner)
        }
    }
}

impl fmt::Display for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details(true))
    }
}

fn check_not_negative(amount: Decimal, action: &str) -> Result<(), AccountError> {
    if amount < Decimal::zero() {
        Err(AccountError::InvalidArgument(format!(
            "{action} amount cannot be negative, got {amount}"
        )))
    } else {
        Ok(())
    }
}

/// Free text fields must not break the line format.
pub(crate) fn validate_text(field: &str, value: &str) -> Result<(), AccountError> {
    if value.contains(FIELD_DELIMITER) || value.contains(['\n', '\r']) {
        return Err(AccountError::InvalidArgument(format!(
            "{field} must not contain '{FIELD_DELIMITER}' or line breaks: {value:?}"
        )));
    }
    Ok(())
}
