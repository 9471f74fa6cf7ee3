use rust_decimal::{Decimal, prelude::Zero};

use crate::{
    account::{AccountError, AccountId, validate_text},
    codec::{self, RecordError},
};

/// Note written for every journaled transfer.
pub const TRANSFER_NOTE: &str = "transfer";

/// One journal entry. Created once per committed transfer and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    from_id: AccountId,
    to_id: AccountId,
    amount: Decimal,
    note: String,
}

impl TransactionRecord {
    pub fn new(
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
        note: impl Into<String>,
    ) -> Result<Self, AccountError> {
        let note = note.into();
        validate_text("note", &note)?;
        if amount <= Decimal::zero() {
            return Err(AccountError::InvalidArgument(format!(
                "transaction amount must be positive, got {amount}"
            )));
        }
        Ok(Self {
            from_id,
            to_id,
            amount,
            note,
        })
    }

    pub fn transfer(
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
    ) -> Result<Self, AccountError> {
        Self::new(from_id, to_id, amount, TRANSFER_NOTE)
    }

    pub fn from_id(&self) -> AccountId {
        self.from_id
    }

    pub fn to_id(&self) -> AccountId {
        self.to_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// `from|to|amount|note`, without the line terminator.
    pub fn serialize(&self) -> String {
        codec::encode_transaction(self)
    }

    pub fn deserialize(text: &str) -> Result<Self, RecordError> {
        codec::decode_transaction(text)
    }
}
