use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::account::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    Deposit,
    Withdraw,
    Transfer,
}

/// What a [`BalanceCommand`] does to its single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceAction {
    Deposit,
    Withdraw,
}

impl From<BalanceAction> for LedgerAction {
    fn from(action: BalanceAction) -> Self {
        match action {
            BalanceAction::Deposit => LedgerAction::Deposit,
            BalanceAction::Withdraw => LedgerAction::Withdraw,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Amount must be positive for {action:?}, got {amount}")]
    NonPositiveAmount {
        action: LedgerAction,
        amount: Decimal,
    },
    #[error("Amount must not be negative for {action:?}, got {amount}")]
    NegativeAmount {
        action: LedgerAction,
        amount: Decimal,
    },
}

/// Validated request to move `amount` from one account to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    pub from_id: AccountId,
    pub to_id: AccountId,
    pub amount: Decimal,
}

impl TransferCommand {
    pub fn new(
        from_id: AccountId,
        to_id: AccountId,
        amount: Decimal,
    ) -> Result<Self, CommandError> {
        require_positive(LedgerAction::Transfer, amount)?;
        Ok(Self {
            from_id,
            to_id,
            amount,
        })
    }
}

/// Validated request to credit or debit a single account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceCommand {
    pub id: AccountId,
    pub action: BalanceAction,
    pub amount: Decimal,
}

impl BalanceCommand {
    /// Deposits must move money. Withdrawals of zero are accepted and change nothing.
    pub fn deposit(id: AccountId, amount: Decimal) -> Result<Self, CommandError> {
        require_positive(BalanceAction::Deposit.into(), amount)?;
        Ok(Self {
            id,
            action: BalanceAction::Deposit,
            amount,
        })
    }

    pub fn withdraw(id: AccountId, amount: Decimal) -> Result<Self, CommandError> {
        if amount < Decimal::zero() {
            return Err(CommandError::NegativeAmount {
                action: BalanceAction::Withdraw.into(),
                amount,
            });
        }
        Ok(Self {
            id,
            action: BalanceAction::Withdraw,
            amount,
        })
    }
}

fn require_positive(action: LedgerAction, amount: Decimal) -> Result<(), CommandError> {
    if amount > Decimal::zero() {
        Ok(())
    } else {
        Err(CommandError::NonPositiveAmount { action, amount })
    }
}
