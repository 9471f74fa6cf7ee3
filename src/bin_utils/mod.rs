//! Command line front end for [`crate::ledger::Ledger`]. It lives in the library so the
//! integration tests can drive it without spawning the binary.

use std::{io::Write, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::{
    account::{AccountId, Displayable},
    config::{DEFAULT_ACCOUNTS_FILE, DEFAULT_JOURNAL_FILE, LedgerConfig},
    ledger::Ledger,
};
use printer::{print_accounts, print_transactions};

pub mod printer;

#[derive(Debug, Parser)]
#[command(name = "flat-ledger", version, about = "File backed account ledger")]
pub struct Cli {
    /// Account file, one `owner|id|balance` line per account
    #[arg(long, default_value = DEFAULT_ACCOUNTS_FILE)]
    pub accounts: PathBuf,

    /// Append-only transaction journal
    #[arg(long, default_value = DEFAULT_JOURNAL_FILE)]
    pub journal: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> LedgerConfig {
        LedgerConfig::new(&self.accounts, &self.journal)
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Append a new account
    Open {
        owner: String,
        id: AccountId,
        #[arg(allow_negative_numbers = true)]
        balance: Decimal,
    },
    Deposit {
        id: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    Withdraw {
        id: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Move funds between two accounts and journal the transfer
    Transfer {
        from: AccountId,
        to: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Show all accounts
    List,
    /// Show the transaction journal
    History,
}

pub struct Service<'w, W: 'w> {
    pub config: LedgerConfig,
    pub output: &'w mut W,
}

impl<'w, W> Service<'w, W>
where
    W: Write + 'w,
{
    pub fn run(self, command: Command) -> Result<()> {
        let mut ledger = Ledger::open(self.config);

        match command {
            Command::Open { owner, id, balance } => {
                let acc = ledger
                    .open_account(owner, id, balance)
                    .with_context(|| format!("Failed to open account {id}"))?;
                writeln!(self.output, "Opened {}", acc.details(true))?;
            }
            Command::Deposit { id, amount } => {
                let acc = ledger
                    .deposit(id, amount)
                    .with_context(|| format!("Failed to deposit {amount} to {id}"))?;
                writeln!(self.output, "{}", acc.details(true))?;
            }
            Command::Withdraw { id, amount } => {
                let acc = ledger
                    .withdraw(id, amount)
                    .with_context(|| format!("Failed to withdraw {amount} from {id}"))?;
                writeln!(self.output, "{}", acc.details(true))?;
            }
            Command::Transfer { from, to, amount } => {
                let receipt = ledger
                    .transfer(from, to, amount)
                    .with_context(|| format!("Failed to transfer {amount} from {from} to {to}"))?;
                writeln!(self.output, "Transferred {amount} from {from} to {to}")?;
                print_accounts(self.output, [&receipt.from, &receipt.to])?;
            }
            Command::List => {
                let accounts = ledger.accounts().context("Failed to load accounts")?;
                print_accounts(self.output, &accounts)?;
            }
            Command::History => {
                let transactions = ledger.transactions().context("Failed to load journal")?;
                print_transactions(self.output, &transactions)?;
            }
        }
        Ok(())
    }
}
