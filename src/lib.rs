/// Account record: balance rules and the `Displayable` capability.
pub mod account;

/// Pipe delimited line format shared by the account file and the journal.
pub mod codec;

/// Validated requests that the [`ledger`] executes.
pub mod command;

/// Where the ledger files live.
pub mod config;

/// Transfers and balance updates on top of a [`store::LedgerStore`].
pub mod ledger;

/// Persistence interface, plus file backed and "in memory" implementations.
pub mod store;

/// Journal entries written by transfers.
pub mod transaction;

/// CLI front end. Kept in the library so integration tests can run it directly.
pub mod bin_utils;
