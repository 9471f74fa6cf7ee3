use std::fs;

use flat_ledger::{
    account::AccountRecord,
    bin_utils::{Cli, Command, Service},
    config::LedgerConfig,
    ledger::{ErrorKind, Ledger},
    store::{LedgerStore, file_store::FileLedgerStore},
};
use clap::Parser;
use rust_decimal::Decimal;
use tempfile::TempDir;

const STARTING_ACCOUNTS: &str = "Alice|1001|1500.00\nBob|1002|800.00\n";

fn seeded_ledger() -> (TempDir, LedgerConfig) {
    let dir = TempDir::new().unwrap();
    let config = LedgerConfig::in_dir(dir.path());
    fs::write(&config.accounts_path, STARTING_ACCOUNTS).unwrap();
    (dir, config)
}

#[test]
fn transfer_rewrites_store_and_appends_journal() {
    let (_dir, config) = seeded_ledger();
    let mut ledger = Ledger::open(config.clone());

    ledger.transfer(1001, 1002, Decimal::new(20000, 2)).unwrap();

    assert_eq!(
        fs::read_to_string(&config.accounts_path).unwrap(),
        "Alice|1001|1300.00\nBob|1002|1000.00\n"
    );
    assert_eq!(
        fs::read_to_string(&config.journal_path).unwrap(),
        "1001|1002|200.00|transfer\n"
    );

    ledger.transfer(1002, 1001, Decimal::new(5, 1)).unwrap();
    let journal = fs::read_to_string(&config.journal_path).unwrap();
    assert_eq!(journal.lines().count(), 2);
    assert!(journal.starts_with("1001|1002|200.00|transfer\n"));
    let total: Decimal = ledger
        .accounts()
        .unwrap()
        .iter()
        .map(AccountRecord::balance)
        .sum();
    assert_eq!(total, Decimal::new(230000, 2));
}

#[test]
fn failed_transfers_leave_store_byte_identical() {
    let (_dir, config) = seeded_ledger();
    let mut ledger = Ledger::open(config.clone());

    let err = ledger.transfer(1001, 9999, Decimal::new(5000, 2)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccountNotFound);
    let err = ledger.transfer(1002, 1001, Decimal::new(90000, 2)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientFunds);
    let err = ledger.transfer(1001, 1002, Decimal::ZERO).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);

    assert_eq!(fs::read(&config.accounts_path).unwrap(), STARTING_ACCOUNTS.as_bytes());
    assert!(!config.journal_path.exists());
}

#[test]
fn load_skips_line_without_delimiters() {
    let dir = TempDir::new().unwrap();
    let config = LedgerConfig::in_dir(dir.path());
    fs::write(&config.accounts_path, "Alice|1001|1500.00\nBob 1002 800.00\n").unwrap();

    let accounts = FileLedgerStore::new(config).load_all().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].owner(), "Alice");
}

#[test]
fn transfer_against_missing_store_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let config = LedgerConfig::in_dir(dir.path());
    let mut ledger = Ledger::open(config.clone());
    let err = ledger.transfer(1, 2, Decimal::ONE).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccountNotFound);
    assert!(!config.accounts_path.exists());
}

#[test]
fn cli_service_session() {
    let dir = TempDir::new().unwrap();
    let config = LedgerConfig::in_dir(dir.path());
    let run = |command: Command| {
        let mut output = Vec::new();
        let result = Service {
            config: config.clone(),
            output: &mut output,
        }
        .run(command);
        result.map(|()| String::from_utf8(output).unwrap())
    };

    run(Command::Open {
        owner: "Alice".to_owned(),
        id: 1001,
        balance: Decimal::new(150000, 2),
    })
    .unwrap();
    run(Command::Open {
        owner: "Bob".to_owned(),
        id: 1002,
        balance: Decimal::new(80000, 2),
    })
    .unwrap();
    run(Command::Deposit {
        id: 1002,
        amount: Decimal::new(100, 0),
    })
    .unwrap();

    let out = run(Command::Transfer {
        from: 1001,
        to: 1002,
        amount: Decimal::new(20000, 2),
    })
    .unwrap();
    assert_eq!(
        out,
        "Transferred 200.00 from 1001 to 1002\n\
         Acc#: 1001 | Name: Alice | Balance: 1300.00\n\
         Acc#: 1002 | Name: Bob | Balance: 1100.00\n"
    );

    let out = run(Command::List).unwrap();
    assert_eq!(out.lines().count(), 2);

    let out = run(Command::History).unwrap();
    assert_eq!(out, "1001 -> 1002 | 200.00 | transfer\n");

    let err = run(Command::Withdraw {
        id: 1001,
        amount: Decimal::new(5000, 0),
    })
    .unwrap_err();
    assert!(err.to_string().contains("Failed to withdraw 5000 from 1001"));
}

#[test]
fn cli_negative_amount_reaches_ledger_validation() {
    let (dir, _) = seeded_ledger();
    let accounts = dir.path().join("accounts.txt");
    let journal = dir.path().join("transactions.txt");
    let cli = Cli::try_parse_from([
        "flat-ledger",
        "--accounts",
        accounts.to_str().unwrap(),
        "--journal",
        journal.to_str().unwrap(),
        "withdraw",
        "1001",
        "-5",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Command::Withdraw { id: 1001, amount } if amount == Decimal::from(-5)
    ));

    let mut output = Vec::new();
    let err = Service {
        config: cli.config(),
        output: &mut output,
    }
    .run(cli.command)
    .unwrap_err();
    let ledger_err = err
        .downcast_ref::<flat_ledger::ledger::LedgerError>()
        .unwrap();
    assert_eq!(ledger_err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(fs::read(&accounts).unwrap(), STARTING_ACCOUNTS.as_bytes());

    let cli = Cli::try_parse_from(["flat-ledger", "transfer", "1001", "1002", "-1.50"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Transfer { amount, .. } if amount == Decimal::new(-150, 2)
    ));
}
