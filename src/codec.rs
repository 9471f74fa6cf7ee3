use std::str::FromStr;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    account::{AccountError, AccountId, AccountRecord, FIELD_DELIMITER},
    transaction::TransactionRecord,
};

const ACCOUNT_FIELDS: usize = 3;
const TRANSACTION_FIELDS: usize = 4;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Line is empty")]
    Empty,
    #[error("Expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("Malformed field: {0}")]
    Field(#[from] csv::Error),
    #[error("Invalid amount `{value}`: {source}")]
    Amount {
        value: String,
        source: rust_decimal::Error,
    },
    #[error(transparent)]
    Invalid(#[from] AccountError),
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AccountRow {
    owner: String,
    id: AccountId,
    balance: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TransactionRow {
    from_id: AccountId,
    to_id: AccountId,
    amount: String,
    note: String,
}

impl From<&AccountRecord> for AccountRow {
    fn from(record: &AccountRecord) -> Self {
        Self {
            owner: record.owner().to_owned(),
            id: record.id(),
            balance: record.balance().to_string(),
        }
    }
}

impl From<&TransactionRecord> for TransactionRow {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            from_id: record.from_id(),
            to_id: record.to_id(),
            amount: record.amount().to_string(),
            note: record.note().to_owned(),
        }
    }
}

/// Pipe separated, header-less, never quoted. Row length is checked per record, so a
/// short line does not poison the rest of the file.
pub(crate) fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .has_headers(false)
        .delimiter(FIELD_DELIMITER as u8)
        .quoting(false)
        .flexible(true);
    builder
}

pub(crate) fn writer_builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder
        .has_headers(false)
        .delimiter(FIELD_DELIMITER as u8)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'));
    builder
}

pub(crate) fn decode_account_record(record: &StringRecord) -> Result<AccountRecord, RecordError> {
    check_field_count(record, ACCOUNT_FIELDS)?;
    let row: AccountRow = record.deserialize(None)?;
    let balance = parse_amount(&row.balance)?;
    Ok(AccountRecord::new(row.owner, row.id, balance)?)
}

pub(crate) fn decode_transaction_record(
    record: &StringRecord,
) -> Result<TransactionRecord, RecordError> {
    check_field_count(record, TRANSACTION_FIELDS)?;
    let row: TransactionRow = record.deserialize(None)?;
    let amount = parse_amount(&row.amount)?;
    Ok(TransactionRecord::new(row.from_id, row.to_id, amount, row.note)?)
}

pub(crate) fn decode_account(line: &str) -> Result<AccountRecord, RecordError> {
    decode_account_record(&single_record(line)?)
}

pub(crate) fn decode_transaction(line: &str) -> Result<TransactionRecord, RecordError> {
    decode_transaction_record(&single_record(line)?)
}

pub(crate) fn encode_account(record: &AccountRecord) -> String {
    let row = AccountRow::from(record);
    join_fields(&[&row.owner, &row.id.to_string(), &row.balance])
}

pub(crate) fn encode_transaction(record: &TransactionRecord) -> String {
    let row = TransactionRow::from(record);
    join_fields(&[
        &row.from_id.to_string(),
        &row.to_id.to_string(),
        &row.amount,
        &row.note,
    ])
}

fn join_fields(fields: &[&str]) -> String {
    fields.join(&FIELD_DELIMITER.to_string())
}

fn single_record(line: &str) -> Result<StringRecord, RecordError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.contains(['\n', '\r']) {
        return Err(RecordError::Invalid(AccountError::InvalidArgument(
            "a record must fit on a single line".to_owned(),
        )));
    }
    let mut reader = reader_builder().from_reader(line.as_bytes());
    let mut record = StringRecord::new();
    if reader.read_record(&mut record)? {
        Ok(record)
    } else {
        Err(RecordError::Empty)
    }
}

fn check_field_count(record: &StringRecord, expected: usize) -> Result<(), RecordError> {
    if record.len() != expected {
        return Err(RecordError::FieldCount {
            expected,
            found: record.len(),
        });
    }
    Ok(())
}

fn parse_amount(value: &str) -> Result<Decimal, RecordError> {
    Decimal::from_str(value).map_err(|source| RecordError::Amount {
        value: value.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::{FromPrimitive, Zero};

    use super::*;

    #[test]
    fn account_line_round_trip() {
        let records = [
            AccountRecord::new("Alice", 1001, Decimal::new(150000, 2)).unwrap(),
            AccountRecord::new("Bob Builder", -3, Decimal::zero()).unwrap(),
            AccountRecord::new("", 0, Decimal::new(123456789, 6)).unwrap(),
            AccountRecord::new("Zoë", i32::MAX, Decimal::from_u32(7).unwrap()).unwrap(),
        ];
        for record in records {
            let line = record.serialize();
            let decoded = AccountRecord::deserialize(&line).unwrap();
            assert_eq!(decoded, record);
            assert_eq!(decoded.balance().to_string(), record.balance().to_string());
        }
    }

    #[test]
    fn account_line_format() {
        let record = AccountRecord::new("Alice", 1001, Decimal::new(150000, 2)).unwrap();
        assert_eq!(record.serialize(), "Alice|1001|1500.00");
        let decoded = AccountRecord::deserialize("Bob|1002|800.00\n").unwrap();
        assert_eq!(decoded.owner(), "Bob");
        assert_eq!(decoded.id(), 1002);
        assert_eq!(decoded.balance(), Decimal::new(80000, 2));
    }

    #[test]
    fn malformed_account_lines() {
        assert!(matches!(
            AccountRecord::deserialize("Alice 1001 1500.00"),
            Err(RecordError::FieldCount {
                expected: 3,
                found: 1
            })
        ));
        assert!(matches!(
            AccountRecord::deserialize("Alice|1001|1500.00|extra"),
            Err(RecordError::FieldCount { found: 4, .. })
        ));
        assert!(matches!(
            AccountRecord::deserialize("Alice|abc|1500.00"),
            Err(RecordError::Field(_))
        ));
        assert!(matches!(
            AccountRecord::deserialize("Alice|1001|lots"),
            Err(RecordError::Amount { .. })
        ));
        assert!(matches!(
            AccountRecord::deserialize("Alice|1001|-1.00"),
            Err(RecordError::Invalid(AccountError::InvalidArgument(_)))
        ));
        assert!(matches!(AccountRecord::deserialize(""), Err(RecordError::Empty)));
        assert!(AccountRecord::deserialize("Alice|1|1\nBob|2|2").is_err());
    }

    #[test]
    fn transaction_line_format() {
        let tx = TransactionRecord::transfer(1001, 1002, Decimal::new(20000, 2)).unwrap();
        assert_eq!(tx.serialize(), "1001|1002|200.00|transfer");
        assert_eq!(TransactionRecord::deserialize(&tx.serialize()).unwrap(), tx);
        assert!(TransactionRecord::deserialize("1001|1002|200.00").is_err());
    }

    #[test]
    fn csv_writer_matches_line_encoding() {
        let record = AccountRecord::new("Alice", 1001, Decimal::new(150000, 2)).unwrap();
        let mut writer = writer_builder().from_writer(Vec::new());
        writer.serialize(AccountRow::from(&record)).unwrap();
        let bytes = writer.into_inner().ok().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), format!("{}\n", record.serialize()));
    }
}
