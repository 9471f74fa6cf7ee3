use std::io::Write;

use crate::{
    account::{AccountRecord, Displayable},
    transaction::TransactionRecord,
};

pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl IntoIterator<Item = &'a AccountRecord>,
) -> anyhow::Result<()>
where
    W: Write,
{
    for acc in accounts {
        if let Err(err) = writeln!(output, "{}", acc.details(true)) {
            anyhow::bail!("Failed to print account {}: {err}", acc.id())
        }
    }
    output.flush()?;
    Ok(())
}

pub fn print_transactions<'a, W>(
    output: &mut W,
    transactions: impl IntoIterator<Item = &'a TransactionRecord>,
) -> anyhow::Result<()>
where
    W: Write,
{
    for tx in transactions {
        writeln!(
            output,
            "{} -> {} | {} | {}",
            tx.from_id(),
            tx.to_id(),
            tx.amount(),
            tx.note()
        )?;
    }
    output.flush()?;
    Ok(())
}
