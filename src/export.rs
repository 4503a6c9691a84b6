// 📤 CSV export of the trial balance and the general ledger view

use crate::trial_balance::{LedgerRow, TrialBalance};
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct TrialBalanceCsvRow<'a> {
    #[serde(rename = "Code")]
    code: &'a str,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Debit")]
    debit: u64,
    #[serde(rename = "Credit")]
    credit: u64,
}

#[derive(Serialize)]
struct LedgerCsvRow<'a> {
    #[serde(rename = "Code")]
    code: &'a str,
    #[serde(rename = "Account")]
    account: &'a str,
    #[serde(rename = "Debit_Total")]
    debit_total: u64,
    #[serde(rename = "Credit_Total")]
    credit_total: u64,
    #[serde(rename = "Balance")]
    balance: u64,
    #[serde(rename = "Side")]
    side: &'a str,
}

/// Rows followed by a TOTAL row.
pub fn write_trial_balance<W: Write>(writer: W, tb: &TrialBalance) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for row in &tb.rows {
        wtr.serialize(TrialBalanceCsvRow {
            code: &row.code,
            account: &row.account,
            debit: row.debit,
            credit: row.credit,
        })?;
    }
    wtr.serialize(TrialBalanceCsvRow {
        code: "",
        account: "TOTAL",
        debit: tb.total_debit,
        credit: tb.total_credit,
    })?;

    wtr.flush().context("Failed to flush trial balance CSV")?;
    Ok(())
}

pub fn write_ledger<W: Write>(writer: W, rows: &[LedgerRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for row in rows {
        wtr.serialize(LedgerCsvRow {
            code: &row.code,
            account: &row.account,
            debit_total: row.debit_total,
            credit_total: row.credit_total,
            balance: row.balance,
            side: row.side.code(),
        })?;
    }

    wtr.flush().context("Failed to flush ledger CSV")?;
    Ok(())
}

pub fn export_trial_balance(path: &Path, tb: &TrialBalance) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_trial_balance(file, tb)
}

pub fn export_ledger(path: &Path, rows: &[LedgerRow]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_ledger(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Entry, JournalLine};
    use crate::ledger::Ledger;
    use crate::trial_balance::{ledger_report, trial_balance};
    use crate::ChartOfAccounts;

    fn sample_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.post(&Entry::new(vec![
            JournalLine::debit("Cash", 50000),
            JournalLine::credit("Capital", 50000),
        ]));
        ledger
    }

    #[test]
    fn test_trial_balance_csv() {
        let tb = trial_balance(&sample_ledger(), &ChartOfAccounts::standard());
        let mut out = Vec::new();
        write_trial_balance(&mut out, &tb).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Code,Account,Debit,Credit");
        assert_eq!(lines[1], "101,Cash,50000,0");
        assert_eq!(lines[2], "301,Capital,0,50000");
        assert_eq!(lines[3], ",TOTAL,50000,50000");
    }

    #[test]
    fn test_ledger_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let rows = ledger_report(&sample_ledger(), &ChartOfAccounts::standard());

        export_ledger(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Code,Account,Debit_Total,Credit_Total,Balance,Side"));
        assert!(text.contains("101,Cash,50000,0,50000,D"));
    }
}
