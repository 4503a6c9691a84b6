// ⚖️ Trial Balance - ending balances with polarity, global balance check
//
// For a normal-debit account:  raw = debit_total - credit_total
// For a normal-credit account: raw = credit_total - debit_total
//
// raw >= 0 reports on the normal side (zero ties included); a negative raw
// is an abnormal balance and reports |raw| on the opposite side.

use crate::chart::{Account, ChartOfAccounts};
use crate::entry::Side;
use crate::ledger::Ledger;
use serde::{Deserialize, Serialize};

// ============================================================================
// ENDING BALANCE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingBalance {
    pub debit_total: u64,
    pub credit_total: u64,
    pub side: Side,
    pub amount: u64,
}

impl EndingBalance {
    /// True when the balance sits opposite the account's normal side.
    pub fn is_abnormal(&self, account: &Account) -> bool {
        self.amount != 0 && self.side != account.normal
    }
}

pub fn ending_balance(ledger: &Ledger, account: &Account) -> EndingBalance {
    let totals = ledger.balances_for(&account.name);
    let debit = totals.debit as i128;
    let credit = totals.credit as i128;

    let raw = match account.normal {
        Side::Debit => debit - credit,
        Side::Credit => credit - debit,
    };

    let side = if raw >= 0 {
        account.normal
    } else {
        account.normal.opposite()
    };

    EndingBalance {
        debit_total: totals.debit,
        credit_total: totals.credit,
        side,
        amount: raw.unsigned_abs() as u64,
    }
}

// ============================================================================
// TRIAL BALANCE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub code: String,
    pub account: String,
    pub debit: u64,
    pub credit: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: u64,
    pub total_credit: u64,
    pub is_balanced: bool,
}

impl TrialBalance {
    pub fn difference(&self) -> u64 {
        self.total_debit.abs_diff(self.total_credit)
    }

    pub fn summary(&self) -> String {
        if self.rows.is_empty() {
            "No entries posted yet.".to_string()
        } else if self.is_balanced {
            format!("Trial balance is balanced: debit and credit both {}", self.total_debit)
        } else {
            format!(
                "Trial balance is OUT of balance: debit {}, credit {}, difference {}",
                self.total_debit,
                self.total_credit,
                self.difference()
            )
        }
    }
}

/// Every chart account with lifetime activity, in chart order.
pub fn trial_balance(ledger: &Ledger, chart: &ChartOfAccounts) -> TrialBalance {
    let mut rows = Vec::new();
    let mut total_debit = 0u64;
    let mut total_credit = 0u64;

    for account in chart.accounts() {
        if !ledger.balances_for(&account.name).has_activity() {
            continue;
        }

        let eb = ending_balance(ledger, account);
        let (debit, credit) = match eb.side {
            Side::Debit => (eb.amount, 0),
            Side::Credit => (0, eb.amount),
        };
        total_debit = total_debit.saturating_add(debit);
        total_credit = total_credit.saturating_add(credit);

        rows.push(TrialBalanceRow {
            code: account.code.clone(),
            account: account.name.clone(),
            debit,
            credit,
        });
    }

    TrialBalance {
        rows,
        total_debit,
        total_credit,
        is_balanced: total_debit == total_credit,
    }
}

// ============================================================================
// GENERAL LEDGER VIEW
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub code: String,
    pub account: String,
    pub debit_total: u64,
    pub credit_total: u64,
    pub balance: u64,
    pub side: Side,
}

/// Per-account totals and ending balance for active accounts, chart order.
pub fn ledger_report(ledger: &Ledger, chart: &ChartOfAccounts) -> Vec<LedgerRow> {
    chart
        .accounts()
        .iter()
        .filter(|a| ledger.balances_for(&a.name).has_activity())
        .map(|a| {
            let eb = ending_balance(ledger, a);
            LedgerRow {
                code: a.code.clone(),
                account: a.name.clone(),
                debit_total: eb.debit_total,
                credit_total: eb.credit_total,
                balance: eb.amount,
                side: eb.side,
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
