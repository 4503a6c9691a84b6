// 📗 Ledger - cumulative debit/credit totals per account
//
// Append-only. Posting never decreases a total and there is no reversal;
// corrections are made with an offsetting entry.

use crate::entry::{Entry, Side};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTotals {
    pub debit: u64,
    pub credit: u64,
}

impl AccountTotals {
    pub fn get(&self, side: Side) -> u64 {
        match side {
            Side::Debit => self.debit,
            Side::Credit => self.credit,
        }
    }

    pub fn has_activity(&self) -> bool {
        self.debit != 0 || self.credit != 0
    }

    fn add(&mut self, side: Side, amount: u64) {
        match side {
            Side::Debit => self.debit = self.debit.saturating_add(amount),
            Side::Credit => self.credit = self.credit.saturating_add(amount),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    accounts: BTreeMap<String, AccountTotals>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            accounts: BTreeMap::new(),
        }
    }

    /// Fold every line of `entry` into its account's running totals.
    ///
    /// The caller is responsible for only posting entries that passed
    /// grading; the ledger does not re-check balance.
    pub fn post(&mut self, entry: &Entry) {
        for line in entry.lines() {
            self.accounts
                .entry(line.account.clone())
                .or_default()
                .add(line.side, line.amount);
        }
    }

    /// Zeros for an account that was never posted to.
    pub fn balances_for(&self, account: &str) -> AccountTotals {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    pub fn accounts(&self) -> impl Iterator<Item = (&str, &AccountTotals)> {
        self.accounts.iter().map(|(name, totals)| (name.as_str(), totals))
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.values().all(|t| !t.has_activity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::JournalLine;

    #[test]
    fn test_post_accumulates_per_side() {
        let mut ledger = Ledger::new();
        ledger.post(&Entry::new(vec![
            JournalLine::debit("Cash", 50000),
            JournalLine::credit("Capital", 50000),
        ]));
        ledger.post(&Entry::new(vec![
            JournalLine::debit("Prepaid Rent", 20000),
            JournalLine::credit("Cash", 20000),
        ]));

        assert_eq!(
            ledger.balances_for("Cash"),
            AccountTotals {
                debit: 50000,
                credit: 20000
            }
        );
        assert_eq!(ledger.balances_for("Capital").get(Side::Credit), 50000);
        assert_eq!(ledger.accounts().count(), 3);
    }

    #[test]
    fn test_unknown_account_reads_zero() {
        let ledger = Ledger::new();
        assert_eq!(ledger.balances_for("Inventory"), AccountTotals::default());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_same_account_twice_in_one_entry() {
        let mut ledger = Ledger::new();
        ledger.post(&Entry::new(vec![
            JournalLine::debit("Cash", 100),
            JournalLine::debit("Cash", 100),
            JournalLine::credit("Capital", 200),
        ]));
        assert_eq!(ledger.balances_for("Cash").debit, 200);
        assert!(!ledger.is_empty());
    }

    #[test]
    fn test_totals_saturate_instead_of_wrapping() {
        let mut ledger = Ledger::new();
        let big = Entry::new(vec![
            JournalLine::debit("Cash", u64::MAX),
            JournalLine::credit("Capital", u64::MAX),
        ]);
        ledger.post(&big);
        ledger.post(&big);

        assert_eq!(ledger.balances_for("Cash").debit, u64::MAX);
        assert_eq!(ledger.balances_for("Capital").credit, u64::MAX);
    }

    #[test]
    fn test_serializes_as_map() {
        let mut ledger = Ledger::new();
        ledger.post(&Entry::new(vec![JournalLine::debit("Cash", 5)]));
        let json = serde_json::to_string(&ledger).unwrap();
        assert_eq!(json, r#"{"Cash":{"debit":5,"credit":0}}"#);

        let back: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
