// 📒 Chart of Accounts - static reference data
//
// Each account carries a stable code, a display name (the join key used by
// journal lines and the ledger), a classification, and its normal side.

use crate::entry::Side;
use serde::{Deserialize, Serialize};

// ============================================================================
// ACCOUNT CLASS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountClass {
    Asset,
    Liability,
    Equity,
    Revenue,
    Expense,
}

impl AccountClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountClass::Asset => "Asset",
            AccountClass::Liability => "Liability",
            AccountClass::Equity => "Equity",
            AccountClass::Revenue => "Revenue",
            AccountClass::Expense => "Expense",
        }
    }

    /// Conventional side on which this class of account increases.
    pub fn normal_side(&self) -> Side {
        match self {
            AccountClass::Asset | AccountClass::Expense => Side::Debit,
            AccountClass::Liability | AccountClass::Equity | AccountClass::Revenue => {
                Side::Credit
            }
        }
    }
}

// ============================================================================
// ACCOUNT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub code: String,
    pub name: String,
    pub class: AccountClass,
    pub normal: Side,
}

impl Account {
    /// Account whose normal side follows its class.
    pub fn new(code: &str, name: &str, class: AccountClass) -> Self {
        Account {
            code: code.to_string(),
            name: name.to_string(),
            class,
            normal: class.normal_side(),
        }
    }

    /// "101 | Cash" style label used by the account pickers.
    pub fn label(&self) -> String {
        format!("{} | {}", self.code, self.name)
    }
}

// ============================================================================
// CHART
// ============================================================================

#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
}

impl ChartOfAccounts {
    pub fn new(accounts: Vec<Account>) -> Self {
        ChartOfAccounts { accounts }
    }

    /// The small-business chart every built-in exercise is written against.
    pub fn standard() -> Self {
        use AccountClass::*;

        ChartOfAccounts::new(vec![
            // Assets
            Account::new("101", "Cash", Asset),
            Account::new("112", "Accounts Receivable", Asset),
            Account::new("121", "Inventory", Asset),
            Account::new("141", "Prepaid Rent", Asset),
            // Liabilities
            Account::new("201", "Accounts Payable", Liability),
            Account::new("211", "Unearned Revenue", Liability),
            // Equity
            Account::new("301", "Capital", Equity),
            // Revenue
            Account::new("401", "Sales Revenue", Revenue),
            Account::new("411", "Service Revenue", Revenue),
            // Expenses
            Account::new("501", "Rent Expense", Expense),
            Account::new("511", "Salaries Expense", Expense),
            Account::new("521", "Purchases (Cost of Goods Sold)", Expense),
            Account::new("531", "Utilities Expense", Expense),
        ])
    }

    /// Accounts in chart definition order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.name == name)
    }

    pub fn find_by_code(&self, code: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.code == code)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self::standard()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_chart_codes_and_names_unique() {
        let chart = ChartOfAccounts::standard();

        let codes: HashSet<_> = chart.accounts().iter().map(|a| &a.code).collect();
        let names: HashSet<_> = chart.accounts().iter().map(|a| &a.name).collect();

        assert_eq!(codes.len(), chart.len());
        assert_eq!(names.len(), chart.len());
    }

    #[test]
    fn test_normal_side_follows_class() {
        let chart = ChartOfAccounts::standard();

        assert_eq!(chart.find_by_name("Cash").unwrap().normal, Side::Debit);
        assert_eq!(chart.find_by_name("Rent Expense").unwrap().normal, Side::Debit);
        assert_eq!(chart.find_by_name("Accounts Payable").unwrap().normal, Side::Credit);
        assert_eq!(chart.find_by_name("Capital").unwrap().normal, Side::Credit);
        assert_eq!(chart.find_by_name("Sales Revenue").unwrap().normal, Side::Credit);
    }

    #[test]
    fn test_lookup() {
        let chart = ChartOfAccounts::standard();

        assert_eq!(chart.find_by_code("121").unwrap().name, "Inventory");
        assert!(chart.contains("Prepaid Rent"));
        assert!(!chart.contains("prepaid rent"));
        assert!(!chart.contains(""));
    }

    #[test]
    fn test_chart_order_is_definition_order() {
        let chart = ChartOfAccounts::standard();
        let first: Vec<&str> = chart.accounts().iter().take(3).map(|a| a.code.as_str()).collect();
        assert_eq!(first, vec!["101", "112", "121"]);
        assert_eq!(chart.accounts()[0].label(), "101 | Cash");
    }
}
