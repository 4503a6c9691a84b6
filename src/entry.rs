// ✍️ Journal entries - lines, sides, and the normalized comparison key

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// SIDE (polarity)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Debit,
    Credit,
}

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Side::Debit => Side::Credit,
            Side::Credit => Side::Debit,
        }
    }

    /// Short code, "D" or "C".
    pub fn code(&self) -> &'static str {
        match self {
            Side::Debit => "D",
            Side::Credit => "C",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Debit => "Debit",
            Side::Credit => "Credit",
        }
    }

    /// Accepts "D"/"C" as well as the full words, any case.
    pub fn parse(s: &str) -> Option<Side> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "dr" | "debit" => Some(Side::Debit),
            "c" | "cr" | "credit" => Some(Side::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// JOURNAL LINE
// ============================================================================

/// Largest amount a single line may carry. Well inside the range where
/// `f64` input converts exactly, and small enough that sums of realistic
/// entries stay far from `u64::MAX`.
pub const MAX_AMOUNT: u64 = 999_999_999_999;

/// One side of an entry. Amount is in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account: String,
    pub side: Side,
    pub amount: u64,
}

impl JournalLine {
    pub fn new(account: &str, side: Side, amount: u64) -> Self {
        JournalLine {
            account: account.to_string(),
            side,
            amount,
        }
    }

    pub fn debit(account: &str, amount: u64) -> Self {
        Self::new(account, Side::Debit, amount)
    }

    pub fn credit(account: &str, amount: u64) -> Self {
        Self::new(account, Side::Credit, amount)
    }

    /// Non-zero and within `MAX_AMOUNT`.
    pub fn has_valid_amount(&self) -> bool {
        self.amount >= 1 && self.amount <= MAX_AMOUNT
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            account: self.account.clone(),
            side: self.side,
            amount: self.amount,
        }
    }
}

/// Structured `(account, side, amount)` tuple with a lexicographic total
/// order. Two entries are equivalent iff their sorted keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LineKey {
    pub account: String,
    pub side: Side,
    pub amount: u64,
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.account, self.side.code(), self.amount)
    }
}

// ============================================================================
// ENTRY
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry {
    lines: Vec<JournalLine>,
}

impl Entry {
    pub fn new(lines: Vec<JournalLine>) -> Self {
        Entry { lines }
    }

    pub fn lines(&self) -> &[JournalLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn push(&mut self, line: JournalLine) {
        self.lines.push(line);
    }

    /// Removes the line at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<JournalLine> {
        if index < self.lines.len() {
            Some(self.lines.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Saturates instead of wrapping on absurd input.
    pub fn total(&self, side: Side) -> u64 {
        self.lines
            .iter()
            .filter(|l| l.side == side)
            .fold(0u64, |acc, l| acc.saturating_add(l.amount))
    }

    pub fn total_debit(&self) -> u64 {
        self.total(Side::Debit)
    }

    pub fn total_credit(&self) -> u64 {
        self.total(Side::Credit)
    }

    /// Debit and credit sums agree. An empty entry balances at 0/0.
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }

    /// Non-empty and balanced.
    pub fn is_valid(&self) -> bool {
        !self.is_empty() && self.is_balanced()
    }

    /// Sorted comparison keys; multiplicity is preserved.
    pub fn normalized(&self) -> Vec<LineKey> {
        let mut keys: Vec<LineKey> = self.lines.iter().map(JournalLine::key).collect();
        keys.sort();
        keys
    }

    /// Line-order independent equality.
    pub fn equivalent(&self, other: &Entry) -> bool {
        self.normalized() == other.normalized()
    }
}

impl From<Vec<JournalLine>> for Entry {
    fn from(lines: Vec<JournalLine>) -> Self {
        Entry::new(lines)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_and_balance() {
        let entry = Entry::new(vec![
            JournalLine::debit("Cash", 3000),
            JournalLine::debit("Accounts Receivable", 2000),
            JournalLine::credit("Sales Revenue", 5000),
        ]);

        assert_eq!(entry.total_debit(), 5000);
        assert_eq!(entry.total_credit(), 5000);
        assert!(entry.is_balanced());
        assert!(entry.is_valid());
    }

    #[test]
    fn test_empty_entry_balanced_but_not_valid() {
        let entry = Entry::default();
        assert!(entry.is_balanced());
        assert!(!entry.is_valid());
    }

    #[test]
    fn test_equivalent_ignores_order() {
        let a = Entry::new(vec![
            JournalLine::debit("Cash", 50000),
            JournalLine::credit("Capital", 50000),
        ]);
        let b = Entry::new(vec![
            JournalLine::credit("Capital", 50000),
            JournalLine::debit("Cash", 50000),
        ]);
        assert!(a.equivalent(&b));
    }

    #[test]
    fn test_multiplicity_matters() {
        let doubled = Entry::new(vec![
            JournalLine::debit("Cash", 100),
            JournalLine::debit("Cash", 100),
            JournalLine::credit("Capital", 200),
        ]);
        let single = Entry::new(vec![
            JournalLine::debit("Cash", 200),
            JournalLine::credit("Capital", 200),
        ]);
        assert!(!doubled.equivalent(&single));
        assert!(doubled.equivalent(&doubled.clone()));
    }

    #[test]
    fn test_separator_in_account_name_does_not_collide() {
        // "A|D" + Credit must never equal "A" + Debit + something.
        let a = Entry::new(vec![JournalLine::credit("A|D", 5)]);
        let b = Entry::new(vec![JournalLine::debit("A", 5)]);
        assert!(!a.equivalent(&b));
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut entry = Entry::new(vec![JournalLine::debit("Cash", 1)]);
        assert!(entry.remove(5).is_none());
        assert_eq!(entry.len(), 1);
        assert_eq!(entry.remove(0), Some(JournalLine::debit("Cash", 1)));
        assert!(entry.is_empty());
    }

    #[test]
    fn test_side_parse_and_display() {
        assert_eq!(Side::parse("D"), Some(Side::Debit));
        assert_eq!(Side::parse(" credit "), Some(Side::Credit));
        assert_eq!(Side::parse("x"), None);
        assert_eq!(Side::Debit.opposite(), Side::Credit);
        assert_eq!(JournalLine::debit("Cash", 10).key().to_string(), "Cash | D | 10");
    }

    #[test]
    fn test_totals_saturate_on_huge_lines() {
        let entry = Entry::new(vec![
            JournalLine::debit("Cash", u64::MAX),
            JournalLine::debit("Cash", u64::MAX),
            JournalLine::credit("Capital", 1),
        ]);
        assert_eq!(entry.total_debit(), u64::MAX);
        assert!(!entry.is_balanced());
    }

    #[test]
    fn test_line_amount_bounds() {
        assert!(JournalLine::debit("Cash", 1).has_valid_amount());
        assert!(JournalLine::debit("Cash", MAX_AMOUNT).has_valid_amount());
        assert!(!JournalLine::debit("Cash", 0).has_valid_amount());
        assert!(!JournalLine::debit("Cash", MAX_AMOUNT + 1).has_valid_amount());
    }

    #[test]
    fn test_entry_serializes_as_plain_list() {
        let entry = Entry::new(vec![JournalLine::debit("Cash", 10)]);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"[{"account":"Cash","side":"Debit","amount":10}]"#);
    }
}
