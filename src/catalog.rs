// 📚 Exercise Catalog - ordered exercises with canonical answers
//
// Canonical answers are validated once, when the catalog is built. The
// grading engine trusts them afterwards.

use crate::chart::ChartOfAccounts;
use crate::entry::{Entry, JournalLine};
use crate::error::CatalogError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// ============================================================================
// EXERCISE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Daily,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Daily => "Daily",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub title: String,
    /// Business the voucher belongs to. Drives "next exercise" after posting.
    pub shop: String,
    pub difficulty: Difficulty,
    pub points: u32,
    pub voucher: String,
    pub objective: String,
    #[serde(default)]
    pub hints: Vec<String>,
    pub answer: Entry,
}

impl Exercise {
    /// Checks the canonical answer against the chart.
    pub fn validate(&self, chart: &ChartOfAccounts) -> Result<(), CatalogError> {
        if self.answer.is_empty() {
            return Err(CatalogError::EmptyAnswer(self.id.clone()));
        }

        for line in self.answer.lines() {
            if !line.has_valid_amount() {
                return Err(CatalogError::InvalidAmount(self.id.clone()));
            }
            if !chart.contains(&line.account) {
                return Err(CatalogError::UnknownAccount {
                    id: self.id.clone(),
                    account: line.account.clone(),
                });
            }
        }

        if !self.answer.is_balanced() {
            return Err(CatalogError::UnbalancedAnswer {
                id: self.id.clone(),
                total_debit: self.answer.total_debit(),
                total_credit: self.answer.total_credit(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// CATALOG
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and malformed answers.
    pub fn new(chart: &ChartOfAccounts, exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for ex in &exercises {
            if !seen.insert(ex.id.as_str()) {
                return Err(CatalogError::DuplicateId(ex.id.clone()));
            }
            ex.validate(chart)?;
        }

        Ok(Catalog { exercises })
    }

    /// The four starter exercises.
    pub fn builtin(chart: &ChartOfAccounts) -> Self {
        let exercises = builtin_exercises();
        debug_assert!(
            exercises.iter().all(|ex| ex.validate(chart).is_ok()),
            "built-in exercise failed validation"
        );
        Catalog { exercises }
    }

    /// Parse a JSON array of exercises.
    pub fn from_json(chart: &ChartOfAccounts, json: &str) -> Result<Self, CatalogError> {
        let exercises: Vec<Exercise> = serde_json::from_str(json)?;
        Self::new(chart, exercises)
    }

    /// Catalog from a JSON file, or the built-in one when `path` is None.
    pub fn load(chart: &ChartOfAccounts, path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog {}", path.display()))?;
                Self::from_json(chart, &json)
                    .with_context(|| format!("Invalid catalog {}", path.display()))
            }
            None => Ok(Self::builtin(chart)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    pub fn as_slice(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|ex| ex.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.exercises.iter().position(|ex| ex.id == id)
    }

    /// Next exercise after `id`: the next one from the same shop if any,
    /// otherwise simply the next in catalog order.
    pub fn next_after(&self, id: &str) -> Option<&Exercise> {
        let idx = self.position(id)?;
        let shop = &self.exercises[idx].shop;
        let rest = &self.exercises[idx + 1..];

        rest.iter().find(|ex| &ex.shop == shop).or_else(|| rest.first())
    }

    /// Insert at the front. Generated exercises are validated by the
    /// caller; an id collision replaces nothing and returns false.
    pub fn push_front(&mut self, exercise: Exercise) -> bool {
        if self.get(&exercise.id).is_some() {
            return false;
        }
        self.exercises.insert(0, exercise);
        true
    }

    /// Append exercises whose ids are not present yet. Returns how many
    /// were added.
    pub fn extend_missing(&mut self, exercises: Vec<Exercise>) -> usize {
        let mut added = 0;
        for ex in exercises {
            if self.get(&ex.id).is_none() {
                self.exercises.push(ex);
                added += 1;
            }
        }
        added
    }
}

fn exercise(
    id: &str,
    title: &str,
    points: u32,
    voucher: &str,
    objective: &str,
    answer: Vec<JournalLine>,
    hints: &[&str],
) -> Exercise {
    Exercise {
        id: id.to_string(),
        title: title.to_string(),
        shop: crate::generator::TEA_STAND.to_string(),
        difficulty: Difficulty::Beginner,
        points,
        voucher: voucher.to_string(),
        objective: objective.to_string(),
        hints: hints.iter().map(|h| h.to_string()).collect(),
        answer: Entry::new(answer),
    }
}

fn builtin_exercises() -> Vec<Exercise> {
    let mut workshop_rent = exercise(
        "Q4",
        "Workshop: prepaid rent",
        50,
        "[Voucher] Rent receipt\nPaid 20,000 in cash for the next 2 months of rent (10,000 per month).",
        "Record the payment as an asset, not an expense. What is a prepayment?",
        vec![
            JournalLine::debit("Prepaid Rent", 20000),
            JournalLine::credit("Cash", 20000),
        ],
        &[
            "Paying now for future periods is recorded as a prepayment (an asset).",
            "Cash flowing out is usually a credit to Cash.",
        ],
    );
    workshop_rent.shop = crate::generator::WORKSHOP.to_string();

    vec![
        exercise(
            "Q1",
            "Tea stand: owner invests capital",
            35,
            "[Voucher] Bank deposit slip\nThe owner invests 50,000 in cash to open the shop.",
            "Record the capital investment. Does an asset increase? Does equity increase?",
            vec![
                JournalLine::debit("Cash", 50000),
                JournalLine::credit("Capital", 50000),
            ],
            &[
                "More cash usually means a debit to Cash.",
                "Invested capital is an increase in equity, which sits on the credit side.",
            ],
        ),
        exercise(
            "Q2",
            "Tea stand: cash sales",
            40,
            "[Voucher] Daily register report\nToday's cash sales of drinks total 3,200.",
            "Record the cash sale. Which side does revenue go on?",
            vec![
                JournalLine::debit("Cash", 3200),
                JournalLine::credit("Sales Revenue", 3200),
            ],
            &[
                "Cash coming in is usually a debit to Cash.",
                "Revenue increases are recorded on the credit side.",
            ],
        ),
        exercise(
            "Q3",
            "Tea stand: ingredients on credit",
            45,
            "[Voucher] Purchase invoice (unpaid)\nBought 8,000 of ingredients on credit, payment due next month.",
            "Record the credit purchase. Does inventory increase? Does a liability increase?",
            vec![
                JournalLine::debit("Inventory", 8000),
                JournalLine::credit("Accounts Payable", 8000),
            ],
            &[
                "Bought but not paid: an asset (inventory) and a liability (payable) both go up.",
                "Liability increases are usually credits.",
            ],
        ),
        workshop_rent,
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> ChartOfAccounts {
        ChartOfAccounts::standard()
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let chart = chart();
        let catalog = Catalog::builtin(&chart);

        assert_eq!(catalog.len(), 4);
        for ex in catalog.iter() {
            assert!(ex.validate(&chart).is_ok(), "{} should validate", ex.id);
        }
        assert!(Catalog::new(&chart, catalog.as_slice().to_vec()).is_ok());
    }

    #[test]
    fn test_rejects_unbalanced_answer() {
        let chart = chart();
        let mut ex = Catalog::builtin(&chart).get("Q1").unwrap().clone();
        ex.answer = Entry::new(vec![
            JournalLine::debit("Cash", 100),
            JournalLine::credit("Capital", 90),
        ]);

        let err = Catalog::new(&chart, vec![ex]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnbalancedAnswer {
                total_debit: 100,
                total_credit: 90,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_empty_unknown_and_duplicate() {
        let chart = chart();
        let base = Catalog::builtin(&chart).get("Q2").unwrap().clone();

        let mut empty = base.clone();
        empty.answer = Entry::default();
        assert!(matches!(
            Catalog::new(&chart, vec![empty]),
            Err(CatalogError::EmptyAnswer(_))
        ));

        let mut unknown = base.clone();
        unknown.answer = Entry::new(vec![
            JournalLine::debit("Petty Cash", 5),
            JournalLine::credit("Capital", 5),
        ]);
        assert!(matches!(
            Catalog::new(&chart, vec![unknown]),
            Err(CatalogError::UnknownAccount { .. })
        ));

        assert!(matches!(
            Catalog::new(&chart, vec![base.clone(), base]),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_amounts() {
        let chart = chart();
        let base = Catalog::builtin(&chart).get("Q1").unwrap().clone();

        let mut huge = base.clone();
        huge.answer = Entry::new(vec![
            JournalLine::debit("Cash", u64::MAX),
            JournalLine::debit("Cash", u64::MAX),
            JournalLine::credit("Capital", 1),
        ]);
        assert!(matches!(huge.validate(&chart), Err(CatalogError::InvalidAmount(_))));

        let mut zero = base;
        zero.answer = Entry::new(vec![
            JournalLine::debit("Cash", 0),
            JournalLine::credit("Capital", 0),
        ]);
        assert!(matches!(zero.validate(&chart), Err(CatalogError::InvalidAmount(_))));
    }

    #[test]
    fn test_from_json() {
        let chart = chart();
        let json = r#"[{
            "id": "X1",
            "title": "Cash sale",
            "shop": "Corner Shop",
            "difficulty": "Beginner",
            "points": 10,
            "voucher": "Sold goods for 100 cash.",
            "objective": "Record it.",
            "answer": [
                {"account": "Cash", "side": "Debit", "amount": 100},
                {"account": "Sales Revenue", "side": "Credit", "amount": 100}
            ]
        }]"#;

        let catalog = Catalog::from_json(&chart, json).unwrap();
        let ex = catalog.get("X1").unwrap();
        assert!(ex.hints.is_empty());
        assert_eq!(ex.answer.total_debit(), 100);

        assert!(matches!(
            Catalog::from_json(&chart, "not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file_or_builtin() {
        let chart = chart();
        assert_eq!(Catalog::load(&chart, None).unwrap().len(), 4);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exercises.json");
        let json = serde_json::to_string(&crate::generator::seed_exercises()).unwrap();
        std::fs::write(&path, json).unwrap();

        let catalog = Catalog::load(&chart, Some(&path)).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("Q5").is_some());

        assert!(Catalog::load(&chart, Some(&dir.path().join("missing.json"))).is_err());
    }

    #[test]
    fn test_next_after_prefers_same_shop() {
        let chart = chart();
        let catalog = Catalog::builtin(&chart);

        assert_eq!(catalog.next_after("Q1").unwrap().id, "Q2");
        assert_eq!(catalog.next_after("Q3").unwrap().id, "Q4"); // no more tea stand, fall through
        assert!(catalog.next_after("Q4").is_none());
        assert!(catalog.next_after("nope").is_none());
    }

    #[test]
    fn test_next_after_skips_other_shops() {
        let chart = chart();
        let mut catalog = Catalog::builtin(&chart);
        let mut later = catalog.get("Q2").unwrap().clone();
        later.id = "Q9".to_string();
        catalog.extend_missing(vec![later]);

        // Q4 belongs to the workshop; Q9 is tea stand again.
        assert_eq!(catalog.next_after("Q3").unwrap().id, "Q9");
    }

    #[test]
    fn test_push_front_and_extend_missing() {
        let chart = chart();
        let mut catalog = Catalog::builtin(&chart);
        let mut daily = catalog.get("Q1").unwrap().clone();
        daily.id = "DABC123".to_string();

        assert!(catalog.push_front(daily.clone()));
        assert!(!catalog.push_front(daily));
        assert_eq!(catalog.as_slice()[0].id, "DABC123");

        let again = catalog.get("Q2").unwrap().clone();
        assert_eq!(catalog.extend_missing(vec![again]), 0);
        assert_eq!(catalog.len(), 5);
    }
}
