// 🎯 Grading Engine - balance check, then canonical comparison
//
// Pure: takes a submission and an exercise, returns a verdict. Counting
// attempts and awarding points is the session's job.

use crate::catalog::Exercise;
use crate::entry::{Entry, LineKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    /// Submission matches the canonical answer (line order ignored).
    Pass,

    /// Debit and credit sums differ. The canonical answer was not consulted.
    Unbalanced { total_debit: u64, total_credit: u64 },

    /// Balanced but wrong. `missing` are canonical lines the submission
    /// lacks, `extra` are submitted lines the answer does not contain.
    Fail {
        missing: Vec<LineKey>,
        extra: Vec<LineKey>,
    },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn summary(&self) -> String {
        match self {
            Verdict::Pass => "Correct! The entry can now be posted.".to_string(),
            Verdict::Unbalanced {
                total_debit,
                total_credit,
            } => format!(
                "Unbalanced: debit {} vs credit {}. Balance it first.",
                total_debit, total_credit
            ),
            Verdict::Fail { missing, extra } => format!(
                "Close, but not quite: {} line(s) possibly missing, {} line(s) wrong or extra.",
                missing.len(),
                extra.len()
            ),
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

pub fn evaluate(submission: &Entry, exercise: &Exercise) -> Verdict {
    let total_debit = submission.total_debit();
    let total_credit = submission.total_credit();

    if total_debit != total_credit {
        return Verdict::Unbalanced {
            total_debit,
            total_credit,
        };
    }

    let submitted = submission.normalized();
    let canonical = exercise.answer.normalized();

    if submitted == canonical {
        return Verdict::Pass;
    }

    let (missing, extra) = diff(&canonical, &submitted);
    Verdict::Fail { missing, extra }
}

/// Set differences, deduplicated and sorted.
fn diff(canonical: &[LineKey], submitted: &[LineKey]) -> (Vec<LineKey>, Vec<LineKey>) {
    let want: BTreeSet<&LineKey> = canonical.iter().collect();
    let have: BTreeSet<&LineKey> = submitted.iter().collect();

    let missing = want.difference(&have).map(|k| (*k).clone()).collect();
    let extra = have.difference(&want).map(|k| (*k).clone()).collect();

    (missing, extra)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Difficulty;
    use crate::entry::{JournalLine, Side};
    use proptest::prelude::*;

    fn capital_exercise() -> Exercise {
        Exercise {
            id: "Q1".to_string(),
            title: "Owner invests capital".to_string(),
            shop: "Greenleaf Tea Stand".to_string(),
            difficulty: Difficulty::Beginner,
            points: 35,
            voucher: "Owner deposits 50,000 cash.".to_string(),
            objective: "Record the investment.".to_string(),
            hints: vec![],
            answer: Entry::new(vec![
                JournalLine::debit("Cash", 50000),
                JournalLine::credit("Capital", 50000),
            ]),
        }
    }

    #[test]
    fn test_pass_in_any_order() {
        let ex = capital_exercise();
        let submission = Entry::new(vec![
            JournalLine::credit("Capital", 50000),
            JournalLine::debit("Cash", 50000),
        ]);
        assert_eq!(evaluate(&submission, &ex), Verdict::Pass);
    }

    #[test]
    fn test_unbalanced_reports_totals() {
        let ex = capital_exercise();
        let submission = Entry::new(vec![
            JournalLine::debit("Cash", 50000),
            JournalLine::credit("Capital", 5000),
        ]);
        assert_eq!(
            evaluate(&submission, &ex),
            Verdict::Unbalanced {
                total_debit: 50000,
                total_credit: 5000
            }
        );
    }

    #[test]
    fn test_empty_submission_fails_with_everything_missing() {
        let ex = capital_exercise();
        match evaluate(&Entry::default(), &ex) {
            Verdict::Fail { missing, extra } => {
                assert_eq!(missing.len(), 2);
                assert!(extra.is_empty());
            }
            other => panic!("expected Fail, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_side_diagnostics() {
        let ex = capital_exercise();
        let submission = Entry::new(vec![
            JournalLine::credit("Cash", 50000),
            JournalLine::debit("Capital", 50000),
        ]);

        let Verdict::Fail { missing, extra } = evaluate(&submission, &ex) else {
            panic!("expected Fail");
        };

        assert_eq!(
            missing,
            vec![
                JournalLine::debit("Cash", 50000).key(),
                JournalLine::credit("Capital", 50000).key(),
            ]
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
        );
        assert_eq!(extra.len(), 2);
        assert!(extra.iter().all(|k| !missing.contains(k)));
    }

    #[test]
    fn test_duplicate_line_fails_but_diagnostics_empty() {
        // Same distinct tuples, different multiplicity: Fail with nothing
        // to point at, since diagnostics are set-based.
        let mut ex = capital_exercise();
        ex.answer = Entry::new(vec![
            JournalLine::debit("Cash", 100),
            JournalLine::credit("Capital", 100),
        ]);
        let submission = Entry::new(vec![
            JournalLine::debit("Cash", 100),
            JournalLine::debit("Cash", 100),
            JournalLine::credit("Capital", 100),
            JournalLine::credit("Capital", 100),
        ]);

        assert_eq!(
            evaluate(&submission, &ex),
            Verdict::Fail {
                missing: vec![],
                extra: vec![]
            }
        );
    }

    // ========================================================================
    // PROPERTIES
    // ========================================================================

    const NAMES: [&str; 4] = ["Cash", "Capital", "Inventory", "Accounts Payable"];

    fn line_strategy() -> impl Strategy<Value = JournalLine> {
        (0..NAMES.len(), any::<bool>(), 1u64..1000).prop_map(|(i, debit, amount)| {
            let side = if debit { Side::Debit } else { Side::Credit };
            JournalLine::new(NAMES[i], side, amount)
        })
    }

    /// Arbitrary lines plus one balancing line, so the entry is balanced
    /// and non-empty.
    fn balanced_entry_strategy() -> impl Strategy<Value = Entry> {
        prop::collection::vec(line_strategy(), 1..6).prop_map(|lines| {
            let mut entry = Entry::new(lines);
            let d = entry.total_debit();
            let c = entry.total_credit();
            if d > c {
                entry.push(JournalLine::credit("Capital", d - c));
            } else if c > d {
                entry.push(JournalLine::debit("Cash", c - d));
            }
            entry
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_balanced_entries_never_unbalanced(entry in balanced_entry_strategy()) {
            let ex = capital_exercise();
            let verdict = evaluate(&entry, &ex);
            let is_unbalanced = matches!(verdict, Verdict::Unbalanced { .. });
            prop_assert!(!is_unbalanced);
        }

        #[test]
        fn prop_verdict_invariant_under_permutation(
            entry in balanced_entry_strategy(),
            seed in any::<u64>(),
        ) {
            let ex = capital_exercise();
            let mut lines = entry.lines().to_vec();
            // Deterministic shuffle driven by the seed.
            let n = lines.len();
            let mut s = seed;
            for i in (1..n).rev() {
                s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let j = (s >> 33) as usize % (i + 1);
                lines.swap(i, j);
            }
            let permuted = Entry::new(lines);

            prop_assert_eq!(evaluate(&entry, &ex).is_pass(), evaluate(&permuted, &ex).is_pass());
            prop_assert_eq!(evaluate(&entry, &ex), evaluate(&permuted, &ex));
        }

        #[test]
        fn prop_fail_diagnostics_partition_tuples(entry in balanced_entry_strategy()) {
            let ex = capital_exercise();
            if let Verdict::Fail { missing, extra } = evaluate(&entry, &ex) {
                let canonical: BTreeSet<LineKey> = ex.answer.normalized().into_iter().collect();
                let submitted: BTreeSet<LineKey> = entry.normalized().into_iter().collect();

                for k in &missing {
                    prop_assert!(!extra.contains(k));
                    prop_assert!(canonical.contains(k) && !submitted.contains(k));
                }
                for k in &extra {
                    prop_assert!(submitted.contains(k) && !canonical.contains(k));
                }
                for k in canonical.union(&submitted) {
                    let in_both = canonical.contains(k) && submitted.contains(k);
                    let buckets = [missing.contains(k), extra.contains(k), in_both]
                        .iter()
                        .filter(|b| **b)
                        .count();
                    prop_assert_eq!(buckets, 1);
                }
            }
        }
    }
}
