// 🚫 Error taxonomy for the practice engine
//
// Nothing in here is fatal. Every variant rejects one requested operation
// and leaves the session exactly as it was.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no exercise selected")]
    NoExerciseSelected,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("unknown account: {0:?}")]
    UnknownAccount(String),

    #[error("unknown exercise: {0}")]
    UnknownExercise(String),

    /// Post requires a passing verdict on the exact current working entry.
    #[error("entry has not passed grading yet")]
    NotYetPassed,
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("duplicate exercise id: {0}")]
    DuplicateId(String),

    #[error("exercise {0} has an empty answer")]
    EmptyAnswer(String),

    #[error("exercise {id} answer is unbalanced: debit {total_debit} != credit {total_credit}")]
    UnbalancedAnswer {
        id: String,
        total_debit: u64,
        total_credit: u64,
    },

    #[error("exercise {id} references unknown account {account:?}")]
    UnknownAccount { id: String, account: String },

    #[error("exercise {0} has a line amount that is zero or above the maximum")]
    InvalidAmount(String),

    #[error("catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
