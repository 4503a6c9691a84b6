// Ledger Quest - Core Library
// Double-entry practice engine: grading, ledger posting, trial balance,
// progression. Exposed for the CLI/TUI, the API server, and tests.

pub mod chart;
pub mod entry;
pub mod catalog;
pub mod generator;
pub mod grading;
pub mod ledger;
pub mod trial_balance;
pub mod progress;
pub mod session;
pub mod error;
pub mod store;
pub mod export;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use chart::{Account, AccountClass, ChartOfAccounts};
pub use entry::{Entry, JournalLine, LineKey, Side, MAX_AMOUNT};
pub use catalog::{Catalog, Difficulty, Exercise};
pub use grading::{evaluate, Verdict};
pub use ledger::{AccountTotals, Ledger};
pub use trial_balance::{
    ending_balance, ledger_report, trial_balance, EndingBalance, LedgerRow, TrialBalance,
    TrialBalanceRow,
};
pub use progress::{threshold, LevelUp, ProgressState};
pub use session::{Evaluation, PostOutcome, Session, SessionSnapshot};
pub use error::{CatalogError, SessionError};
pub use config::AppConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
