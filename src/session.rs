// 🎮 Session - the single owner of all mutable practice state
//
// Current exercise, working entry, pass flag, ledger and progress live here.
// Grading and derivation are pure functions over slices of this state; the
// mutation points are the named methods below.

use crate::catalog::{Catalog, Difficulty, Exercise};
use crate::chart::{Account, ChartOfAccounts};
use crate::entry::{Entry, JournalLine, Side, MAX_AMOUNT};
use crate::error::SessionError;
use crate::generator;
use crate::grading::{self, Verdict};
use crate::ledger::{AccountTotals, Ledger};
use crate::progress::{LevelUp, ProgressState};
use crate::trial_balance::{self, EndingBalance, LedgerRow, TrialBalance};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

// ============================================================================
// SNAPSHOT
// ============================================================================

/// Everything needed to rebuild a session on top of a chart and catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_exercise_id: Option<String>,
    pub working_lines: Vec<JournalLine>,
    pub last_check_passed: bool,
    pub ledger: Ledger,
    pub progress: ProgressState,
    /// Daily exercises created at runtime, so their ids still resolve.
    #[serde(default)]
    pub generated_exercises: Vec<Exercise>,
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub level_ups: Vec<LevelUp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOutcome {
    pub posted_lines: usize,
    /// Exercise selected automatically after posting, if any remain.
    pub next_exercise: Option<String>,
}

// ============================================================================
// SESSION
// ============================================================================

pub struct Session {
    chart: ChartOfAccounts,
    catalog: Catalog,
    current: Option<String>,
    working: Entry,
    last_check_passed: bool,
    ledger: Ledger,
    progress: ProgressState,
}

impl Session {
    pub fn new(chart: ChartOfAccounts, catalog: Catalog) -> Self {
        Session {
            chart,
            catalog,
            current: None,
            working: Entry::default(),
            last_check_passed: false,
            ledger: Ledger::new(),
            progress: ProgressState::new(),
        }
    }

    /// Standard chart with the built-in exercises.
    pub fn with_builtin() -> Self {
        let chart = ChartOfAccounts::standard();
        let catalog = Catalog::builtin(&chart);
        Self::new(chart, catalog)
    }

    /// Fresh session, then restore `snapshot` if there is one.
    pub fn from_snapshot(
        chart: ChartOfAccounts,
        catalog: Catalog,
        snapshot: Option<SessionSnapshot>,
    ) -> Self {
        let mut session = Self::new(chart, catalog);
        if let Some(snapshot) = snapshot {
            session.restore(snapshot);
        }
        session
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    pub fn chart(&self) -> &ChartOfAccounts {
        &self.chart
    }

    /// Chart definition order.
    pub fn list_accounts(&self) -> &[Account] {
        self.chart.accounts()
    }

    pub fn exercises(&self) -> &[Exercise] {
        self.catalog.as_slice()
    }

    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.current.as_deref().and_then(|id| self.catalog.get(id))
    }

    pub fn working_entry(&self) -> &Entry {
        &self.working
    }

    pub fn can_post(&self) -> bool {
        self.last_check_passed
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn progress(&self) -> &ProgressState {
        &self.progress
    }

    pub fn balances_for(&self, account: &str) -> AccountTotals {
        self.ledger.balances_for(account)
    }

    pub fn ending_balance(&self, account: &str) -> Result<EndingBalance, SessionError> {
        let account = self
            .chart
            .find_by_name(account)
            .ok_or_else(|| SessionError::UnknownAccount(account.to_string()))?;
        Ok(trial_balance::ending_balance(&self.ledger, account))
    }

    pub fn trial_balance(&self) -> TrialBalance {
        trial_balance::trial_balance(&self.ledger, &self.chart)
    }

    pub fn ledger_report(&self) -> Vec<LedgerRow> {
        trial_balance::ledger_report(&self.ledger, &self.chart)
    }

    pub fn hints(&self, id: &str) -> Result<&[String], SessionError> {
        self.catalog
            .get(id)
            .map(|ex| ex.hints.as_slice())
            .ok_or_else(|| SessionError::UnknownExercise(id.to_string()))
    }

    // ------------------------------------------------------------------------
    // Working entry
    // ------------------------------------------------------------------------

    pub fn select_exercise(&mut self, id: &str) -> Result<(), SessionError> {
        if self.catalog.get(id).is_none() {
            return Err(SessionError::UnknownExercise(id.to_string()));
        }

        self.current = Some(id.to_string());
        self.working.clear();
        self.last_check_passed = false;
        info!(exercise = id, "exercise selected");
        Ok(())
    }

    /// Parse free-text amount input. Thousands separators are allowed.
    pub fn parse_amount(input: &str) -> Result<f64, SessionError> {
        let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
        cleaned
            .parse::<f64>()
            .map_err(|_| SessionError::InvalidAmount(input.trim().to_string()))
    }

    pub fn append_line(&mut self, account: &str, side: Side, amount: f64) -> Result<(), SessionError> {
        if self.current_exercise().is_none() {
            return Err(SessionError::NoExerciseSelected);
        }
        if account.is_empty() || !self.chart.contains(account) {
            return Err(SessionError::UnknownAccount(account.to_string()));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(SessionError::InvalidAmount(amount.to_string()));
        }

        let rounded = amount.round();
        if rounded < 1.0 || rounded > MAX_AMOUNT as f64 {
            return Err(SessionError::InvalidAmount(amount.to_string()));
        }

        self.working
            .push(JournalLine::new(account, side, rounded as u64));
        self.last_check_passed = false;
        debug!(account, side = side.code(), amount = rounded as u64, "line added");
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) {
        if let Some(line) = self.working.remove(index) {
            debug!(index, account = %line.account, "line removed");
        }
        self.last_check_passed = false;
    }

    pub fn clear_lines(&mut self) {
        self.working.clear();
        self.last_check_passed = false;
    }

    // ------------------------------------------------------------------------
    // Grading & posting
    // ------------------------------------------------------------------------

    /// Grade the working entry. Counts exactly one attempt whenever an
    /// exercise is selected.
    pub fn evaluate(&mut self) -> Result<Evaluation, SessionError> {
        let exercise = self
            .current_exercise()
            .ok_or(SessionError::NoExerciseSelected)?;
        let points = u64::from(exercise.points);
        let id = exercise.id.clone();

        let verdict = grading::evaluate(&self.working, exercise);
        let passed = verdict.is_pass();

        self.progress.record_attempt(passed);
        self.last_check_passed = passed;

        let level_ups = if passed {
            self.progress.award(points)
        } else {
            Vec::new()
        };

        info!(
            exercise = %id,
            passed,
            attempts = self.progress.attempts,
            "entry graded"
        );
        for up in &level_ups {
            info!(level = up.level, "level up");
        }

        Ok(Evaluation { verdict, level_ups })
    }

    /// Post the working entry after a pass, then move on to the next
    /// exercise (same shop first).
    pub fn post(&mut self) -> Result<PostOutcome, SessionError> {
        if !self.last_check_passed {
            return Err(SessionError::NotYetPassed);
        }
        let current = self.current.clone().ok_or(SessionError::NoExerciseSelected)?;

        self.ledger.post(&self.working);
        let posted_lines = self.working.len();

        self.working.clear();
        self.last_check_passed = false;

        let next_exercise = self.catalog.next_after(&current).map(|ex| ex.id.clone());
        self.current = next_exercise.clone();

        info!(
            exercise = %current,
            lines = posted_lines,
            next = ?next_exercise,
            "entry posted"
        );

        Ok(PostOutcome {
            posted_lines,
            next_exercise,
        })
    }

    // ------------------------------------------------------------------------
    // Catalog producers
    // ------------------------------------------------------------------------

    /// Add the second batch of exercises. Returns how many were new.
    pub fn seed_more_exercises(&mut self) -> usize {
        let added = self.catalog.extend_missing(generator::seed_exercises());
        info!(added, "seeded exercises");
        added
    }

    /// Generate a daily exercise, put it first, and select it.
    pub fn start_daily_exercise<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let mut exercise = generator::daily_exercise(rng);
        while self.catalog.get(&exercise.id).is_some() {
            exercise.id = generator::daily_id();
        }
        let id = exercise.id.clone();

        self.catalog.push_front(exercise);
        self.current = Some(id.clone());
        self.working.clear();
        self.last_check_passed = false;
        info!(exercise = %id, "daily exercise started");
        id
    }

    // ------------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------------

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_exercise_id: self.current.clone(),
            working_lines: self.working.lines().to_vec(),
            last_check_passed: self.last_check_passed,
            ledger: self.ledger.clone(),
            progress: self.progress,
            generated_exercises: self
                .catalog
                .iter()
                .filter(|ex| ex.difficulty == Difficulty::Daily)
                .cloned()
                .collect(),
        }
    }

    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        for ex in snapshot.generated_exercises.into_iter().rev() {
            match ex.validate(&self.chart) {
                Ok(()) => {
                    self.catalog.push_front(ex);
                }
                Err(e) => warn!(error = %e, "dropping invalid generated exercise"),
            }
        }

        self.ledger = snapshot.ledger;
        self.progress = snapshot.progress;
        if self.progress.level == 0 {
            self.progress.level = 1;
        }
        // Roll any stored overflow into levels so score < threshold holds.
        self.progress.award(0);

        match snapshot.current_exercise_id {
            Some(id) if self.catalog.get(&id).is_some() => {
                let lines_ok = snapshot
                    .working_lines
                    .iter()
                    .all(|l| l.has_valid_amount() && self.chart.contains(&l.account));
                if lines_ok {
                    self.working = Entry::new(snapshot.working_lines);
                    self.last_check_passed = snapshot.last_check_passed;
                } else {
                    warn!(exercise = %id, "discarding invalid working lines");
                    self.working = Entry::default();
                    self.last_check_passed = false;
                }
                self.current = Some(id);
            }
            Some(id) => {
                warn!(exercise = %id, "saved exercise no longer exists, clearing selection");
                self.current = None;
                self.working = Entry::default();
                self.last_check_passed = false;
            }
            None => {
                self.current = None;
                self.working = Entry::default();
                self.last_check_passed = false;
            }
        }
    }

    /// Drop all progress, ledger and selection. Generated exercises go too.
    pub fn reset(&mut self) {
        let kept: Vec<Exercise> = self
            .catalog
            .iter()
            .filter(|ex| ex.difficulty != Difficulty::Daily)
            .cloned()
            .collect();
        self.catalog = Catalog::default();
        self.catalog.extend_missing(kept);

        self.current = None;
        self.working = Entry::default();
        self.last_check_passed = false;
        self.ledger = Ledger::new();
        self.progress = ProgressState::new();
        info!("session reset");
    }
}

// ============================================================================
// TESTS
// ============================================================================
