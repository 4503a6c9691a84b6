// Ledger Quest - Web Server
// REST API over a single saved practice session

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use ledger_quest::{
    logging, store, Account, AppConfig, Catalog, ChartOfAccounts, Difficulty, Evaluation,
    Exercise, JournalLine, LedgerRow, PostOutcome, ProgressState, Session, SessionError, Side,
    TrialBalance,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Shared application state
#[derive(Clone)]
struct AppState {
    session: Arc<Mutex<Session>>,
    db: Arc<Mutex<Connection>>,
    slot: String,
}

impl AppState {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Persist after a mutation. Failures are logged, the request still succeeds.
    fn save(&self, session: &Session) {
        let conn = self.db.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = store::save_snapshot(&conn, &self.slot, &session.snapshot()) {
            error!(error = %e, slot = %self.slot, "failed to save session");
        }
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: String) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message),
        }
    }
}

fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::ok(data))).into_response()
}

fn session_error(err: SessionError) -> Response {
    let status = match err {
        SessionError::UnknownExercise(_) => StatusCode::NOT_FOUND,
        SessionError::NoExerciseSelected | SessionError::NotYetPassed => StatusCode::CONFLICT,
        SessionError::InvalidAmount(_) | SessionError::UnknownAccount(_) => {
            StatusCode::BAD_REQUEST
        }
    };
    (status, Json(ApiResponse::err(err.to_string()))).into_response()
}

/// Exercise as shown to a player: the answer stays on the server.
#[derive(Serialize)]
struct ExerciseResponse {
    id: String,
    title: String,
    shop: String,
    difficulty: Difficulty,
    points: u32,
    voucher: String,
    objective: String,
    hint_count: usize,
}

impl From<&Exercise> for ExerciseResponse {
    fn from(ex: &Exercise) -> Self {
        Self {
            id: ex.id.clone(),
            title: ex.title.clone(),
            shop: ex.shop.clone(),
            difficulty: ex.difficulty,
            points: ex.points,
            voucher: ex.voucher.clone(),
            objective: ex.objective.clone(),
            hint_count: ex.hints.len(),
        }
    }
}

#[derive(Serialize)]
struct SessionResponse {
    current_exercise: Option<ExerciseResponse>,
    working_lines: Vec<JournalLine>,
    total_debit: u64,
    total_credit: u64,
    can_post: bool,
    progress: ProgressState,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let entry = session.working_entry();
        Self {
            current_exercise: session.current_exercise().map(ExerciseResponse::from),
            working_lines: entry.lines().to_vec(),
            total_debit: entry.total_debit(),
            total_credit: entry.total_credit(),
            can_post: session.can_post(),
            progress: *session.progress(),
        }
    }
}

#[derive(Serialize)]
struct ProgressResponse {
    #[serde(flatten)]
    progress: ProgressState,
    accuracy: u32,
    next_threshold: u64,
}

#[derive(Deserialize)]
struct LineRequest {
    account: String,
    side: String,
    /// Number or free text such as "50,000".
    amount: serde_json::Value,
}

impl LineRequest {
    fn amount(&self) -> Result<f64, SessionError> {
        match &self.amount {
            serde_json::Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| SessionError::InvalidAmount(n.to_string())),
            serde_json::Value::String(s) => Session::parse_amount(s),
            other => Err(SessionError::InvalidAmount(other.to_string())),
        }
    }
}

#[derive(Serialize)]
struct CountResponse {
    added: usize,
}

#[derive(Serialize)]
struct DailyResponse {
    id: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/accounts - Chart of accounts, definition order
async fn get_accounts(State(state): State<AppState>) -> Response {
    let session = state.session();
    let accounts: Vec<Account> = session.list_accounts().to_vec();
    ok(accounts)
}

/// GET /api/exercises - Exercise board
async fn get_exercises(State(state): State<AppState>) -> Response {
    let session = state.session();
    let exercises: Vec<ExerciseResponse> =
        session.exercises().iter().map(ExerciseResponse::from).collect();
    ok(exercises)
}

/// GET /api/exercises/:id/hints
async fn get_hints(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let session = state.session();
    match session.hints(&id) {
        Ok(hints) => ok(hints.to_vec()),
        Err(e) => session_error(e),
    }
}

/// POST /api/exercises/:id/select
async fn select_exercise(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let mut session = state.session();
    match session.select_exercise(&id) {
        Ok(()) => {
            state.save(&session);
            ok(SessionResponse::from(&*session))
        }
        Err(e) => session_error(e),
    }
}

/// GET /api/session - Current exercise, working entry, pass flag
async fn get_session(State(state): State<AppState>) -> Response {
    let session = state.session();
    ok(SessionResponse::from(&*session))
}

/// POST /api/lines - Append a working line
async fn append_line(State(state): State<AppState>, Json(req): Json<LineRequest>) -> Response {
    let Some(side) = Side::parse(&req.side) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err(format!("Unknown side '{}'", req.side))),
        )
            .into_response();
    };

    let mut session = state.session();
    let result = req
        .amount()
        .and_then(|amount| session.append_line(&req.account, side, amount));

    match result {
        Ok(()) => {
            state.save(&session);
            ok(SessionResponse::from(&*session))
        }
        Err(e) => session_error(e),
    }
}

/// DELETE /api/lines/:index - Out-of-range indexes are ignored
async fn remove_line(State(state): State<AppState>, Path(index): Path<usize>) -> Response {
    let mut session = state.session();
    session.remove_line(index);
    state.save(&session);
    ok(SessionResponse::from(&*session))
}

/// DELETE /api/lines - Clear the working entry
async fn clear_lines(State(state): State<AppState>) -> Response {
    let mut session = state.session();
    session.clear_lines();
    state.save(&session);
    ok(SessionResponse::from(&*session))
}

/// POST /api/evaluate - Grade the working entry
async fn evaluate(State(state): State<AppState>) -> Response {
    let mut session = state.session();
    let result: Result<Evaluation, SessionError> = session.evaluate();
    match result {
        Ok(eval) => {
            state.save(&session);
            ok(eval)
        }
        Err(e) => session_error(e),
    }
}

/// POST /api/post - Post a passed entry to the ledger
async fn post_entry(State(state): State<AppState>) -> Response {
    let mut session = state.session();
    let result: Result<PostOutcome, SessionError> = session.post();
    match result {
        Ok(outcome) => {
            state.save(&session);
            ok(outcome)
        }
        Err(e) => session_error(e),
    }
}

/// GET /api/ledger - Per-account totals and ending balances
async fn get_ledger(State(state): State<AppState>) -> Response {
    let session = state.session();
    let rows: Vec<LedgerRow> = session.ledger_report();
    ok(rows)
}

/// GET /api/trial-balance
async fn get_trial_balance(State(state): State<AppState>) -> Response {
    let session = state.session();
    let tb: TrialBalance = session.trial_balance();
    ok(tb)
}

/// GET /api/progress
async fn get_progress(State(state): State<AppState>) -> Response {
    let session = state.session();
    let progress = *session.progress();
    ok(ProgressResponse {
        progress,
        accuracy: progress.accuracy(),
        next_threshold: progress.next_threshold(),
    })
}

/// POST /api/daily - Generate and select a daily exercise
async fn start_daily(State(state): State<AppState>) -> Response {
    let mut session = state.session();
    let id = session.start_daily_exercise(&mut rand::thread_rng());
    state.save(&session);
    ok(DailyResponse { id })
}

/// POST /api/seed - Load the extra exercise batch
async fn seed_exercises(State(state): State<AppState>) -> Response {
    let mut session = state.session();
    let added = session.seed_more_exercises();
    state.save(&session);
    ok(CountResponse { added })
}

/// POST /api/reset - Wipe ledger, progress and working state
async fn reset(State(state): State<AppState>) -> Response {
    let mut session = state.session();
    session.reset();
    state.save(&session);
    ok(SessionResponse::from(&*session))
}

fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/accounts", get(get_accounts))
        .route("/exercises", get(get_exercises))
        .route("/exercises/:id/hints", get(get_hints))
        .route("/exercises/:id/select", post(select_exercise))
        .route("/session", get(get_session))
        .route("/lines", post(append_line).delete(clear_lines))
        .route("/lines/:index", delete(remove_line))
        .route("/evaluate", post(evaluate))
        .route("/post", post(post_entry))
        .route("/ledger", get(get_ledger))
        .route("/trial-balance", get(get_trial_balance))
        .route("/progress", get(get_progress))
        .route("/daily", post(start_daily))
        .route("/seed", post(seed_exercises))
        .route("/reset", post(reset))
        .with_state(state)
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load(None)?;
    logging::init_stdout(&config)?;

    println!("🌐 Ledger Quest - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let chart = ChartOfAccounts::standard();
    let catalog = Catalog::load(&chart, config.catalog_path.as_deref())?;
    let conn = store::open_database(&config.database_path)?;
    let session = store::restore_session(&conn, &config.save_slot, chart, catalog);
    println!("✓ Database opened: {:?}", config.database_path);
    println!("✓ Slot '{}' loaded ({} exercises)", config.save_slot, session.exercises().len());

    // Create shared state
    let state = AppState {
        session: Arc::new(Mutex::new(session)),
        db: Arc::new(Mutex::new(conn)),
        slot: config.save_slot.clone(),
    };

    let app = Router::new()
        .nest("/api", api_routes(state))
        .layer(CorsLayer::permissive());

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    info!(addr = %config.server_addr, "listening");

    println!("\n🚀 Server running on http://{}", config.server_addr);
    println!("   API: http://{}/api/session", config.server_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app).await?;
    Ok(())
}
