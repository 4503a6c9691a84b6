// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ledger_quest::{logging, store, AppConfig, Catalog, ChartOfAccounts, Session, Side};
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledger-quest", version, about = "Double-entry bookkeeping practice")]
struct Cli {
    /// Config file (TOML); defaults to ./ledger-quest.toml when present
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive workbench (default)
    Play,
    /// Level, score and accuracy of the saved session
    Status,
    /// Print the general ledger and trial balance
    Ledger,
    /// List the exercise board
    Exercises,
    /// Write reports as CSV
    Export {
        #[arg(long)]
        trial_balance: Option<PathBuf>,
        #[arg(long)]
        ledger: Option<PathBuf>,
    },
    /// Delete the saved session and start over
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Command::Play);
    if let Command::Play = command {
        return run_ui_mode(&config);
    }

    logging::init_stdout(&config)?;
    let (conn, session) = open_session(&config)?;

    match command {
        Command::Status => run_status(&conn, &config, &session)?,
        Command::Ledger => run_ledger(&session),
        Command::Exercises => run_exercises(&session),
        Command::Export {
            trial_balance,
            ledger,
        } => run_export(&session, trial_balance, ledger)?,
        Command::Reset => run_reset(&conn, &config)?,
        Command::Play => {}
    }

    Ok(())
}

fn open_session(config: &AppConfig) -> Result<(Connection, Session)> {
    let chart = ChartOfAccounts::standard();
    let catalog = Catalog::load(&chart, config.catalog_path.as_deref())?;
    let conn = store::open_database(&config.database_path)?;
    let session = store::restore_session(&conn, &config.save_slot, chart, catalog);
    Ok((conn, session))
}

fn run_status(conn: &Connection, config: &AppConfig, session: &Session) -> Result<()> {
    let progress = session.progress();

    println!("📒 Ledger Quest - slot '{}'", config.save_slot);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("⭐ Level:     {}", progress.level);
    println!("🏆 Score:     {}/{}", progress.score, progress.next_threshold());
    println!(
        "🎯 Accuracy:  {}% ({} of {} checks passed)",
        progress.accuracy(),
        progress.passes,
        progress.attempts
    );

    match session.current_exercise() {
        Some(ex) => println!("📝 Current:   {} - {} ({} lines drafted)", ex.id, ex.title, session.working_entry().len()),
        None => println!("📝 Current:   none"),
    }

    println!("⚖️  Trial:     {}", session.trial_balance().summary());

    match store::saved_at(conn, &config.save_slot)? {
        Some(at) => println!("💾 Saved:     {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("💾 Saved:     never"),
    }

    Ok(())
}

fn run_ledger(session: &Session) {
    let rows = session.ledger_report();

    println!("📚 General Ledger");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if rows.is_empty() {
        println!("(nothing posted yet)");
    }
    for row in &rows {
        let side = match row.side {
            Side::Debit => "Dr",
            Side::Credit => "Cr",
        };
        println!(
            "{:<4} {:<32} Dr {:>10}  Cr {:>10}  = {:>10} ({})",
            row.code, row.account, row.debit_total, row.credit_total, row.balance, side
        );
    }

    let tb = session.trial_balance();
    println!("\n⚖️  Trial Balance");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for row in &tb.rows {
        println!(
            "{:<4} {:<32} {:>10} {:>10}",
            row.code, row.account, row.debit, row.credit
        );
    }
    println!("{:<37} {:>10} {:>10}", "TOTAL", tb.total_debit, tb.total_credit);

    if tb.is_balanced {
        println!("✅ {}", tb.summary());
    } else {
        println!("❌ {}", tb.summary());
    }
}

fn run_exercises(session: &Session) {
    let current = session.current_exercise().map(|ex| ex.id.as_str());

    println!("📋 Exercise Board");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for ex in session.exercises() {
        let marker = if current == Some(ex.id.as_str()) { "→" } else { " " };
        println!(
            "{} {:<8} {:<9} +{:<3} {} ({})",
            marker,
            ex.id,
            ex.difficulty.as_str(),
            ex.points,
            ex.title,
            ex.shop
        );
    }
}

fn run_export(
    session: &Session,
    trial_balance: Option<PathBuf>,
    ledger: Option<PathBuf>,
) -> Result<()> {
    if trial_balance.is_none() && ledger.is_none() {
        eprintln!("❌ Nothing to export: pass --trial-balance <csv> and/or --ledger <csv>");
        std::process::exit(2);
    }

    if let Some(path) = trial_balance {
        ledger_quest::export::export_trial_balance(&path, &session.trial_balance())?;
        println!("✅ Trial balance written to {}", path.display());
    }

    if let Some(path) = ledger {
        ledger_quest::export::export_ledger(&path, &session.ledger_report())?;
        println!("✅ Ledger written to {}", path.display());
    }

    Ok(())
}

fn run_reset(conn: &Connection, config: &AppConfig) -> Result<()> {
    store::delete_snapshot(conn, &config.save_slot)?;
    println!("🧹 Slot '{}' cleared. Next session starts fresh.", config.save_slot);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(config: &AppConfig) -> Result<()> {
    let _guard = logging::init_file(config)?;

    println!("🖥️  Loading Ledger Quest...\n");
    let (conn, session) = open_session(config)?;

    let mut app = ui::App::new(session);
    ui::run_ui(&mut app, &conn, &config.save_slot)?;

    store::save_snapshot(&conn, &config.save_slot, &app.session.snapshot())?;
    println!("💾 Progress saved to slot '{}'", config.save_slot);

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_config: &AppConfig) -> Result<()> {
    eprintln!("❌ TUI feature not enabled!");
    eprintln!("   Build with: cargo build --features tui");
    eprintln!("   Or use: ledger-quest status | ledger | exercises | export");
    std::process::exit(1);
}
