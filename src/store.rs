// 💾 Snapshot store - SQLite + WAL, one row per save slot
//
// The payload is the JSON session snapshot; the checksum is the SHA-256 of
// that payload. A row whose checksum does not match is treated as corrupt.

use crate::session::{Session, SessionSnapshot};
use crate::{Catalog, ChartOfAccounts};
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_SLOT: &str = "default";

pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }

    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))?;
    setup_database(&conn)?;
    Ok(conn)
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS snapshots (
            slot TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            checksum TEXT NOT NULL,
            saved_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

fn checksum(payload: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Upsert the snapshot for `slot`.
pub fn save_snapshot(conn: &Connection, slot: &str, snapshot: &SessionSnapshot) -> Result<()> {
    let payload = serde_json::to_string(snapshot).context("Failed to serialize snapshot")?;
    let sum = checksum(&payload);

    conn.execute(
        "INSERT INTO snapshots (slot, payload, checksum, saved_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(slot) DO UPDATE SET
            payload = excluded.payload,
            checksum = excluded.checksum,
            saved_at = excluded.saved_at",
        params![slot, payload, sum, Utc::now().to_rfc3339()],
    )
    .with_context(|| format!("Failed to save snapshot slot {}", slot))?;

    Ok(())
}

/// `Ok(None)` when the slot is empty; an error when the row is corrupt.
pub fn load_snapshot(conn: &Connection, slot: &str) -> Result<Option<SessionSnapshot>> {
    let row: Option<(String, String)> = conn
        .query_row(
            "SELECT payload, checksum FROM snapshots WHERE slot = ?1",
            params![slot],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let Some((payload, stored_sum)) = row else {
        return Ok(None);
    };

    if checksum(&payload) != stored_sum {
        return Err(anyhow!("Checksum mismatch for snapshot slot {}", slot));
    }

    let snapshot = serde_json::from_str(&payload)
        .with_context(|| format!("Failed to deserialize snapshot slot {}", slot))?;
    Ok(Some(snapshot))
}

pub fn saved_at(conn: &Connection, slot: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT saved_at FROM snapshots WHERE slot = ?1",
            params![slot],
            |row| row.get(0),
        )
        .optional()?;

    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .context("Invalid saved_at timestamp")
    })
    .transpose()
}

pub fn delete_snapshot(conn: &Connection, slot: &str) -> Result<()> {
    conn.execute("DELETE FROM snapshots WHERE slot = ?1", params![slot])?;
    Ok(())
}

/// Rebuild a session from `slot`. Any load failure degrades to a fresh
/// session instead of propagating.
pub fn restore_session(
    conn: &Connection,
    slot: &str,
    chart: ChartOfAccounts,
    catalog: Catalog,
) -> Session {
    let snapshot = match load_snapshot(conn, slot) {
        Ok(Some(snapshot)) => {
            info!(slot, "restored saved session");
            Some(snapshot)
        }
        Ok(None) => None,
        Err(e) => {
            warn!(slot, error = %e, "saved session unreadable, starting fresh");
            None
        }
    };

    Session::from_snapshot(chart, catalog, snapshot)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Side;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        conn
    }

    fn played_session() -> Session {
        let mut s = Session::with_builtin();
        s.select_exercise("Q1").unwrap();
        s.append_line("Cash", Side::Debit, 50000.0).unwrap();
        s.append_line("Capital", Side::Credit, 50000.0).unwrap();
        s.evaluate().unwrap();
        s.post().unwrap();
        s
    }

    #[test]
    fn test_save_and_load() {
        let conn = memory_db();
        let s = played_session();

        assert!(load_snapshot(&conn, DEFAULT_SLOT).unwrap().is_none());
        save_snapshot(&conn, DEFAULT_SLOT, &s.snapshot()).unwrap();

        let loaded = load_snapshot(&conn, DEFAULT_SLOT).unwrap().unwrap();
        assert_eq!(loaded, s.snapshot());
        assert!(saved_at(&conn, DEFAULT_SLOT).unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites_slot() {
        let conn = memory_db();
        let mut s = played_session();
        save_snapshot(&conn, DEFAULT_SLOT, &s.snapshot()).unwrap();

        s.reset();
        save_snapshot(&conn, DEFAULT_SLOT, &s.snapshot()).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert!(load_snapshot(&conn, DEFAULT_SLOT).unwrap().unwrap().ledger.is_empty());
    }

    #[test]
    fn test_tampered_payload_detected() {
        let conn = memory_db();
        save_snapshot(&conn, DEFAULT_SLOT, &played_session().snapshot()).unwrap();
        conn.execute(
            "UPDATE snapshots SET payload = replace(payload, '50000', '99999')",
            [],
        )
        .unwrap();

        assert!(load_snapshot(&conn, DEFAULT_SLOT).is_err());
    }

    #[test]
    fn test_corrupt_snapshot_degrades_to_fresh_session() {
        let conn = memory_db();
        let garbage = "{not json";
        conn.execute(
            "INSERT INTO snapshots (slot, payload, checksum, saved_at) VALUES (?1, ?2, ?3, ?4)",
            params![DEFAULT_SLOT, garbage, checksum(garbage), Utc::now().to_rfc3339()],
        )
        .unwrap();

        let chart = ChartOfAccounts::standard();
        let catalog = Catalog::builtin(&chart);
        let s = restore_session(&conn, DEFAULT_SLOT, chart, catalog);

        assert!(s.current_exercise().is_none());
        assert!(s.ledger().is_empty());
        assert_eq!(s.progress().attempts, 0);
    }

    #[test]
    fn test_restore_session_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quest.db");

        {
            let conn = open_database(&path).unwrap();
            save_snapshot(&conn, "alice", &played_session().snapshot()).unwrap();
        }

        let conn = open_database(&path).unwrap();
        let chart = ChartOfAccounts::standard();
        let catalog = Catalog::builtin(&chart);
        let s = restore_session(&conn, "alice", chart, catalog);
        assert_eq!(s.balances_for("Cash").debit, 50000);
        assert_eq!(s.current_exercise().unwrap().id, "Q2");

        delete_snapshot(&conn, "alice").unwrap();
        assert!(load_snapshot(&conn, "alice").unwrap().is_none());
    }
}
