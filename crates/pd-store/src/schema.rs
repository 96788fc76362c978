use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

/// Row id of the single overlay state record.
pub const OVERLAY_KEY: &str = "overlay";

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    // Fold leftover WAL pages into the main file. In-memory databases
    // reject this, which is fine.
    if conn
        .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
        .is_ok()
    {
        tracing::info!("startup WAL checkpoint complete");
    }

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS overlay_state (
            id           TEXT PRIMARY KEY,
            visible      INTEGER NOT NULL DEFAULT 1,
            pos_x        REAL NOT NULL DEFAULT 0,
            pos_y        REAL NOT NULL DEFAULT 0,
            size_tier    INTEGER NOT NULL DEFAULT 1,
            transparency REAL NOT NULL DEFAULT 1.0,
            updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}

pub fn get_schema_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
    let version = stmt
        .query_row([], |row| {
            let v: String = row.get(0)?;
            Ok(v.parse::<i64>().unwrap_or(0))
        })
        .ok();
    Ok(version)
}
