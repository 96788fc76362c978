use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OptionalExtension, params};

use pd_core::{OverlayState, Position, SizeTier, StatePort};

use crate::error::{Result, StoreError};
use crate::schema::{self, OVERLAY_KEY};

/// Database filename inside the data directory.
pub const DB_FILENAME: &str = "petdesk.db";

pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        schema::initialize(&conn)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open `petdesk.db` under `base_dir`, creating the directory if needed.
    pub fn open_in(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)?;
        let path = base_dir.join(DB_FILENAME);
        tracing::info!("opening overlay store at {}", path.display());
        Self::open(&path)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn)?;
        Ok(Self { conn, path: None })
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// On-disk location, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // --- Metadata ---

    pub fn get_metadata(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM metadata WHERE key = ?1")?;
        let result = stmt.query_row([key], |row| row.get(0)).optional()?;
        Ok(result)
    }

    pub fn set_metadata(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    // --- Overlay state ---

    pub fn load_overlay_state(&self) -> Result<Option<OverlayState>> {
        let mut stmt = self.conn.prepare(
            "SELECT visible, pos_x, pos_y, size_tier, transparency
             FROM overlay_state WHERE id = ?1",
        )?;

        let row = stmt
            .query_row([OVERLAY_KEY], |row| {
                Ok((
                    row.get::<_, i64>(0)? != 0,
                    row.get::<_, f64>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, f64>(4)?,
                ))
            })
            .optional()?;

        Ok(row.map(|(visible, x, y, size_tier, transparency)| {
            // rows written by hand or by older builds are re-clamped here
            OverlayState::new(
                visible,
                Position::new(x, y),
                SizeTier::from_ordinal(size_tier),
                transparency,
            )
        }))
    }

    pub fn save_overlay_state(&self, state: &OverlayState) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO overlay_state
                (id, visible, pos_x, pos_y, size_tier, transparency, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, datetime('now'))",
            params![
                OVERLAY_KEY,
                state.visible as i32,
                state.position.x,
                state.position.y,
                state.size_tier.ordinal(),
                state.transparency(),
            ],
        )?;
        Ok(())
    }

    /// Forget the persisted state; the next load yields defaults.
    /// Returns whether a record existed.
    pub fn clear_overlay_state(&self) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM overlay_state WHERE id = ?1", [OVERLAY_KEY])?;
        Ok(rows > 0)
    }

    /// `updated_at` of the persisted record, if any.
    pub fn overlay_updated_at(&self) -> Result<Option<String>> {
        let updated = self
            .conn
            .query_row(
                "SELECT updated_at FROM overlay_state WHERE id = ?1",
                [OVERLAY_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(updated)
    }
}

impl StatePort for Store {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<OverlayState>> {
        self.load_overlay_state()
    }

    fn save(&mut self, state: &OverlayState) -> Result<()> {
        self.save_overlay_state(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> OverlayState {
        OverlayState::new(false, Position::new(123.5, -42.25), SizeTier::Large, 0.45)
    }

    #[test]
    fn test_load_empty_db() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.load_overlay_state().unwrap().is_none());
        assert!(store.overlay_updated_at().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let store = Store::open_in_memory().unwrap();
        let original = sample_state();

        store.save_overlay_state(&original).unwrap();
        let loaded = store.load_overlay_state().unwrap().unwrap();

        assert_eq!(loaded, original);
        assert!(store.overlay_updated_at().unwrap().is_some());
    }

    #[test]
    fn test_save_overwrites_previous() {
        let store = Store::open_in_memory().unwrap();
        store.save_overlay_state(&sample_state()).unwrap();
        store.save_overlay_state(&OverlayState::default()).unwrap();

        let count: i64 = store
            .conn()
            .query_row("SELECT count(*) FROM overlay_state", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            store.load_overlay_state().unwrap(),
            Some(OverlayState::default())
        );
    }

    #[test]
    fn test_out_of_range_rows_are_clamped() {
        let store = Store::open_in_memory().unwrap();
        store
            .conn()
            .execute(
                "INSERT INTO overlay_state (id, visible, pos_x, pos_y, size_tier, transparency)
                 VALUES ('overlay', 1, 0, 0, 9, 0.01)",
                [],
            )
            .unwrap();

        let loaded = store.load_overlay_state().unwrap().unwrap();
        assert_eq!(loaded.transparency(), 0.2);
        assert_eq!(loaded.size_tier, SizeTier::Medium);
    }

    #[test]
    fn test_clear() {
        let store = Store::open_in_memory().unwrap();
        assert!(!store.clear_overlay_state().unwrap());

        store.save_overlay_state(&sample_state()).unwrap();
        assert!(store.clear_overlay_state().unwrap());
        assert!(store.load_overlay_state().unwrap().is_none());
    }

    #[test]
    fn test_state_port_impl() {
        let mut store = Store::open_in_memory().unwrap();
        let state = sample_state();
        StatePort::save(&mut store, &state).unwrap();
        assert_eq!(StatePort::load(&mut store).unwrap(), Some(state));
    }

    #[test]
    fn test_metadata() {
        let store = Store::open_in_memory().unwrap();

        assert!(store.get_metadata("foo").unwrap().is_none());

        store.set_metadata("foo", "bar").unwrap();
        assert_eq!(store.get_metadata("foo").unwrap(), Some("bar".to_string()));

        store.set_metadata("foo", "baz").unwrap();
        assert_eq!(store.get_metadata("foo").unwrap(), Some("baz".to_string()));
    }

    #[test]
    fn test_open_in_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = Store::open_in(&blocker.join("data")).err().unwrap();
        assert!(matches!(err, StoreError::Io(_)), "got: {err}");
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested").join("data");

        {
            let store = Store::open_in(&base).unwrap();
            store.save_overlay_state(&sample_state()).unwrap();
        }

        let store = Store::open_in(&base).unwrap();
        assert_eq!(store.path(), Some(base.join(DB_FILENAME).as_path()));
        assert_eq!(store.load_overlay_state().unwrap(), Some(sample_state()));
    }
}
