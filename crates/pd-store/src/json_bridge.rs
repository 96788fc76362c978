use std::fs;
use std::path::Path;

use pd_core::{export_json, import_json};

use crate::error::{Result, StoreError};
use crate::store::Store;

impl Store {
    /// Replace the persisted overlay state with the contents of a JSON export.
    pub fn import_json_file(&self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path)?;
        self.import_json_str(&json)
    }

    pub fn import_json_str(&self, json: &str) -> Result<()> {
        let state =
            import_json(json).map_err(|e| StoreError::InvalidData(format!("invalid JSON: {e}")))?;
        self.save_overlay_state(&state)
    }

    /// Write the persisted state (defaults when none) as a JSON export.
    pub fn export_json_file(&self, path: &Path) -> Result<()> {
        let json = self.export_json_string()?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn export_json_string(&self) -> Result<String> {
        let state = self.load_overlay_state()?.unwrap_or_default();
        export_json(&state)
            .map_err(|e| StoreError::InvalidData(format!("JSON export failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::{OverlayState, Position, SizeTier};

    #[test]
    fn test_export_empty_store_is_defaults() {
        let store = Store::open_in_memory().unwrap();
        let json = store.export_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"]["visible"], true);
        assert_eq!(value["state"]["sizeTier"], "medium");
    }

    #[test]
    fn test_file_roundtrip_between_stores() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.json");

        let source = Store::open_in_memory().unwrap();
        let state = OverlayState::new(true, Position::new(900.0, 40.0), SizeTier::Small, 0.7);
        source.save_overlay_state(&state).unwrap();
        source.export_json_file(&path).unwrap();

        let target = Store::open_in_memory().unwrap();
        target.import_json_file(&path).unwrap();
        assert_eq!(target.load_overlay_state().unwrap(), Some(state));
    }

    #[test]
    fn test_import_invalid_json_leaves_state() {
        let store = Store::open_in_memory().unwrap();
        store.save_overlay_state(&OverlayState::default()).unwrap();

        let err = store.import_json_str("{ nope").unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
        assert_eq!(
            store.load_overlay_state().unwrap(),
            Some(OverlayState::default())
        );
    }

    #[test]
    fn test_import_missing_file() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .import_json_file(Path::new("/nonexistent/overlay.json"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)), "got: {err}");
    }

    #[test]
    fn test_export_to_missing_dir() {
        let store = Store::open_in_memory().unwrap();
        let err = store
            .export_json_file(Path::new("/nonexistent/dir/overlay.json"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Io(_)), "got: {err}");
    }
}
