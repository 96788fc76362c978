//! Versioned JSON export of the overlay state.
//!
//! ```json
//! {"version":"1","state":{"visible":true,"position":{"x":0.0,"y":0.0},
//!  "sizeTier":"medium","transparency":1.0}}
//! ```

use serde::{Deserialize, Serialize};

use crate::state::OverlayState;

pub const CURRENT_VERSION: &str = "1";

#[derive(Serialize, Deserialize, Debug)]
pub struct WireExport {
    pub version: String,
    pub state: OverlayState,
}

pub fn export_json(state: &OverlayState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WireExport {
        version: CURRENT_VERSION.to_string(),
        state: state.clone(),
    })
}

/// Parse an export. Accepts either the versioned envelope or a bare state
/// object; transparency is clamped on the way in.
pub fn import_json(json: &str) -> serde_json::Result<OverlayState> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Incoming {
        Envelope(WireExport),
        Bare(OverlayState),
    }

    match serde_json::from_str::<Incoming>(json)? {
        Incoming::Envelope(export) => {
            if export.version != CURRENT_VERSION {
                tracing::warn!(
                    "importing overlay state with version {} (current {CURRENT_VERSION})",
                    export.version
                );
            }
            Ok(export.state)
        }
        Incoming::Bare(state) => Ok(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::SizeTier;
    use crate::state::Position;

    #[test]
    fn test_export_shape() {
        let state = OverlayState::new(true, Position::new(1.0, 2.0), SizeTier::Small, 0.6);
        let json = export_json(&state).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1");
        assert_eq!(value["state"]["sizeTier"], "small");
        assert_eq!(value["state"]["position"]["y"], 2.0);
        assert_eq!(value["state"]["transparency"], 0.6);
    }

    #[test]
    fn test_import_roundtrip() {
        let state = OverlayState::new(false, Position::new(-3.5, 900.25), SizeTier::Large, 0.35);
        let json = export_json(&state).unwrap();
        assert_eq!(import_json(&json).unwrap(), state);
    }

    #[test]
    fn test_import_bare_state() {
        let json = r#"{"visible":true,"position":{"x":5.0,"y":6.0},"sizeTier":"large","transparency":1.0}"#;
        let state = import_json(json).unwrap();
        assert_eq!(state.size_tier, SizeTier::Large);
        assert_eq!(state.position, Position::new(5.0, 6.0));
    }

    #[test]
    fn test_import_clamps_transparency() {
        let json = r#"{"version":"1","state":{"transparency":9.0}}"#;
        assert_eq!(import_json(json).unwrap().transparency(), 1.0);
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(import_json("not json").is_err());
        assert!(import_json(r#"{"state":{"sizeTier":"enormous"}}"#).is_err());
    }
}
