//! Overlay placement engine for the desktop pet.
//!
//! Owns the on-screen position, size tier, transparency and visibility of a
//! single floating element. Raw touch coordinates go in as explicit drag
//! events; position, size and alpha updates come out through the [`Surface`]
//! port, and state is persisted through the [`StatePort`].
//!
//! Zero I/O — persistence and windowing are injected by the host.

pub mod constants;
pub mod engine;
pub mod error;
pub mod ports;
pub mod size;
pub mod snap;
pub mod state;
pub mod wire;

pub use constants::{
    DEFAULT_DENSITY, LARGE_EDGE_DP, MAX_TRANSPARENCY, MEDIUM_EDGE_DP, MIN_TRANSPARENCY,
    SMALL_EDGE_DP, SNAP_MARGIN_RATIO,
};
pub use engine::{DragPhase, OverlayEngine};
pub use error::EngineError;
pub use ports::{DisplayMetrics, MemoryStatePort, StatePort, Surface};
pub use size::SizeTier;
pub use snap::{DisplaySize, snap_axis, snap_to_edges};
pub use state::{OverlayState, Position, clamp_transparency};
pub use wire::{CURRENT_VERSION, export_json, import_json};
