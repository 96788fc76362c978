//! Edge-snap policy applied when a drag is released.

use crate::constants::SNAP_MARGIN_RATIO;
use crate::error::EngineError;
use crate::state::Position;

/// Validated display dimensions in pixels. Both sides are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySize {
    width: u32,
    height: u32,
}

impl DisplaySize {
    pub fn new(width: i64, height: i64) -> Result<Self, EngineError> {
        if width <= 0 || height <= 0 {
            return Err(EngineError::InvalidArgument(format!(
                "display dimensions must be positive, got {width}x{height}"
            )));
        }
        let width = u32::try_from(width).map_err(|_| {
            EngineError::InvalidArgument(format!("display width {width} out of range"))
        })?;
        let height = u32::try_from(height).map_err(|_| {
            EngineError::InvalidArgument(format!("display height {height} out of range"))
        })?;
        Ok(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

/// Snap one axis. `extent` is the overlay's rendered length along the axis,
/// `span` the display length.
///
/// Within `SNAP_MARGIN_RATIO * span` of the leading edge → 0.
/// Past `span - extent - margin` → flush with the trailing edge.
/// Anything between is left where it was released.
pub fn snap_axis(coord: f64, extent: f64, span: f64) -> f64 {
    let margin = SNAP_MARGIN_RATIO * span;
    if coord < margin {
        0.0
    } else if coord > span - extent - margin {
        span - extent
    } else {
        coord
    }
}

/// Snap both axes independently; a release near a corner snaps to both edges.
pub fn snap_to_edges(position: Position, width: f64, height: f64, display: DisplaySize) -> Position {
    Position::new(
        snap_axis(position.x, width, f64::from(display.width())),
        snap_axis(position.y, height, f64::from(display.height())),
    )
}
