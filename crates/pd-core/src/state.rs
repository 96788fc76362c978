use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{MAX_TRANSPARENCY, MIN_TRANSPARENCY};
use crate::size::SizeTier;

/// Top-left anchor of the overlay in screen pixels, relative to the
/// top-left corner of the display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Translate by a delta.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Clamp an opacity into `[MIN_TRANSPARENCY, MAX_TRANSPARENCY]`.
/// NaN is treated as fully opaque.
pub fn clamp_transparency(value: f64) -> f64 {
    if value.is_nan() {
        return MAX_TRANSPARENCY;
    }
    value.clamp(MIN_TRANSPARENCY, MAX_TRANSPARENCY)
}

fn deserialize_transparency<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_transparency)
}

fn default_transparency() -> f64 {
    MAX_TRANSPARENCY
}

fn default_visible() -> bool {
    true
}

/// Process-wide overlay state. Transparency is kept private so that every
/// path that builds or mutates a state goes through [`clamp_transparency`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OverlayState {
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size_tier: SizeTier,
    #[serde(
        default = "default_transparency",
        deserialize_with = "deserialize_transparency"
    )]
    transparency: f64,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            visible: true,
            position: Position::default(),
            size_tier: SizeTier::Medium,
            transparency: MAX_TRANSPARENCY,
        }
    }
}

impl OverlayState {
    pub fn new(visible: bool, position: Position, size_tier: SizeTier, transparency: f64) -> Self {
        Self {
            visible,
            position,
            size_tier,
            transparency: clamp_transparency(transparency),
        }
    }

    pub fn transparency(&self) -> f64 {
        self.transparency
    }

    /// Store `value` clamped; returns the value actually stored.
    pub fn set_transparency(&mut self, value: f64) -> f64 {
        self.transparency = clamp_transparency(value);
        self.transparency
    }
}
