use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DENSITY, LARGE_EDGE_DP, MEDIUM_EDGE_DP, SMALL_EDGE_DP};
use crate::error::EngineError;

/// Discrete size preset for the overlay. The overlay is square, so a tier
/// maps to a single edge length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    Small,
    #[default]
    Medium,
    Large,
}

impl SizeTier {
    pub const ALL: [SizeTier; 3] = [SizeTier::Small, SizeTier::Medium, SizeTier::Large];

    /// Edge length in density-independent pixels.
    pub fn edge_dp(self) -> u32 {
        match self {
            SizeTier::Small => SMALL_EDGE_DP,
            SizeTier::Medium => MEDIUM_EDGE_DP,
            SizeTier::Large => LARGE_EDGE_DP,
        }
    }

    /// Edge length in physical pixels for the given display density,
    /// rounded to the nearest whole pixel.
    /// Non-finite or non-positive densities fall back to [`DEFAULT_DENSITY`].
    pub fn edge_px(self, density: f64) -> u32 {
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            DEFAULT_DENSITY
        };
        (f64::from(self.edge_dp()) * density).round() as u32
    }

    /// Stable storage ordinal.
    pub fn ordinal(self) -> i64 {
        match self {
            SizeTier::Small => 0,
            SizeTier::Medium => 1,
            SizeTier::Large => 2,
        }
    }

    /// Inverse of [`SizeTier::ordinal`]. Unknown ordinals read back as Medium.
    pub fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            0 => SizeTier::Small,
            2 => SizeTier::Large,
            _ => SizeTier::Medium,
        }
    }

    /// Settings-screen parsing: anything that isn't "small" or "large"
    /// selects Medium.
    pub fn from_name_lenient(name: &str) -> Self {
        name.parse().unwrap_or(SizeTier::Medium)
    }

    pub fn name(self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        }
    }
}

impl fmt::Display for SizeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SizeTier {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeTier::Small),
            "medium" => Ok(SizeTier::Medium),
            "large" => Ok(SizeTier::Large),
            other => Err(EngineError::InvalidArgument(format!(
                "unknown size tier '{other}' (expected small, medium or large)"
            ))),
        }
    }
}
