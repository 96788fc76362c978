/// Lowest opacity the overlay may take while displayed.
pub const MIN_TRANSPARENCY: f64 = 0.2;

/// Fully opaque.
pub const MAX_TRANSPARENCY: f64 = 1.0;

/// Fraction of the display dimension inside which a release snaps to the edge.
pub const SNAP_MARGIN_RATIO: f64 = 0.10;

/// Edge length of the small tier, in density-independent pixels.
pub const SMALL_EDGE_DP: u32 = 48;

/// Edge length of the medium tier, in density-independent pixels.
pub const MEDIUM_EDGE_DP: u32 = 64;

/// Edge length of the large tier, in density-independent pixels.
pub const LARGE_EDGE_DP: u32 = 96;

/// Pixels per dp when the host reports nothing usable (mdpi baseline).
pub const DEFAULT_DENSITY: f64 = 1.0;
