use pd_core::Surface;

/// Headless stand-in for the OS overlay window. Traces every update and
/// keeps the edge length and move count the CLI reports.
#[derive(Debug, Default)]
pub struct TraceSurface {
    pub edge_px: u32,
    pub moves: usize,
}

impl Surface for TraceSurface {
    fn attach(&mut self) {
        tracing::debug!("surface attach");
    }

    fn detach(&mut self) {
        tracing::debug!("surface detach");
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.moves += 1;
        tracing::trace!("surface move_to ({x:.1}, {y:.1})");
    }

    fn resize_to(&mut self, edge_px: u32) {
        self.edge_px = edge_px;
        tracing::debug!("surface resize_to {edge_px}px");
    }

    fn set_alpha(&mut self, alpha: f64) {
        tracing::debug!("surface set_alpha {alpha:.2}");
    }
}
