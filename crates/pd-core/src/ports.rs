//! Seams between the engine and its host: persistence, the OS windowing
//! surface, and display metrics.

use std::convert::Infallible;
use std::fmt;

use crate::state::OverlayState;

/// Persistence for the single overlay state of an installation.
pub trait StatePort {
    type Error: fmt::Display;

    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&mut self) -> Result<Option<OverlayState>, Self::Error>;

    fn save(&mut self, state: &OverlayState) -> Result<(), Self::Error>;
}

/// OS window the overlay is rendered into. Calls are fire-and-forget.
pub trait Surface {
    fn attach(&mut self);
    fn detach(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn resize_to(&mut self, edge_px: u32);
    fn set_alpha(&mut self, alpha: f64);
}

/// Current display dimensions, queried when a drag is released.
pub trait DisplayMetrics {
    fn display_width(&self) -> i64;
    fn display_height(&self) -> i64;
}

impl<T: DisplayMetrics + ?Sized> DisplayMetrics for &T {
    fn display_width(&self) -> i64 {
        (**self).display_width()
    }

    fn display_height(&self) -> i64 {
        (**self).display_height()
    }
}

/// Non-durable [`StatePort`] holding the last saved state in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStatePort {
    saved: Option<OverlayState>,
    saves: usize,
}

impl MemoryStatePort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded as if `state` had been persisted by an earlier session.
    pub fn with_state(state: OverlayState) -> Self {
        Self {
            saved: Some(state),
            saves: 0,
        }
    }

    pub fn saved(&self) -> Option<&OverlayState> {
        self.saved.as_ref()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StatePort for MemoryStatePort {
    type Error = Infallible;

    fn load(&mut self) -> Result<Option<OverlayState>, Self::Error> {
        Ok(self.saved.clone())
    }

    fn save(&mut self, state: &OverlayState) -> Result<(), Self::Error> {
        self.saved = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::SizeTier;
    use crate::state::Position;

    #[test]
    fn test_memory_port_roundtrip() {
        let mut port = MemoryStatePort::new();
        assert_eq!(port.load().unwrap(), None);

        let state = OverlayState::new(false, Position::new(12.5, 99.0), SizeTier::Large, 0.4);
        port.save(&state).unwrap();

        assert_eq!(port.load().unwrap(), Some(state));
        assert_eq!(port.save_count(), 1);
    }
}
