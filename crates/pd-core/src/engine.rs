use crate::error::EngineError;
use crate::ports::{DisplayMetrics, StatePort, Surface};
use crate::size::SizeTier;
use crate::snap::{DisplaySize, snap_to_edges};
use crate::state::{OverlayState, Position};

/// Gesture state of the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase {
    Idle,
    /// Drag-start reference: where the overlay and the finger were at touch-down.
    Dragging {
        start_position: Position,
        start_touch: Position,
    },
}

impl DragPhase {
    pub fn name(&self) -> &'static str {
        match self {
            DragPhase::Idle => "idle",
            DragPhase::Dragging { .. } => "dragging",
        }
    }
}

/// Owns the overlay state and drives the surface from explicit input events.
///
/// Every mutation takes `&mut self`: one owner, one gesture at a time.
/// `on_drag_move` never touches the store; `end_drag` and the setters
/// persist synchronously on a best-effort basis.
pub struct OverlayEngine<S: StatePort, W: Surface> {
    store: S,
    surface: W,
    density: f64,
    state: OverlayState,
    /// Last state handed to the store; `cancel_drag` reverts to it.
    committed: OverlayState,
    phase: DragPhase,
}

impl<S: StatePort, W: Surface> OverlayEngine<S, W> {
    /// Load persisted state (or defaults) and bring the surface in line
    /// with it.
    pub fn start(store: S, surface: W, density: f64) -> Self {
        let mut engine = Self {
            store,
            surface,
            density,
            state: OverlayState::default(),
            committed: OverlayState::default(),
            phase: DragPhase::Idle,
        };
        let state = engine.load_state();
        engine.state = state.clone();
        engine.committed = state;
        engine.sync_surface();
        engine
    }

    /// Read the persisted state. Never fails: a missing record or a store
    /// error both yield defaults.
    pub fn load_state(&mut self) -> OverlayState {
        match self.store.load() {
            Ok(Some(state)) => {
                tracing::debug!(
                    "loaded overlay state: visible={}, size={}, alpha={:.2}",
                    state.visible,
                    state.size_tier,
                    state.transparency()
                );
                state
            }
            Ok(None) => {
                tracing::info!("no persisted overlay state, using defaults");
                OverlayState::default()
            }
            Err(e) => {
                tracing::warn!("failed to load overlay state, using defaults: {e}");
                OverlayState::default()
            }
        }
    }

    pub fn current_state(&self) -> &OverlayState {
        &self.state
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    /// Current rendered edge length in pixels (the overlay is square).
    pub fn rendered_edge_px(&self) -> f64 {
        f64::from(self.state.size_tier.edge_px(self.density))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn surface(&self) -> &W {
        &self.surface
    }

    // --- Settings commands (Idle only) ---

    pub fn set_visible(&mut self, visible: bool) -> Result<(), EngineError> {
        self.require_idle("set_visible")?;
        self.state.visible = visible;
        self.persist();
        if visible {
            self.surface.attach();
        } else {
            self.surface.detach();
        }
        Ok(())
    }

    pub fn set_size_tier(&mut self, tier: SizeTier) -> Result<(), EngineError> {
        self.require_idle("set_size_tier")?;
        self.state.size_tier = tier;
        self.persist();
        self.surface.resize_to(tier.edge_px(self.density));
        Ok(())
    }

    /// Out-of-range values are clamped, never rejected. Returns the
    /// transparency actually applied.
    pub fn set_transparency(&mut self, value: f64) -> Result<f64, EngineError> {
        self.require_idle("set_transparency")?;
        let applied = self.state.set_transparency(value);
        self.persist();
        self.surface.set_alpha(applied);
        Ok(applied)
    }

    /// Explicit placement from the settings layer. No snapping.
    pub fn set_position(&mut self, x: f64, y: f64) -> Result<(), EngineError> {
        self.require_idle("set_position")?;
        let position = finite_point("set_position", x, y)?;
        self.state.position = position;
        self.persist();
        self.surface.move_to(x, y);
        Ok(())
    }

    // --- Drag gesture ---

    pub fn begin_drag(&mut self, touch_x: f64, touch_y: f64) -> Result<(), EngineError> {
        self.require_idle("begin_drag")?;
        let start_touch = finite_point("begin_drag", touch_x, touch_y)?;
        self.phase = DragPhase::Dragging {
            start_position: self.state.position,
            start_touch,
        };
        Ok(())
    }

    /// Hot path: O(1), no persistence, no logging.
    /// Non-finite touches, or deltas that overflow, leave the overlay where
    /// it was.
    pub fn on_drag_move(&mut self, touch_x: f64, touch_y: f64) -> Result<Position, EngineError> {
        let DragPhase::Dragging {
            start_position,
            start_touch,
        } = self.phase
        else {
            return Err(self.violation("on_drag_move"));
        };
        finite_point("on_drag_move", touch_x, touch_y)?;
        let position =
            start_position.offset(touch_x - start_touch.x, touch_y - start_touch.y);
        finite_point("on_drag_move", position.x, position.y)?;
        self.state.position = position;
        self.surface.move_to(position.x, position.y);
        Ok(position)
    }

    /// Release: snap against the display, persist, and return to Idle.
    ///
    /// Non-positive dimensions abort the snap and put the overlay back at
    /// its pre-drag position without persisting anything.
    pub fn end_drag(
        &mut self,
        display_width: i64,
        display_height: i64,
    ) -> Result<OverlayState, EngineError> {
        let DragPhase::Dragging { start_position, .. } = self.phase else {
            return Err(self.violation("end_drag"));
        };
        let display = match DisplaySize::new(display_width, display_height) {
            Ok(display) => display,
            Err(e) => {
                tracing::warn!("drag released with bad display metrics, reverting: {e}");
                self.phase = DragPhase::Idle;
                self.state.position = start_position;
                self.surface.move_to(start_position.x, start_position.y);
                return Err(e);
            }
        };

        let edge = self.rendered_edge_px();
        let snapped = snap_to_edges(self.state.position, edge, edge, display);
        self.state.position = snapped;
        self.phase = DragPhase::Idle;
        self.persist();
        self.surface.move_to(snapped.x, snapped.y);
        Ok(self.state.clone())
    }

    /// [`OverlayEngine::end_drag`] with dimensions read from `metrics` at
    /// release time.
    pub fn end_drag_on(
        &mut self,
        metrics: &impl DisplayMetrics,
    ) -> Result<OverlayState, EngineError> {
        self.end_drag(metrics.display_width(), metrics.display_height())
    }

    /// Abandon the gesture, reverting to the last position the store
    /// accepted. A save that failed earlier is not reverted to.
    pub fn cancel_drag(&mut self) -> Result<(), EngineError> {
        if !self.is_dragging() {
            return Err(self.violation("cancel_drag"));
        }
        self.phase = DragPhase::Idle;
        self.state.position = self.committed.position;
        self.surface
            .move_to(self.state.position.x, self.state.position.y);
        Ok(())
    }

    // --- Internals ---

    fn require_idle(&self, operation: &'static str) -> Result<(), EngineError> {
        if self.is_dragging() {
            return Err(self.violation(operation));
        }
        Ok(())
    }

    fn violation(&self, operation: &'static str) -> EngineError {
        let err = EngineError::InvalidSequence {
            operation,
            phase: self.phase.name(),
        };
        tracing::warn!("{err}");
        err
    }

    /// Best-effort write. A failed save is logged and otherwise ignored.
    fn persist(&mut self) {
        match self.store.save(&self.state) {
            Ok(()) => self.committed = self.state.clone(),
            Err(e) => tracing::warn!("failed to persist overlay state: {e}"),
        }
    }

    fn sync_surface(&mut self) {
        let edge = self.state.size_tier.edge_px(self.density);
        self.surface.resize_to(edge);
        self.surface
            .move_to(self.state.position.x, self.state.position.y);
        self.surface.set_alpha(self.state.transparency());
        if self.state.visible {
            self.surface.attach();
        }
    }
}

/// Screen coordinates must be finite; NaN would slip through the snap
/// comparisons and infinities cannot be stored faithfully.
fn finite_point(operation: &'static str, x: f64, y: f64) -> Result<Position, EngineError> {
    if x.is_finite() && y.is_finite() {
        Ok(Position::new(x, y))
    } else {
        Err(EngineError::InvalidArgument(format!(
            "{operation}: coordinates must be finite, got ({x}, {y})"
        )))
    }
}
