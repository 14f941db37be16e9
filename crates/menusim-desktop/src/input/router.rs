//! Input router state machine

use crate::math::Vec2;
use crate::window::WindowId;
use super::DragState;

/// Input router tracking the one drag capture allowed system-wide
pub struct InputRouter {
    /// Current drag state
    drag: Option<DragState>,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputRouter {
    /// Create a new input router
    pub fn new() -> Self {
        Self { drag: None }
    }

    /// Get current drag state
    #[inline]
    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Check if currently dragging
    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start window move operation, replacing any previous capture
    pub fn start_window_move(&mut self, window_id: WindowId, offset: Vec2) {
        self.drag = Some(DragState::MoveWindow { window_id, offset });
    }

    /// Start call panel move operation, replacing any previous capture
    pub fn start_panel_move(&mut self, offset: Vec2) {
        self.drag = Some(DragState::MoveCallPanel { offset });
    }

    /// End current drag operation
    pub fn end_drag(&mut self) {
        self.drag = None;
    }
}
