//! Drag state for input operations

use crate::math::Vec2;
use crate::window::WindowId;

/// The single drag capture, if any
#[derive(Clone, Debug, PartialEq)]
pub enum DragState {
    /// Moving a window by its title bar
    MoveWindow {
        /// Window being moved
        window_id: WindowId,
        /// Offset from window origin to cursor
        offset: Vec2,
    },
    /// Moving the phone conversation panel by its title strip
    MoveCallPanel {
        /// Offset from panel origin to cursor
        offset: Vec2,
    },
}

impl DragState {
    /// Check if this is a window move operation
    #[inline]
    pub fn is_window_move(&self) -> bool {
        matches!(self, DragState::MoveWindow { .. })
    }

    /// Check if this is a call panel move operation
    #[inline]
    pub fn is_panel_move(&self) -> bool {
        matches!(self, DragState::MoveCallPanel { .. })
    }

    /// Get the window ID if this is a window operation
    pub fn window_id(&self) -> Option<WindowId> {
        match self {
            DragState::MoveWindow { window_id, .. } => Some(*window_id),
            DragState::MoveCallPanel { .. } => None,
        }
    }
}
