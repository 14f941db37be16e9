//! Input result type

use serde::Serialize;
use crate::window::WindowId;

/// Layer that consumed a pointer event, in priority order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputOwner {
    Modal,
    Call,
    Toast,
    Window,
}

/// Result of input handling
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputResult {
    /// Input was consumed
    Handled {
        owner: InputOwner,
        /// Window involved, when a window consumed it
        window_id: Option<WindowId>,
    },
    /// Input was not handled (pass through to the desktop)
    Unhandled,
}

impl InputResult {
    pub(crate) fn by(owner: InputOwner) -> Self {
        InputResult::Handled {
            owner,
            window_id: None,
        }
    }

    pub(crate) fn by_window(window_id: WindowId) -> Self {
        InputResult::Handled {
            owner: InputOwner::Window,
            window_id: Some(window_id),
        }
    }

    /// Check if input was handled
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, InputResult::Handled { .. })
    }

    /// Layer that consumed the event
    pub fn owner(&self) -> Option<InputOwner> {
        match self {
            InputResult::Handled { owner, .. } => Some(*owner),
            InputResult::Unhandled => None,
        }
    }
}
