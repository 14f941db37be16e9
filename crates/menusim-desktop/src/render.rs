//! Draw-list output
//!
//! The core never draws. Each frame it hands the host an ordered list of
//! primitives; the host paints them front to back in list order.

use serde::Serialize;

use crate::content::Caller;
use crate::math::{Rect, Vec2};
use crate::modal::TranscriptLine;
use crate::overlay::{Channel, OverlayId, OverlayVisuals};
use crate::window::{WindowContent, WindowId};

/// One paintable primitive
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawItem {
    Background {
        rect: Rect,
    },
    Window {
        id: WindowId,
        title: String,
        rect: Rect,
        title_bar: Rect,
        close_button: Rect,
        minimize_button: Rect,
        z_index: i64,
        blocked: bool,
        content: WindowContent,
    },
    /// Coworker activity line in the top-left corner
    ActivityLine {
        rect: Rect,
        text: String,
    },
    Toast {
        id: OverlayId,
        channel: Channel,
        rect: Rect,
        sender: String,
        text: String,
        visuals: OverlayVisuals,
    },
    Banner {
        id: OverlayId,
        rect: Rect,
        text: String,
        visuals: OverlayVisuals,
    },
    ProgressPopup {
        id: OverlayId,
        center: Vec2,
        text: String,
        visuals: OverlayVisuals,
    },
    CallRinging {
        rect: Rect,
        caller: Caller,
        answer_button: Rect,
        hang_up_button: Rect,
    },
    CallPanel {
        rect: Rect,
        title_bar: Rect,
        hang_up_button: Rect,
        caller: Caller,
        transcript: Vec<TranscriptLine>,
    },
    Modal {
        rect: Rect,
        close_button: Rect,
        sender: String,
        text: String,
    },
}

/// Ordered paint list for one frame, back to front
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DrawList {
    pub items: Vec<DrawItem>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: DrawItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawItem> {
        self.items.iter()
    }

    /// Window ids in paint order
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.items
            .iter()
            .filter_map(|item| match item {
                DrawItem::Window { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Serialize for a JS host
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
