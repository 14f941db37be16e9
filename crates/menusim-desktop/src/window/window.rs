//! Window struct and chrome geometry

use crate::math::{Rect, Size, Vec2, FRAME_STYLE};
use super::{WindowContent, WindowId, WindowRegion};

/// A draggable, z-ordered surface on the simulated desktop
#[derive(Clone, Debug)]
pub struct Window {
    /// Unique identifier
    pub id: WindowId,
    /// Window title
    pub title: String,
    /// Top-left corner in screen pixels
    pub position: Vec2,
    /// Window size including frame
    pub size: Size,
    /// Z-order (higher = on top)
    pub z_index: i64,
    /// Interaction disabled while a modal owns input
    pub blocked: bool,
    /// Title bar drag in progress
    pub dragging: bool,
    /// Pointer offset from `position` captured when the drag started
    pub drag_offset: Vec2,
    /// Hosted content
    pub content: WindowContent,
    /// Source window this one was derived from; closing the parent closes it
    pub parent: Option<WindowId>,
}

impl Window {
    /// Get the window's bounding rectangle
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Get the title bar rectangle
    pub fn title_bar_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.size.width,
            FRAME_STYLE.title_bar_height,
        )
    }

    /// Get the content area rectangle (excludes title bar)
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y + FRAME_STYLE.title_bar_height,
            self.size.width,
            (self.size.height - FRAME_STYLE.title_bar_height).max(0.0),
        )
    }

    /// Get the close button rectangle
    pub fn close_button_rect(&self) -> Rect {
        Rect::new(
            self.position.x + self.size.width - FRAME_STYLE.close_button_inset,
            self.position.y + FRAME_STYLE.button_top,
            FRAME_STYLE.button_size,
            FRAME_STYLE.button_size,
        )
    }

    /// Get the minimize button rectangle (left of close)
    pub fn minimize_button_rect(&self) -> Rect {
        let close = self.close_button_rect();
        Rect::new(
            close.x - FRAME_STYLE.button_spacing - FRAME_STYLE.button_size,
            close.y,
            FRAME_STYLE.button_size,
            FRAME_STYLE.button_size,
        )
    }

    /// Which part of this window is under `pos`, ignoring `blocked`
    pub fn region_at(&self, pos: Vec2) -> Option<WindowRegion> {
        if !self.rect().contains(pos) {
            return None;
        }
        if self.close_button_rect().contains(pos) {
            return Some(WindowRegion::CloseButton);
        }
        if self.minimize_button_rect().contains(pos) {
            return Some(WindowRegion::MinimizeButton);
        }
        if self.title_bar_rect().contains(pos) {
            return Some(WindowRegion::TitleBar);
        }
        Some(WindowRegion::Content)
    }

    /// Capture the click-time offset and start dragging
    pub(crate) fn begin_drag(&mut self, pointer: Vec2) {
        self.dragging = true;
        self.drag_offset = pointer - self.position;
    }

    /// Move so the captured offset stays under the pointer
    pub(crate) fn drag_to(&mut self, pointer: Vec2) {
        if self.dragging {
            self.position = pointer - self.drag_offset;
        }
    }

    pub(crate) fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Forward a click to the content in content-local coordinates
    pub(crate) fn click_content(&mut self, pos: Vec2) -> bool {
        let area = self.content_rect();
        let local = pos - area.position();
        self.content.handle_click(local, Size::new(area.width, area.height))
    }
}
