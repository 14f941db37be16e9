//! Window configuration for creation

use crate::math::{Size, Vec2};
use super::{WindowContent, WindowId};

/// Configuration for creating a window
#[derive(Clone, Debug, Default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial position (None = auto-cascade)
    pub position: Option<Vec2>,
    /// Initial size
    pub size: Size,
    /// Hosted content
    pub content: WindowContent,
    /// Source window; closing it closes this one too
    pub parent: Option<WindowId>,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, size: Size, content: WindowContent) -> Self {
        Self {
            title: title.into(),
            size,
            content,
            ..Default::default()
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    pub fn child_of(mut self, parent: WindowId) -> Self {
        self.parent = Some(parent);
        self
    }
}
