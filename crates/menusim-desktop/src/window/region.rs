//! Window region for hit testing

use serde::Serialize;

/// Region of a window for hit testing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowRegion {
    /// Title bar area (for dragging)
    TitleBar,
    /// Content area (delegated to the hosted content)
    Content,
    /// Close button
    CloseButton,
    /// Minimize button
    MinimizeButton,
}

impl WindowRegion {
    /// Check if this is a title bar button
    #[inline]
    pub fn is_button(&self) -> bool {
        matches!(self, WindowRegion::CloseButton | WindowRegion::MinimizeButton)
    }

    /// Get CSS cursor style for this region
    pub fn cursor(&self) -> &'static str {
        match self {
            WindowRegion::TitleBar => "move",
            WindowRegion::Content => "default",
            WindowRegion::CloseButton | WindowRegion::MinimizeButton => "pointer",
        }
    }
}
