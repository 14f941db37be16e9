//! Core geometry types for the simulated desktop
//!
//! Everything lives in screen space: the desktop has no camera, so window,
//! overlay and pointer coordinates are all the same pixels.

mod vec2;
mod rect;
mod size;
mod style;

pub use vec2::Vec2;
pub use rect::Rect;
pub use size::Size;
pub use style::{FrameStyle, FRAME_STYLE};
