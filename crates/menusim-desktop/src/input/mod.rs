//! Input routing module
//!
//! Tracks the single drag capture and reports which layer consumed a
//! pointer event.

mod router;
mod drag;
mod result;

pub use router::InputRouter;
pub use drag::DragState;
pub use result::{InputOwner, InputResult};

/// Keys the simulation reacts to; anything else is unhandled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Cycle window focus
    Tab,
    Other,
}

impl Key {
    /// Map a DOM-style key name
    pub fn from_name(name: &str) -> Self {
        match name {
            "Tab" => Key::Tab,
            _ => Key::Other,
        }
    }
}
