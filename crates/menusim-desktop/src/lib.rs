//! Desktop simulation core for Menu Simulator
//!
//! This crate owns the fake desktop the player is stuck in:
//! - Window stack (z-order, drag capture, cascading close, global block)
//! - Toast channels that spawn on random timers and stack down the screen
//! - Milestone banners and progress popups
//! - A full-screen chat interrupt and a phone call with a typed transcript
//! - Hidden progress that creeps on its own and jumps with coworker activity
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Vec2`, `Rect`, `Size`) and frame style
//! - [`window`]: Windows, their content and the stack that orders them
//! - [`overlay`]: Timed overlays and the per-channel notification queues
//! - [`modal`]: The chat interrupt and the phone call machine
//! - [`progress`]: Progress, milestones and the activity feed
//! - [`input`]: Drag capture and input results
//! - [`render`]: The draw list handed to the host each frame
//!
//! ## Example
//!
//! ```rust
//! use menusim_desktop::{HostSignal, SimConfig, SimEngine, ContentPools};
//!
//! let config = SimConfig { seed: Some(7), ..SimConfig::default() };
//! let mut engine = SimEngine::new(config, ContentPools::builtin(), 0.0);
//! engine.spawn_default_desktop();
//!
//! for frame in 1..=60 {
//!     let signals = engine.tick(frame as f64 * 16.0);
//!     assert!(!signals.contains(&HostSignal::ProgressComplete));
//! }
//! let list = engine.draw_list();
//! assert!(!list.is_empty());
//! ```
//!
//! ## Design Principles
//!
//! 1. **Host-fed time**: The core never reads a clock; every frame carries a timestamp
//! 2. **Seeded randomness**: One `Pcg64Mcg` drives every roll, so a seed replays a session
//! 3. **Draw lists, not drawing**: Presentation is left entirely to the host

pub mod math;
pub mod window;
pub mod overlay;
pub mod modal;
pub mod progress;
pub mod input;
pub mod render;

mod clock;
mod config;
mod content;
mod engine;
mod error;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use math::{Rect, Size, Vec2, FRAME_STYLE, FrameStyle};
pub use window::{Window, WindowConfig, WindowContent, WindowId, WindowRegion, WindowStack};
pub use overlay::{Channel, NotificationCenter, OverlayEntity, OverlayKind, OverlayState, ToastPayload};
pub use modal::{CallPhase, ModalInterrupt, PhoneCallMachine};
pub use progress::{ProgressEngine, SessionStats, MILESTONES, PROGRESS_MAX};
pub use input::{DragState, InputOwner, InputResult, InputRouter, Key};
pub use render::{DrawItem, DrawList};

pub use clock::FrameClock;
pub use config::{ActivitySettings, CallTiming, ChannelSettings, Interval, SimConfig};
pub use content::{Caller, ContentPools, Mail, Message, ScriptLine, Speaker};
pub use engine::{HostSignal, SimEngine};
pub use error::{ConfigError, ContentError};
