//! Window management module
//!
//! Provides window lifecycle, hit testing, drag capture, z-order promotion
//! and the global block flag used while a modal owns input.

#[allow(clippy::module_inception)]
mod window;
mod config;
mod content;
mod region;
mod stack;

pub use window::Window;
pub use config::WindowConfig;
pub use content::{
    ActivityLog, DetailRequest, MailDetail, MailEntry, MailId, Mailbox, Reply, StaticArt,
    WindowContent, MAIL_ROW_HEIGHT,
};
pub use region::WindowRegion;
pub use stack::{WindowClick, WindowStack};

/// Unique window identifier
pub type WindowId = u64;
