//! Timed overlays: toasts, milestone banners and progress popups
//!
//! Every overlay is an [`OverlayEntity`] living in an [`OverlayLayer`].
//! Toasts are grouped per [`Channel`] in a [`ChannelNotificationQueue`], and
//! the queues are chained down the screen by the [`NotificationCenter`].

mod entity;
mod layer;
mod queue;
mod center;

use serde::{Deserialize, Serialize};

pub use entity::{OverlayEntity, OverlayId, OverlayKind, OverlayState, OverlayVisuals, ToastPayload};
pub use layer::{OverlayIds, OverlayLayer};
pub use queue::ChannelNotificationQueue;
pub use center::NotificationCenter;

/// A simulated communication app that sends toasts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Mail,
    /// Team chat; fed only by coworker activity
    Discord,
    /// Personal messages
    Messages,
    Slack,
}

impl Channel {
    /// Stacking order, top of screen first
    pub const ALL: [Channel; 4] = [Channel::Mail, Channel::Discord, Channel::Messages, Channel::Slack];

    pub(crate) fn interval_field(self) -> &'static str {
        match self {
            Channel::Mail => "mail.spawn_interval_ms",
            Channel::Discord => "discord.spawn_interval_ms",
            Channel::Messages => "messages.spawn_interval_ms",
            Channel::Slack => "slack.spawn_interval_ms",
        }
    }
}
