//! Timed overlay entity
//!
//! Lifecycle is `Visible -> Dismissing -> Removed`, forward only. The
//! natural dismissal starts at the scheduled boundary `created + duration`
//! rather than at the frame that first observes it, so a long frame gap
//! never stretches an entity's lifetime.

use serde::Serialize;

use crate::content::Mail;
use crate::math::Vec2;
use crate::window::MailId;
use super::Channel;

/// Overlay identifier, unique across layers sharing an [`OverlayIds`](super::OverlayIds)
pub type OverlayId = u64;

/// Overlay lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayState {
    Visible,
    Dismissing,
    Removed,
}

/// What a toast carries back to the host when clicked
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToastPayload {
    pub channel: Channel,
    pub sender: String,
    pub text: String,
    /// Full mail to open in a detail window, when the toast has one
    pub mail: Option<Mail>,
    /// Inbox entry the mail was delivered to
    pub mail_id: Option<MailId>,
}

impl ToastPayload {
    pub fn new(channel: Channel, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel,
            sender: sender.into(),
            text: text.into(),
            mail: None,
            mail_id: None,
        }
    }

    pub fn with_mail(mut self, mail: Mail) -> Self {
        self.mail = Some(mail);
        self
    }

    pub fn with_mail_id(mut self, mail_id: Option<MailId>) -> Self {
        self.mail_id = mail_id;
        self
    }
}

/// Overlay flavour; drives the animation curve
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayKind {
    Toast(ToastPayload),
    MilestoneBanner { threshold: u32, text: String },
    ProgressPopup { amount: f64, anchor: Vec2 },
}

/// Per-frame animation values for the presentation layer
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OverlayVisuals {
    pub opacity: f32,
    pub scale: f32,
    pub slide_offset: f32,
}

/// A timed, animated, dismissible unit
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayEntity {
    pub id: OverlayId,
    pub kind: OverlayKind,
    pub created_ms: f64,
    pub duration_ms: f64,
    pub dismiss_duration_ms: f64,
    /// Horizontal slide reached at the end of dismissal
    pub slide_distance: f32,
    state: OverlayState,
    dismiss_started_ms: Option<f64>,
}

impl OverlayEntity {
    pub fn new(
        id: OverlayId,
        kind: OverlayKind,
        created_ms: f64,
        duration_ms: f64,
        dismiss_duration_ms: f64,
    ) -> Self {
        Self {
            id,
            kind,
            created_ms,
            duration_ms: duration_ms.max(0.0),
            dismiss_duration_ms: dismiss_duration_ms.max(0.0),
            slide_distance: 0.0,
            state: OverlayState::Visible,
            dismiss_started_ms: None,
        }
    }

    pub fn with_slide_distance(mut self, distance: f32) -> Self {
        self.slide_distance = distance;
        self
    }

    #[inline]
    pub fn state(&self) -> OverlayState {
        self.state
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.state == OverlayState::Visible
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.state == OverlayState::Removed
    }

    pub fn dismiss_started_ms(&self) -> Option<f64> {
        self.dismiss_started_ms
    }

    pub fn payload(&self) -> Option<&ToastPayload> {
        match &self.kind {
            OverlayKind::Toast(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn payload_mut(&mut self) -> Option<&mut ToastPayload> {
        match &mut self.kind {
            OverlayKind::Toast(payload) => Some(payload),
            _ => None,
        }
    }

    /// Advance the state machine to `now_ms`
    pub fn update(&mut self, now_ms: f64) {
        if self.state == OverlayState::Visible {
            let boundary = self.created_ms + self.duration_ms;
            if now_ms >= boundary {
                self.state = OverlayState::Dismissing;
                self.dismiss_started_ms = Some(boundary);
            }
        }
        if self.state == OverlayState::Dismissing {
            let started = self.dismiss_started_ms.unwrap_or(now_ms);
            if now_ms >= started + self.dismiss_duration_ms {
                self.state = OverlayState::Removed;
            }
        }
    }

    /// Start dismissing now (click); no-op unless visible
    pub fn dismiss(&mut self, now_ms: f64) -> bool {
        if self.state != OverlayState::Visible {
            return false;
        }
        self.state = OverlayState::Dismissing;
        self.dismiss_started_ms = Some(now_ms.max(self.created_ms));
        true
    }

    /// Fraction of the dismiss animation elapsed, 0 while visible
    pub fn dismiss_progress(&self, now_ms: f64) -> f32 {
        match self.state {
            OverlayState::Visible => 0.0,
            OverlayState::Removed => 1.0,
            OverlayState::Dismissing => {
                let started = self.dismiss_started_ms.unwrap_or(now_ms);
                if self.dismiss_duration_ms <= 0.0 {
                    return 1.0;
                }
                (((now_ms - started) / self.dismiss_duration_ms) as f32).clamp(0.0, 1.0)
            }
        }
    }

    /// Linear slide from 0 to `slide_distance` while dismissing
    pub fn slide_offset(&self, now_ms: f64) -> f32 {
        self.dismiss_progress(now_ms) * self.slide_distance
    }

    /// Animation values for the current kind
    pub fn visuals(&self, now_ms: f64) -> OverlayVisuals {
        let p = self.dismiss_progress(now_ms);
        match self.kind {
            OverlayKind::Toast(_) => OverlayVisuals {
                opacity: 1.0,
                scale: 1.0,
                slide_offset: p * self.slide_distance,
            },
            OverlayKind::MilestoneBanner { .. } => OverlayVisuals {
                opacity: 1.0 - p,
                scale: 1.0,
                slide_offset: 0.0,
            },
            OverlayKind::ProgressPopup { .. } => {
                if self.state == OverlayState::Visible {
                    // Grow in from half size while fading in
                    let t = if self.duration_ms <= 0.0 {
                        1.0
                    } else {
                        (((now_ms - self.created_ms) / self.duration_ms) as f32).clamp(0.0, 1.0)
                    };
                    OverlayVisuals {
                        opacity: t,
                        scale: 0.5 + 0.5 * t,
                        slide_offset: 0.0,
                    }
                } else {
                    OverlayVisuals {
                        opacity: 1.0 - p,
                        scale: 1.0 + 0.5 * p,
                        slide_offset: 0.0,
                    }
                }
            }
        }
    }
}
