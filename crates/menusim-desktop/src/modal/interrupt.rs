//! Full-screen chat interruption on a random timer

use log::info;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::Interval;
use crate::content::Message;
use crate::math::{Rect, Size, Vec2};

const CLOSE_BUTTON_SIZE: f32 = 40.0;
const CLOSE_BUTTON_INSET: f32 = 60.0;
const CLOSE_BUTTON_TOP: f32 = 20.0;

/// Outcome of a click while the interrupt may be showing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalClick {
    /// Not active, or the point is off the popup
    Ignored,
    /// Consumed without changing state
    Absorbed,
    /// Close affordance hit; the interrupt is now idle
    Closed,
}

/// Single-slot modal interruption
///
/// `Idle --(timer, not suppressed)--> Active --(close button)--> Idle`
#[derive(Clone, Debug)]
pub struct ModalInterrupt {
    active: bool,
    message: Option<Message>,
    opened_ms: Option<f64>,
    next_trigger_at: f64,
    interval: Interval,
    popup_rect: Rect,
    close_rect: Rect,
}

impl ModalInterrupt {
    pub fn new<R: Rng + ?Sized>(screen: Size, interval: Interval, now_ms: f64, rng: &mut R) -> Self {
        let popup_rect = Rect::new(0.0, 0.0, screen.width, screen.height);
        let close_rect = Rect::new(
            screen.width - CLOSE_BUTTON_INSET,
            CLOSE_BUTTON_TOP,
            CLOSE_BUTTON_SIZE,
            CLOSE_BUTTON_SIZE,
        );
        Self {
            active: false,
            message: None,
            opened_ms: None,
            next_trigger_at: now_ms + interval.sample(rng),
            interval,
            popup_rect,
            close_rect,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn opened_ms(&self) -> Option<f64> {
        self.opened_ms
    }

    #[inline]
    pub fn next_trigger_at(&self) -> f64 {
        self.next_trigger_at
    }

    pub fn popup_rect(&self) -> Rect {
        self.popup_rect
    }

    pub fn close_button_rect(&self) -> Rect {
        self.close_rect
    }

    /// Activate if the timer is due
    ///
    /// A due trigger that is suppressed (a call owns input) or has nothing to
    /// say is re-rolled from `now_ms` instead of firing late.
    pub fn try_trigger<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        pool: &[Message],
        suppressed: bool,
    ) -> bool {
        if self.active || now_ms < self.next_trigger_at {
            return false;
        }
        let picked = if suppressed { None } else { pool.choose(rng).cloned() };
        match picked {
            Some(message) => {
                info!("modal interrupt opened by {}", message.sender);
                self.message = Some(message);
                self.opened_ms = Some(now_ms);
                self.active = true;
                true
            }
            None => {
                self.reroll(now_ms, rng);
                false
            }
        }
    }

    /// Route a click; only the close affordance changes state
    pub fn handle_click<R: Rng + ?Sized>(&mut self, pos: Vec2, now_ms: f64, rng: &mut R) -> ModalClick {
        if !self.active {
            return ModalClick::Ignored;
        }
        if self.close_rect.contains(pos) {
            self.close(now_ms, rng);
            return ModalClick::Closed;
        }
        if self.popup_rect.contains(pos) {
            ModalClick::Absorbed
        } else {
            ModalClick::Ignored
        }
    }

    /// Close and schedule the next interruption; no-op when idle
    pub fn close<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.message = None;
        self.opened_ms = None;
        self.reroll(now_ms, rng);
        info!("modal interrupt closed; next at {:.0} ms", self.next_trigger_at);
        true
    }

    fn reroll<R: Rng + ?Sized>(&mut self, now_ms: f64, rng: &mut R) {
        self.next_trigger_at = now_ms + self.interval.sample(rng);
    }
}
