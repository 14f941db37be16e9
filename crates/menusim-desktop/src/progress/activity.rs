//! Coworker activity feed
//!
//! Every few seconds the coworker "does something": one line shows for a
//! while, progress jumps by a random amount, and a congratulatory mail
//! follows shortly after.

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::ActivitySettings;

/// One activity, yielded once when it starts
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityEvent {
    pub text: String,
    /// Discrete progress to apply, in percent
    pub progress_gain: f64,
}

#[derive(Clone, Debug)]
pub struct ActivityFeed {
    settings: ActivitySettings,
    current: Option<(String, f64)>,
    next_at: f64,
    pending_mail_at: Vec<f64>,
}

impl ActivityFeed {
    pub fn new<R: Rng + ?Sized>(settings: ActivitySettings, now_ms: f64, rng: &mut R) -> Self {
        Self {
            next_at: now_ms + settings.interval_ms.sample(rng),
            settings,
            current: None,
            pending_mail_at: Vec::new(),
        }
    }

    /// Line currently on screen
    pub fn current(&self) -> Option<&str> {
        self.current.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn next_at(&self) -> f64 {
        self.next_at
    }

    /// Expire the shown line and start a new activity when due
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        pool: &[String],
    ) -> Option<ActivityEvent> {
        if let Some((_, shown_at)) = &self.current {
            if now_ms - shown_at >= self.settings.show_ms {
                self.current = None;
            }
        }
        if self.current.is_some() || now_ms < self.next_at {
            return None;
        }

        self.next_at = now_ms + self.settings.interval_ms.sample(rng);
        let text = pool.choose(rng)?.clone();
        let progress_gain = self.settings.gain.sample(rng);
        self.pending_mail_at
            .push(now_ms + self.settings.mail_delay_ms.sample(rng));
        self.current = Some((text.clone(), now_ms));

        debug!("activity: {} (+{:.1}%)", text, progress_gain);
        Some(ActivityEvent { text, progress_gain })
    }

    /// Number of follow-up mails now due; each is reported once
    pub fn take_due_mail(&mut self, now_ms: f64) -> usize {
        let before = self.pending_mail_at.len();
        self.pending_mail_at.retain(|&at| now_ms < at);
        before - self.pending_mail_at.len()
    }
}
