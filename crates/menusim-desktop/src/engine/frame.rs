//! Per-frame update
//!
//! Order matters: the call and modal settle first so that the block flag is
//! right before anything else reads it, and every overlay spawned this frame
//! is updated with the same timestamp it was created at.

use log::info;
use rand::seq::IndexedRandom;

use crate::math::{Rect, Size, Vec2, FRAME_STYLE};
use crate::overlay::{Channel, OverlayKind, ToastPayload};
use crate::progress::ActivityEvent;
use super::{HostSignal, SimEngine};

/// Milestone banner size, centered horizontally near the top
pub(crate) const BANNER_SIZE: Size = Size::new(600.0, 60.0);
pub(crate) const BANNER_TOP: f32 = 20.0;

/// Progress bar offset below the activity log title bar
const PROGRESS_BAR_OFFSET: f32 = 20.0;

impl SimEngine {
    /// Advance the simulation to the host timestamp `now_ms`
    ///
    /// Returns every signal raised since the last call, including those
    /// raised by input handlers in between.
    pub fn tick(&mut self, now_ms: f64) -> Vec<HostSignal> {
        let dt_ms = self.clock.advance(now_ms);
        let now_ms = self.clock.now_ms();

        if !self.complete {
            self.update_interrupts(now_ms);
            self.update_progress(now_ms, dt_ms);
        }

        self.notifications.update(now_ms);
        self.banners.update(now_ms);
        self.popups.update(now_ms);

        let progress = self.progress.progress();
        for window in self.windows.windows_mut() {
            window.content.update(dt_ms);
            if let Some(log) = window.content.as_activity_log_mut() {
                log.progress = progress;
            }
        }

        std::mem::take(&mut self.signals)
    }

    fn update_interrupts(&mut self, now_ms: f64) {
        self.call.update(now_ms, &mut self.rng);
        if self.call.take_ended() {
            self.signals.push(HostSignal::CallEnded);
        }

        let call_busy = self.call.blocks_input();
        if self
            .modal
            .try_trigger(now_ms, &mut self.rng, &self.content.modal_messages, call_busy)
        {
            self.signals.push(HostSignal::ModalOpened);
        }
        let modal_busy = self.modal.is_active();
        if self
            .call
            .try_trigger(now_ms, &mut self.rng, &self.content, modal_busy)
        {
            self.signals.push(HostSignal::CallIncoming);
        }

        self.apply_block();
    }

    fn update_progress(&mut self, now_ms: f64, dt_ms: f64) {
        self.progress.tick(dt_ms / 1000.0);

        if let Some(event) = self
            .activity
            .update(now_ms, &mut self.rng, &self.content.activities)
        {
            self.apply_activity(event, now_ms);
        }
        for _ in 0..self.activity.take_due_mail(now_ms) {
            self.send_congratulation(now_ms);
        }

        for threshold in self.progress.check_milestones() {
            self.show_milestone(threshold, now_ms);
        }

        if self.progress.take_completion() {
            info!("progress complete after {} interactions", self.progress.items_moved());
            self.complete = true;
            self.signals.push(HostSignal::ProgressComplete);
            return;
        }

        let spawned = self
            .notifications
            .try_spawn_all(now_ms, &mut self.rng, &self.content);
        for (channel, id) in spawned {
            if channel != Channel::Mail {
                continue;
            }
            let mail = self
                .notifications
                .queue(channel)
                .and_then(|q| q.get(id))
                .and_then(|e| e.payload())
                .and_then(|p| p.mail.clone());
            let Some(mail) = mail else {
                continue;
            };
            let mail_id = self.deliver_mail(mail);
            if let Some(payload) = self.notifications.payload_mut(channel, id) {
                payload.mail_id = mail_id;
            }
        }
    }

    /// Coworker did something: progress jumps, the team chat hears about it
    fn apply_activity(&mut self, event: ActivityEvent, now_ms: f64) {
        let applied = self.progress.credit_coworker(event.progress_gain);
        if applied > 0.0 {
            let anchor = self.progress_bar_anchor();
            self.popups.push(
                OverlayKind::ProgressPopup { amount: applied, anchor },
                now_ms,
                self.config.popup_grow_ms,
                self.config.popup_fade_ms,
                0.0,
            );
        }

        let payload = ToastPayload::new(Channel::Discord, self.content.coworker.clone(), event.text.clone());
        self.notifications.push(payload, now_ms);

        if let Some(log) = self
            .activity_window
            .and_then(|id| self.windows.get_mut(id))
            .and_then(|w| w.content.as_activity_log_mut())
        {
            log.push(event.text);
        }
    }

    fn send_congratulation(&mut self, now_ms: f64) {
        let Some(mail) = self.content.congratulations.choose(&mut self.rng).cloned() else {
            return;
        };
        let mail_id = self.deliver_mail(mail.clone());
        let payload = ToastPayload::new(Channel::Mail, mail.sender.clone(), mail.subject.clone())
            .with_mail(mail)
            .with_mail_id(mail_id);
        self.notifications.push(payload, now_ms);
    }

    fn show_milestone(&mut self, threshold: u32, now_ms: f64) {
        info!("milestone {}% reached", threshold);
        let text = self.content.milestone_text(threshold);
        self.banners.push(
            OverlayKind::MilestoneBanner { threshold, text },
            now_ms,
            self.config.banner_duration_ms,
            self.config.banner_fade_ms,
            0.0,
        );
        self.signals.push(HostSignal::MilestoneCrossed { threshold });
    }

    /// Screen rect of the milestone banner
    pub fn banner_rect(&self) -> Rect {
        let screen = self.config.screen;
        Rect::new(
            (screen.width - BANNER_SIZE.width) * 0.5,
            BANNER_TOP,
            BANNER_SIZE.width,
            BANNER_SIZE.height,
        )
    }

    /// Center of the progress bar in the activity log, or mid-screen
    pub(crate) fn progress_bar_anchor(&self) -> Vec2 {
        match self.activity_window.and_then(|id| self.windows.get(id)) {
            Some(window) => Vec2::new(
                window.position.x + window.size.width * 0.5,
                window.position.y + FRAME_STYLE.title_bar_height + PROGRESS_BAR_OFFSET,
            ),
            None => self.config.screen.as_vec2() * 0.5,
        }
    }
}
