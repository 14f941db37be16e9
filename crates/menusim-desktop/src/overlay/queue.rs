//! Per-channel toast queue

use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::config::ChannelSettings;
use crate::content::{Mail, Message};
use crate::math::{Rect, Vec2};
use super::{Channel, OverlayEntity, OverlayId, OverlayIds, OverlayKind, OverlayLayer, ToastPayload};

/// One channel's toasts: random spawn timer plus vertical stacking
///
/// Dismissing toasts keep their full slot until they are removed; the
/// slide-out is visual only.
#[derive(Clone, Debug)]
pub struct ChannelNotificationQueue {
    channel: Channel,
    settings: ChannelSettings,
    width: f32,
    slide_distance: f32,
    layer: OverlayLayer,
    next_spawn_at: Option<f64>,
    origin: Vec2,
}

impl ChannelNotificationQueue {
    /// Create a queue, rolling the first spawn time when the channel is timed
    pub fn new<R: Rng + ?Sized>(
        channel: Channel,
        settings: ChannelSettings,
        width: f32,
        slide_distance: f32,
        now_ms: f64,
        rng: &mut R,
    ) -> Self {
        let next_spawn_at = settings
            .spawn_interval_ms
            .map(|interval| now_ms + interval.sample(rng));
        Self {
            channel,
            settings,
            width,
            slide_distance,
            layer: OverlayLayer::new(),
            next_spawn_at,
            origin: Vec2::ZERO,
        }
    }

    /// Draw toast ids from a counter shared with other layers
    pub fn with_ids(mut self, ids: &OverlayIds) -> Self {
        self.layer = OverlayLayer::sharing(ids);
        self
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// `None` for manual-only channels
    #[inline]
    pub fn next_spawn_at(&self) -> Option<f64> {
        self.next_spawn_at
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Spawn from `pool` if the timer is due, then re-roll it
    ///
    /// An empty pool still re-rolls, so the queue stays silent without
    /// re-checking every frame.
    pub fn try_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        pool: &[Message],
    ) -> Option<OverlayId> {
        let due = self.next_spawn_at?;
        if now_ms < due {
            return None;
        }
        if let Some(interval) = self.settings.spawn_interval_ms {
            self.next_spawn_at = Some(now_ms + interval.sample(rng));
        }

        let message = pool.choose(rng)?;
        let mut payload = ToastPayload::new(self.channel, message.sender.clone(), message.text.clone());
        if self.channel == Channel::Mail {
            payload = payload.with_mail(Mail {
                sender: message.sender.clone(),
                subject: message.text.clone(),
                body: String::new(),
                responses: Vec::new(),
            });
        }
        let id = self.push(payload, now_ms);
        debug!("{:?} toast spawned from {}", self.channel, message.sender);
        Some(id)
    }

    /// Manually append a toast
    pub fn push(&mut self, payload: ToastPayload, now_ms: f64) -> OverlayId {
        self.layer.push(
            OverlayKind::Toast(payload),
            now_ms,
            self.settings.duration_ms,
            self.settings.dismiss_duration_ms,
            self.slide_distance,
        )
    }

    /// Advance states and purge removed toasts
    pub fn update(&mut self, now_ms: f64) -> usize {
        self.layer.update(now_ms)
    }

    /// Slot rect of every live toast in arrival order
    pub fn layout(&self) -> Vec<(OverlayId, Rect)> {
        let step = self.settings.slot_step();
        self.layer
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entity)| {
                let rect = Rect::new(
                    self.origin.x,
                    self.origin.y + i as f32 * step,
                    self.width,
                    self.settings.entry_height,
                );
                (entity.id, rect)
            })
            .collect()
    }

    /// Total vertical space the queue occupies, including dismissing toasts
    pub fn stack_height(&self) -> f32 {
        self.layer.len() as f32 * self.settings.slot_step()
    }

    /// Dismiss the first visible toast under `pos` and return its payload
    pub fn handle_click(&mut self, pos: Vec2, now_ms: f64) -> Option<ToastPayload> {
        let hit = self.layout().into_iter().find(|(id, rect)| {
            rect.contains(pos) && self.layer.get(*id).is_some_and(|e| e.is_visible())
        });
        let (id, _) = hit?;
        self.layer.dismiss(id, now_ms);
        self.layer.get(id).and_then(|e| e.payload().cloned())
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayEntity> {
        self.layer.get(id)
    }

    pub fn payload_mut(&mut self, id: OverlayId) -> Option<&mut ToastPayload> {
        self.layer.get_mut(id)?.payload_mut()
    }

    pub fn entries(&self) -> &[OverlayEntity] {
        self.layer.entries()
    }

    pub fn len(&self) -> usize {
        self.layer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Interval, SimConfig};
    use crate::overlay::OverlayState;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn pool() -> Vec<Message> {
        vec![Message::new("jar", "lunch?")]
    }

    fn mail_queue(rng: &mut Pcg64Mcg) -> ChannelNotificationQueue {
        let config = SimConfig::default();
        ChannelNotificationQueue::new(Channel::Mail, config.mail.clone(), 350.0, 400.0, 0.0, rng)
    }

    #[test]
    fn test_first_spawn_rolled_in_range() {
        let mut rng = Pcg64Mcg::seed_from_u64(9);
        let queue = mail_queue(&mut rng);
        let at = queue.next_spawn_at().unwrap();
        assert!((8000.0..=15000.0).contains(&at));
    }

    #[test]
    fn test_try_spawn_respects_timer_and_rerolls() {
        let mut rng = Pcg64Mcg::seed_from_u64(9);
        let mut queue = mail_queue(&mut rng);
        let due = queue.next_spawn_at().unwrap();

        assert!(queue.try_spawn(due - 1.0, &mut rng, &pool()).is_none());
        assert!(queue.try_spawn(due, &mut rng, &pool()).is_some());
        assert_eq!(queue.len(), 1);

        let next = queue.next_spawn_at().unwrap();
        assert!(next >= due + 8000.0 && next <= due + 15000.0);
        assert!(queue.try_spawn(due + 1.0, &mut rng, &pool()).is_none());
    }

    #[test]
    fn test_empty_pool_never_spawns() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let mut queue = mail_queue(&mut rng);
        for step in 0..100 {
            queue.try_spawn(step as f64 * 5000.0, &mut rng, &[]);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_manual_channel_has_no_timer() {
        let mut rng = Pcg64Mcg::seed_from_u64(3);
        let config = SimConfig::default();
        let mut queue =
            ChannelNotificationQueue::new(Channel::Discord, config.discord.clone(), 350.0, 400.0, 0.0, &mut rng);
        assert!(queue.next_spawn_at().is_none());
        assert!(queue.try_spawn(1.0e9, &mut rng, &pool()).is_none());

        queue.push(ToastPayload::new(Channel::Discord, "calvelli", "did a thing"), 0.0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_layout_keeps_dismissing_slots() {
        let mut rng = Pcg64Mcg::seed_from_u64(1);
        let mut settings = SimConfig::default().messages;
        settings.spawn_interval_ms = Some(Interval::new(1000.0, 1000.0));
        let mut queue =
            ChannelNotificationQueue::new(Channel::Messages, settings, 350.0, 400.0, 0.0, &mut rng);
        queue.set_origin(Vec2::new(1550.0, 70.0));

        queue.push(ToastPayload::new(Channel::Messages, "a", "1"), 0.0);
        queue.push(ToastPayload::new(Channel::Messages, "b", "2"), 0.0);
        queue.push(ToastPayload::new(Channel::Messages, "c", "3"), 0.0);

        // Click the middle one; it keeps its slot while sliding out
        let payload = queue.handle_click(Vec2::new(1600.0, 70.0 + 90.0 + 10.0), 100.0).unwrap();
        assert_eq!(payload.sender, "b");
        assert_eq!(queue.entries()[1].state(), OverlayState::Dismissing);

        let layout = queue.layout();
        assert_eq!(layout.len(), 3);
        assert!((layout[2].1.y - (70.0 + 180.0)).abs() < 0.001);
        assert!((queue.stack_height() - 270.0).abs() < 0.001);

        // A dismissing toast no longer takes clicks
        assert!(queue.handle_click(Vec2::new(1600.0, 170.0), 150.0).is_none());

        queue.update(400.0);
        assert_eq!(queue.len(), 2);
        assert!((queue.layout()[1].1.y - 160.0).abs() < 0.001);
    }
}
