//! Stacks the channel queues down the right edge of the screen

use rand::Rng;

use crate::config::SimConfig;
use crate::content::ContentPools;
use crate::math::Vec2;
use super::{Channel, ChannelNotificationQueue, OverlayId, OverlayIds, ToastPayload};

/// All toast channels, chained vertically
///
/// Each queue's origin sits below the total height of the queues above it.
/// Occupancy changes every frame, so [`relayout`](Self::relayout) runs on
/// every update and before every hit test.
#[derive(Clone, Debug)]
pub struct NotificationCenter {
    queues: Vec<ChannelNotificationQueue>,
    origin: Vec2,
}

impl NotificationCenter {
    pub fn new(origin: Vec2, queues: Vec<ChannelNotificationQueue>) -> Self {
        let mut center = Self { queues, origin };
        center.relayout();
        center
    }

    /// Build every channel from config, stacked in [`Channel::ALL`] order
    ///
    /// All queues draw toast ids from `ids`, so an id names one toast
    /// whatever its channel.
    pub fn from_config<R: Rng + ?Sized>(
        config: &SimConfig,
        ids: &OverlayIds,
        now_ms: f64,
        rng: &mut R,
    ) -> Self {
        let origin = Vec2::new(
            config.screen.width - config.toast_width - config.toast_margin,
            config.toast_top,
        );
        let mut queues = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let queue = ChannelNotificationQueue::new(
                channel,
                config.channel(channel).clone(),
                config.toast_width,
                config.slide_distance,
                now_ms,
                &mut *rng,
            );
            queues.push(queue.with_ids(ids));
        }
        Self::new(origin, queues)
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn queues(&self) -> &[ChannelNotificationQueue] {
        &self.queues
    }

    pub fn queue(&self, channel: Channel) -> Option<&ChannelNotificationQueue> {
        self.queues.iter().find(|q| q.channel() == channel)
    }

    pub fn queue_mut(&mut self, channel: Channel) -> Option<&mut ChannelNotificationQueue> {
        self.queues.iter_mut().find(|q| q.channel() == channel)
    }

    /// Recompute each queue's origin from the heights above it
    pub fn relayout(&mut self) {
        let mut y = self.origin.y;
        for queue in &mut self.queues {
            queue.set_origin(Vec2::new(self.origin.x, y));
            y += queue.stack_height();
        }
    }

    /// Give every timed channel a chance to spawn
    pub fn try_spawn_all<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        pools: &ContentPools,
    ) -> Vec<(Channel, OverlayId)> {
        let mut spawned = Vec::new();
        for queue in &mut self.queues {
            let channel = queue.channel();
            if let Some(id) = queue.try_spawn(now_ms, rng, pools.pool(channel)) {
                spawned.push((channel, id));
            }
        }
        self.relayout();
        spawned
    }

    /// Manually post a toast to its payload's channel
    pub fn push(&mut self, payload: ToastPayload, now_ms: f64) -> Option<OverlayId> {
        let id = self.queue_mut(payload.channel)?.push(payload, now_ms);
        self.relayout();
        Some(id)
    }

    pub fn payload_mut(&mut self, channel: Channel, id: OverlayId) -> Option<&mut ToastPayload> {
        self.queue_mut(channel)?.payload_mut(id)
    }

    /// Advance every queue and re-chain origins
    pub fn update(&mut self, now_ms: f64) {
        for queue in &mut self.queues {
            queue.update(now_ms);
        }
        self.relayout();
    }

    /// First hit across queues, top to bottom
    pub fn handle_click(&mut self, pos: Vec2, now_ms: f64) -> Option<ToastPayload> {
        self.relayout();
        self.queues
            .iter_mut()
            .find_map(|queue| queue.handle_click(pos, now_ms))
    }

    /// Live toasts across all channels
    pub fn len(&self) -> usize {
        self.queues.iter().map(|q| q.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.iter().all(|q| q.is_empty())
    }
}
