//! Simulation engine coordinating all components
//!
//! This module is split into focused submodules:
//! - `frame`: Per-frame update in a fixed order
//! - `input`: Pointer and key routing across the layers
//! - `windows`: Window lifecycle, mail delivery and the default desktop
//! - `rendering`: Draw-list assembly

mod frame;
mod input;
mod windows;
mod rendering;

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::Serialize;

use crate::clock::FrameClock;
use crate::config::SimConfig;
use crate::content::ContentPools;
use crate::input::InputRouter;
use crate::modal::{ModalInterrupt, PhoneCallMachine};
use crate::overlay::{NotificationCenter, OverlayIds, OverlayLayer};
use crate::progress::{ActivityFeed, ProgressEngine, SessionStats};
use crate::window::{WindowId, WindowStack};

/// Event the host reacts to (sounds, the ending screen, new windows)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostSignal {
    MilestoneCrossed { threshold: u32 },
    ProgressComplete,
    ModalOpened,
    ModalClosed,
    CallIncoming,
    CallEnded,
    DetailOpened { window_id: WindowId },
}

/// Simulation engine
///
/// Owns every piece of state and is driven by the host: one
/// [`tick`](Self::tick) per frame with a timestamp, pointer and key events in
/// between, and a [`draw_list`](Self::draw_list) whenever it wants to paint.
///
/// - Window stack (z-order, drag capture, global block)
/// - Notification center (per-channel toast queues)
/// - Milestone banners and progress popups
/// - Modal chat interrupt and phone call machine
/// - Hidden progress with the coworker activity feed
pub struct SimEngine {
    pub config: SimConfig,
    pub content: ContentPools,
    pub windows: WindowStack,
    pub input: InputRouter,
    pub notifications: NotificationCenter,
    pub banners: OverlayLayer,
    pub popups: OverlayLayer,
    pub modal: ModalInterrupt,
    pub call: PhoneCallMachine,
    pub progress: ProgressEngine,
    pub activity: ActivityFeed,
    pub(crate) clock: FrameClock,
    pub(crate) rng: Pcg64Mcg,
    pub(crate) signals: Vec<HostSignal>,
    pub(crate) mailbox_window: Option<WindowId>,
    pub(crate) activity_window: Option<WindowId>,
    pub(crate) complete: bool,
}

impl SimEngine {
    /// Create an engine whose clock starts at `now_ms`
    ///
    /// Every timer is rolled relative to `now_ms`. No windows exist until
    /// [`spawn_default_desktop`](Self::spawn_default_desktop) or
    /// [`create_window`](Self::create_window) is called.
    pub fn new(config: SimConfig, content: ContentPools, now_ms: f64) -> Self {
        let seed = config.seed.unwrap_or_else(|| entropy_seed(now_ms));
        let mut rng = Pcg64Mcg::seed_from_u64(seed);

        let overlay_ids = OverlayIds::new();
        let notifications = NotificationCenter::from_config(&config, &overlay_ids, now_ms, &mut rng);
        let modal = ModalInterrupt::new(config.screen, config.modal_interval_ms, now_ms, &mut rng);
        let call = PhoneCallMachine::new(
            config.screen,
            config.call_interval_ms,
            config.call_timing,
            now_ms,
            &mut rng,
        );
        let activity = ActivityFeed::new(config.activity, now_ms, &mut rng);
        let progress = ProgressEngine::new(config.auto_rate_per_sec, now_ms);

        Self {
            config,
            content,
            windows: WindowStack::new(),
            input: InputRouter::new(),
            notifications,
            banners: OverlayLayer::sharing(&overlay_ids),
            popups: OverlayLayer::sharing(&overlay_ids),
            modal,
            call,
            progress,
            activity,
            clock: FrameClock::starting_at(now_ms),
            rng,
            signals: Vec::new(),
            mailbox_window: None,
            activity_window: None,
            complete: false,
        }
    }

    /// Default config and built-in content
    pub fn with_defaults(now_ms: f64) -> Self {
        Self::new(SimConfig::default(), ContentPools::builtin(), now_ms)
    }

    /// Time of the last processed frame
    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    /// Progress reached 100 and the simulation froze
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// True while the modal or the call owns input
    pub fn is_input_blocked(&self) -> bool {
        self.modal.is_active() || self.call.blocks_input()
    }

    pub fn stats(&self) -> SessionStats {
        self.progress.stats(self.clock.now_ms())
    }

    /// Raise progress to a given value, e.g. to stage an ending; never lowers it
    pub fn raise_progress_to(&mut self, progress: f64) {
        let current = self.progress.progress();
        self.progress.increase(progress - current);
    }

    /// Signals raised outside of `tick` (input handlers), drained
    pub fn take_signals(&mut self) -> Vec<HostSignal> {
        std::mem::take(&mut self.signals)
    }

    /// Mirror the combined modal/call block onto the window stack
    pub(crate) fn apply_block(&mut self) {
        let blocked = self.is_input_blocked();
        if blocked != self.windows.is_globally_blocked() {
            self.windows.set_global_block(blocked);
        }
        let stale_drag = match self.input.drag_state() {
            Some(drag) if drag.is_window_move() => blocked,
            Some(drag) if drag.is_panel_move() => !self.call.is_panel_dragging(),
            _ => false,
        };
        if stale_drag {
            self.input.end_drag();
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed(now_ms: f64) -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos ^ now_ms.to_bits()
}

// No wall clock on wasm32-unknown-unknown; the bindings pass an explicit seed
#[cfg(target_arch = "wasm32")]
fn entropy_seed(now_ms: f64) -> u64 {
    now_ms.to_bits()
}
