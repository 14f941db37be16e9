//! Simulation configuration
//!
//! Every timing and layout constant the compositor uses lives here so hosts
//! can tune pacing without touching code. All durations are milliseconds.

use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::Size;
use crate::overlay::Channel;

/// Closed range used for randomized "next fire time" rolls
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Draw a uniform value in `[min, max]`
    ///
    /// A degenerate or inverted range yields `min` instead of panicking.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            self.min
        } else {
            rng.random_range(self.min..=self.max)
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min < 0.0 {
            return Err(ConfigError::NotPositive { field, value: self.min });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedInterval {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Per-channel toast pacing and geometry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettings {
    /// Automatic spawn interval; `None` means the channel is fed manually
    pub spawn_interval_ms: Option<Interval>,
    pub duration_ms: f64,
    pub dismiss_duration_ms: f64,
    pub entry_height: f32,
    pub spacing: f32,
}

impl ChannelSettings {
    /// Vertical distance between consecutive entries
    #[inline]
    pub fn slot_step(&self) -> f32 {
        self.entry_height + self.spacing
    }
}

/// Phone call reveal pacing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallTiming {
    pub char_ms: f64,
    pub line_pause_ms: f64,
    /// Slack added on top of the typed time to form the duration budget
    pub buffer_ms: f64,
}

impl Default for CallTiming {
    fn default() -> Self {
        Self {
            char_ms: 50.0,
            line_pause_ms: 800.0,
            buffer_ms: 5000.0,
        }
    }
}

/// Coworker activity feed pacing
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActivitySettings {
    pub interval_ms: Interval,
    pub show_ms: f64,
    /// Discrete progress granted per activity, in percent
    pub gain: Interval,
    /// Delay before the follow-up congratulatory mail
    pub mail_delay_ms: Interval,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self {
            interval_ms: Interval::new(5000.0, 15000.0),
            show_ms: 3000.0,
            gain: Interval::new(5.0, 12.5),
            mail_delay_ms: Interval::new(1000.0, 3000.0),
        }
    }
}

/// Top-level configuration for [`SimEngine`](crate::SimEngine)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen: Size,
    /// Fixed RNG seed; `None` seeds from the host clock
    pub seed: Option<u64>,
    pub auto_rate_per_sec: f64,

    pub toast_width: f32,
    pub toast_margin: f32,
    pub toast_top: f32,
    pub slide_distance: f32,
    pub mail: ChannelSettings,
    pub discord: ChannelSettings,
    pub messages: ChannelSettings,
    pub slack: ChannelSettings,

    pub modal_interval_ms: Interval,
    pub call_interval_ms: Interval,
    pub call_timing: CallTiming,
    pub activity: ActivitySettings,

    pub banner_duration_ms: f64,
    pub banner_fade_ms: f64,
    pub popup_grow_ms: f64,
    pub popup_fade_ms: f64,

    pub art_frame_interval_ms: f64,
    pub mailbox_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen: Size::new(1920.0, 1080.0),
            seed: None,
            auto_rate_per_sec: 0.05,

            toast_width: 350.0,
            toast_margin: 20.0,
            toast_top: 70.0,
            slide_distance: 400.0,
            mail: ChannelSettings {
                spawn_interval_ms: Some(Interval::new(8000.0, 15000.0)),
                duration_ms: 8000.0,
                dismiss_duration_ms: 300.0,
                entry_height: 80.0,
                spacing: 20.0,
            },
            discord: ChannelSettings {
                spawn_interval_ms: None,
                duration_ms: 5000.0,
                dismiss_duration_ms: 300.0,
                entry_height: 70.0,
                spacing: 20.0,
            },
            messages: ChannelSettings {
                spawn_interval_ms: Some(Interval::new(10000.0, 20000.0)),
                duration_ms: 5000.0,
                dismiss_duration_ms: 300.0,
                entry_height: 70.0,
                spacing: 20.0,
            },
            slack: ChannelSettings {
                spawn_interval_ms: Some(Interval::new(12000.0, 24000.0)),
                duration_ms: 5000.0,
                dismiss_duration_ms: 300.0,
                entry_height: 70.0,
                spacing: 20.0,
            },

            modal_interval_ms: Interval::new(30000.0, 60000.0),
            call_interval_ms: Interval::new(45000.0, 90000.0),
            call_timing: CallTiming::default(),
            activity: ActivitySettings::default(),

            banner_duration_ms: 2500.0,
            banner_fade_ms: 500.0,
            popup_grow_ms: 450.0,
            popup_fade_ms: 1050.0,

            art_frame_interval_ms: 3000.0,
            mailbox_capacity: 50,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json`](Self::from_json) but falls back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(error) => {
                warn!("failed to load sim config: {error}; using defaults");
                Self::default()
            }
        }
    }

    /// Settings for one toast channel
    pub fn channel(&self, channel: Channel) -> &ChannelSettings {
        match channel {
            Channel::Mail => &self.mail,
            Channel::Discord => &self.discord,
            Channel::Messages => &self.messages,
            Channel::Slack => &self.slack,
        }
    }

    /// Check ranges and positivity
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("screen.width", self.screen.width as f64)?;
        positive("screen.height", self.screen.height as f64)?;
        if self.auto_rate_per_sec < 0.0 {
            return Err(ConfigError::NotPositive {
                field: "auto_rate_per_sec",
                value: self.auto_rate_per_sec,
            });
        }

        for channel in Channel::ALL {
            let settings = self.channel(channel);
            if let Some(interval) = &settings.spawn_interval_ms {
                interval.validate(channel.interval_field())?;
            }
            positive("channel.duration_ms", settings.duration_ms)?;
            positive("channel.dismiss_duration_ms", settings.dismiss_duration_ms)?;
            positive("channel.entry_height", settings.entry_height as f64)?;
        }

        self.modal_interval_ms.validate("modal_interval_ms")?;
        self.call_interval_ms.validate("call_interval_ms")?;
        self.activity.interval_ms.validate("activity.interval_ms")?;
        self.activity.gain.validate("activity.gain")?;
        self.activity.mail_delay_ms.validate("activity.mail_delay_ms")?;
        positive("activity.show_ms", self.activity.show_ms)?;

        positive("call_timing.char_ms", self.call_timing.char_ms)?;
        positive("banner_duration_ms", self.banner_duration_ms)?;
        positive("banner_fade_ms", self.banner_fade_ms)?;
        positive("popup_grow_ms", self.popup_grow_ms)?;
        positive("popup_fade_ms", self.popup_fade_ms)?;
        positive("art_frame_interval_ms", self.art_frame_interval_ms)?;
        positive("mailbox_capacity", self.mailbox_capacity as f64)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
