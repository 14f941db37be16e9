//! Host-fed frame clock
//!
//! The core never reads wall time. The host passes one timestamp per frame
//! and every timed entity compares against it.

/// Monotonic frame clock derived from host timestamps (milliseconds)
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
    now_ms: f64,
    dt_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the clock at a known time so the first frame has zero delta
    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            last_ms: Some(now_ms),
            now_ms,
            dt_ms: 0.0,
        }
    }

    /// Advance to the host timestamp and return the frame delta
    ///
    /// A timestamp earlier than the previous one is treated as no time
    /// passing; `now_ms` never moves backwards.
    pub fn advance(&mut self, host_ms: f64) -> f64 {
        let now = match self.last_ms {
            Some(last) => host_ms.max(last),
            None => host_ms,
        };
        self.dt_ms = match self.last_ms {
            Some(last) => now - last,
            None => 0.0,
        };
        self.last_ms = Some(now);
        self.now_ms = now;
        self.dt_ms
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[inline]
    pub fn dt_ms(&self) -> f64 {
        self.dt_ms
    }

    #[inline]
    pub fn dt_secs(&self) -> f64 {
        self.dt_ms / 1000.0
    }
}
