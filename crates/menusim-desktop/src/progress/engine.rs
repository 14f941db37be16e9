//! Hidden progress value, milestones and completion edge

use serde::Serialize;

/// Upper bound of progress, in percent
pub const PROGRESS_MAX: f64 = 100.0;

/// Thresholds that fire a one-shot milestone
pub const MILESTONES: [u32; 4] = [25, 50, 75, 90];

/// Fires each threshold at most once, ascending
#[derive(Clone, Debug)]
pub struct MilestoneTracker {
    thresholds: Vec<u32>,
    fired: Vec<bool>,
}

impl Default for MilestoneTracker {
    fn default() -> Self {
        Self::new(&MILESTONES)
    }
}

impl MilestoneTracker {
    pub fn new(thresholds: &[u32]) -> Self {
        let mut thresholds = thresholds.to_vec();
        thresholds.sort_unstable();
        thresholds.dedup();
        let fired = vec![false; thresholds.len()];
        Self { thresholds, fired }
    }

    /// Newly crossed thresholds, ascending
    pub fn check(&mut self, progress: f64) -> Vec<u32> {
        let mut crossed = Vec::new();
        for (threshold, fired) in self.thresholds.iter().zip(self.fired.iter_mut()) {
            if !*fired && progress >= *threshold as f64 {
                *fired = true;
                crossed.push(*threshold);
            }
        }
        crossed
    }

    pub fn has_fired(&self, threshold: u32) -> bool {
        self.thresholds
            .iter()
            .position(|&t| t == threshold)
            .is_some_and(|i| self.fired[i])
    }
}

/// Numbers for the ending presentation
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SessionStats {
    /// Player interactions that did nothing
    pub items_moved: u64,
    pub progress: f64,
    pub time_elapsed_secs: f64,
    /// Progress that came from coworker activity, in percent
    pub coworker_contribution: f64,
}

/// Capped, non-decreasing progress with an auto rate
#[derive(Clone, Debug)]
pub struct ProgressEngine {
    progress: f64,
    auto_rate_per_sec: f64,
    milestones: MilestoneTracker,
    completion_taken: bool,
    items_moved: u64,
    coworker_contribution: f64,
    started_ms: f64,
}

impl ProgressEngine {
    pub fn new(auto_rate_per_sec: f64, started_ms: f64) -> Self {
        Self {
            progress: 0.0,
            auto_rate_per_sec: auto_rate_per_sec.max(0.0),
            milestones: MilestoneTracker::default(),
            completion_taken: false,
            items_moved: 0,
            coworker_contribution: 0.0,
            started_ms,
        }
    }

    /// Start from a given value (clamped), e.g. to resume a scenario
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress.clamp(0.0, PROGRESS_MAX);
        self
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    #[inline]
    pub fn auto_rate_per_sec(&self) -> f64 {
        self.auto_rate_per_sec
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.progress >= PROGRESS_MAX
    }

    /// Auto-increment for `dt_secs` of elapsed time
    pub fn tick(&mut self, dt_secs: f64) {
        if self.is_complete() || dt_secs <= 0.0 {
            return;
        }
        self.progress = (self.progress + self.auto_rate_per_sec * dt_secs).min(PROGRESS_MAX);
    }

    /// Discrete increase; negative amounts are ignored
    pub fn increase(&mut self, amount: f64) -> f64 {
        let before = self.progress;
        self.progress = (self.progress + amount.max(0.0)).min(PROGRESS_MAX);
        self.progress - before
    }

    /// Discrete increase credited to coworker activity
    pub fn credit_coworker(&mut self, amount: f64) -> f64 {
        let applied = self.increase(amount);
        self.coworker_contribution += applied;
        applied
    }

    /// Newly crossed milestones, ascending, each once ever
    pub fn check_milestones(&mut self) -> Vec<u32> {
        self.milestones.check(self.progress)
    }

    /// True exactly once, the first time progress is observed at 100
    pub fn take_completion(&mut self) -> bool {
        if self.completion_taken || !self.is_complete() {
            return false;
        }
        self.completion_taken = true;
        true
    }

    /// Count a player interaction (it never moves progress)
    pub fn record_interaction(&mut self) {
        self.items_moved += 1;
    }

    pub fn items_moved(&self) -> u64 {
        self.items_moved
    }

    pub fn stats(&self, now_ms: f64) -> SessionStats {
        SessionStats {
            items_moved: self.items_moved,
            progress: self.progress,
            time_elapsed_secs: ((now_ms - self.started_ms) / 1000.0).max(0.0),
            coworker_contribution: self.coworker_contribution,
        }
    }
}
