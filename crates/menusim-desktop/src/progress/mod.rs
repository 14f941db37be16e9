//! Progress tracking
//!
//! The player never moves progress. It creeps up on its own and jumps when
//! the coworker's activity feed fires.

mod engine;
mod activity;

pub use engine::{MilestoneTracker, ProgressEngine, SessionStats, MILESTONES, PROGRESS_MAX};
pub use activity::{ActivityEvent, ActivityFeed};
