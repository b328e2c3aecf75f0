//! Metric extraction from HoK GameCore training logs.
//!
//! Two independent scanners work over the same `cout.txt`:
//!
//! - [`RecentStatsExtractor`] - one [`StatsRecord`] per `my_main Recent Stats`
//!   block, with per-field rules from [`rules`]
//! - [`EpisodeHpExtractor`] - one [`EpisodeRecord`] per episode, driven by an
//!   explicit [`EpisodeState`] machine
//!
//! Both are single-pass and never fail: fields that cannot be found are
//! filled with sentinel values so the output table keeps uniform columns.

mod episode_hp;
mod recent_stats;
pub mod rules;

pub use episode_hp::{EpisodeHpExtractor, EpisodeRecord, EpisodeState, UnterminatedPolicy};
pub use recent_stats::{RecentStatsExtractor, StatsRecord};

/// Sentinel for an integer field that was never observed.
pub const MISSING: i64 = -1;
