//! `my_main Recent Stats` block extraction.
//!
//! A block starts at a line containing the marker and runs over the
//! following non-blank lines:
//!
//! ```text
//! [INFO 10:03:40] my_main Recent Stats | t_env:   2010 | Episode:    2
//! grad_norm:   0.8734    loss_td:   0.0412
//! monster_last_hp_mean:  2790.0000    return_mean:  12.5000
//!
//! ```

use regex::Regex;

use super::rules::{self, FieldRule, FieldValues, StatsField};
use super::MISSING;
use crate::input::split_lines;
use crate::table::{Cell, Row};

/// Metrics of one `Recent Stats` block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsRecord {
    pub episode: i64,
    pub monster_hp: f64,
    pub grad_norm: f64,
    pub loss: f64,
    pub return_mean: f64,
}

impl StatsRecord {
    /// Record for a block where nothing but (maybe) the episode was found.
    pub fn empty(episode: i64) -> Self {
        Self {
            episode,
            monster_hp: MISSING as f64,
            grad_norm: f64::NAN,
            loss: f64::NAN,
            return_mean: 0.0,
        }
    }

    fn from_values(episode: i64, values: &FieldValues) -> Self {
        let empty = Self::empty(episode);
        Self {
            episode,
            monster_hp: values.get(StatsField::MonsterHp).unwrap_or(empty.monster_hp),
            grad_norm: values.get(StatsField::GradNorm).unwrap_or(empty.grad_norm),
            loss: values.get(StatsField::Loss).unwrap_or(empty.loss),
            return_mean: values.get(StatsField::ReturnMean).unwrap_or(empty.return_mean),
        }
    }
}

impl Row for StatsRecord {
    const COLUMNS: &'static [&'static str] =
        &["Episode", "Monster_HP", "Grad_Norm", "Loss", "Return_Mean"];

    fn episode(&self) -> i64 {
        self.episode
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Int(self.episode),
            Cell::Float(self.monster_hp),
            Cell::Float(self.grad_norm),
            Cell::Float(self.loss),
            Cell::Float(self.return_mean),
        ]
    }
}

/// Block being accumulated.
struct OpenBlock {
    episode: i64,
    values: FieldValues,
}

impl OpenBlock {
    fn finish(self) -> StatsRecord {
        tracing::trace!(episode = self.episode, values = ?self.values, "closing stats block");
        StatsRecord::from_values(self.episode, &self.values)
    }
}

/// Scans logs for `Recent Stats` blocks.
#[derive(Debug, Clone)]
pub struct RecentStatsExtractor {
    marker: String,
    episode: Regex,
    rules: Vec<FieldRule>,
}

impl RecentStatsExtractor {
    pub const DEFAULT_MARKER: &'static str = "my_main Recent Stats";

    /// Create an extractor that opens a block on lines containing `marker`.
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            episode: Regex::new(r"Episode:\s+([0-9]+)").expect("episode pattern is valid"),
            rules: rules::recent_stats_rules(),
        }
    }

    /// Extract one record per block, in log order.
    pub fn extract(&self, text: &str) -> Vec<StatsRecord> {
        self.extract_lines(split_lines(text))
    }

    pub fn extract_lines<'a, I>(&self, lines: I) -> Vec<StatsRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records = Vec::new();
        let mut block: Option<OpenBlock> = None;

        for line in lines {
            block = match block.take() {
                Some(mut open) if !line.trim().is_empty() => {
                    rules::apply(&self.rules, line, &mut open.values);
                    Some(open)
                }
                Some(open) => {
                    records.push(open.finish());
                    None
                }
                None if line.contains(self.marker.as_str()) => Some(OpenBlock {
                    episode: self.episode_of(line),
                    values: FieldValues::default(),
                }),
                None => None,
            };
        }

        if let Some(open) = block {
            records.push(open.finish());
        }

        tracing::debug!(blocks = records.len(), marker = %self.marker, "scanned recent stats");
        records
    }

    fn episode_of(&self, line: &str) -> i64 {
        let Some(digits) = self.episode.captures(line).and_then(|c| c.get(1)) else {
            return MISSING;
        };
        digits.as_str().parse().unwrap_or_else(|_| {
            tracing::warn!(text = digits.as_str(), "episode number out of range");
            MISSING
        })
    }
}

impl Default for RecentStatsExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MARKER)
    }
}
