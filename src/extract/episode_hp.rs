//! Final monster HP per episode.
//!
//! The game core prints `Cur episode N` when an episode starts, a stream of
//! `Monster HP = X` updates while it runs, and `Game Over` when it ends. The
//! last HP seen before the episode closes is recorded.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::MISSING;
use crate::input::split_lines;
use crate::table::{Cell, Row};

/// Last observed monster HP of one episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRecord {
    pub episode: i64,
    pub monster_hp: i64,
}

impl EpisodeRecord {
    pub fn new(episode: i64, monster_hp: i64) -> Self {
        Self {
            episode,
            monster_hp,
        }
    }
}

impl Row for EpisodeRecord {
    const COLUMNS: &'static [&'static str] = &["Episode", "Monster_HP"];

    fn episode(&self) -> i64 {
        self.episode
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Int(self.episode), Cell::Int(self.monster_hp)]
    }
}

/// What to do with an episode that closes without a `Game Over` line
/// (superseded by the next start, or still open at end of input) and
/// without any HP update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnterminatedPolicy {
    /// Leave the episode out of the table
    #[default]
    Drop,
    /// Record it with monster HP -1, like a terminated episode without HP
    Sentinel,
}

/// Scanner state between lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpisodeState {
    /// No episode open.
    #[default]
    Idle,
    /// Episode started, no HP seen yet.
    Open { episode: i64 },
    /// Episode started and at least one HP update seen.
    Observed { episode: i64, hp: i64 },
}

impl EpisodeState {
    pub fn is_open(&self) -> bool {
        !matches!(self, EpisodeState::Idle)
    }

    /// Record an HP update. Updates outside an episode are ignored.
    fn observe(self, hp: i64) -> Self {
        match self {
            EpisodeState::Idle => EpisodeState::Idle,
            EpisodeState::Open { episode } | EpisodeState::Observed { episode, .. } => {
                EpisodeState::Observed { episode, hp }
            }
        }
    }

    /// Close on an explicit terminator line: always produces a record.
    fn close_terminated(self) -> Option<EpisodeRecord> {
        match self {
            EpisodeState::Idle => None,
            EpisodeState::Open { episode } => Some(EpisodeRecord::new(episode, MISSING)),
            EpisodeState::Observed { episode, hp } => Some(EpisodeRecord::new(episode, hp)),
        }
    }

    /// Close without a terminator line.
    fn close_unterminated(self, policy: UnterminatedPolicy) -> Option<EpisodeRecord> {
        match (self, policy) {
            (EpisodeState::Idle, _) => None,
            (EpisodeState::Observed { episode, hp }, _) => Some(EpisodeRecord::new(episode, hp)),
            (EpisodeState::Open { episode }, UnterminatedPolicy::Drop) => {
                tracing::debug!(episode, "dropping unterminated episode without HP");
                None
            }
            (EpisodeState::Open { episode }, UnterminatedPolicy::Sentinel) => {
                Some(EpisodeRecord::new(episode, MISSING))
            }
        }
    }
}

/// Scans logs for per-episode monster HP.
#[derive(Debug, Clone)]
pub struct EpisodeHpExtractor {
    start: Regex,
    hp: Regex,
    terminator: String,
    policy: UnterminatedPolicy,
}

impl EpisodeHpExtractor {
    pub const DEFAULT_TERMINATOR: &'static str = "Game Over";

    pub fn new(terminator: impl Into<String>, policy: UnterminatedPolicy) -> Self {
        Self {
            start: Regex::new(r"Cur episode[^0-9]*([0-9]+)").expect("start pattern is valid"),
            hp: Regex::new(r"Monster HP = ([0-9]+)").expect("hp pattern is valid"),
            terminator: terminator.into(),
            policy,
        }
    }

    /// Extract one record per closed episode, in log order.
    pub fn extract(&self, text: &str) -> Vec<EpisodeRecord> {
        self.extract_lines(split_lines(text))
    }

    pub fn extract_lines<'a, I>(&self, lines: I) -> Vec<EpisodeRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records = Vec::new();
        let mut state = EpisodeState::Idle;

        for line in lines {
            state = self.step(state, line, &mut records);
        }
        records.extend(state.close_unterminated(self.policy));

        tracing::debug!(episodes = records.len(), "scanned episode HP");
        records
    }

    /// Advance the state machine by one line. At most one rule fires, in
    /// priority order: episode start, HP update, terminator. A matching line
    /// whose number does not fit an i64 is consumed without effect.
    pub fn step(
        &self,
        state: EpisodeState,
        line: &str,
        records: &mut Vec<EpisodeRecord>,
    ) -> EpisodeState {
        if let Some(digits) = capture_digits(&self.start, line) {
            let Some(episode) = parse_int(digits) else {
                return state;
            };
            records.extend(state.close_unterminated(self.policy));
            return EpisodeState::Open { episode };
        }

        if let Some(digits) = capture_digits(&self.hp, line) {
            let Some(hp) = parse_int(digits) else {
                return state;
            };
            return state.observe(hp);
        }

        if state.is_open() && line.contains(self.terminator.as_str()) {
            records.extend(state.close_terminated());
            return EpisodeState::Idle;
        }

        state
    }
}

impl Default for EpisodeHpExtractor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TERMINATOR, UnterminatedPolicy::default())
    }
}

fn capture_digits<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    Some(pattern.captures(line)?.get(1)?.as_str())
}

fn parse_int(digits: &str) -> Option<i64> {
    match digits.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(text = digits, "integer out of range, ignoring line");
            None
        }
    }
}
