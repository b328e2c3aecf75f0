//! hokstats - training metrics from HoK GameCore logs as tables
//!
//! # Module Structure
//!
//! - [`input`] - loading logs with permissive decoding
//! - [`extract`] - `Recent Stats` and per-episode HP scanners
//! - [`table`] - format-neutral tables, CSV and XLSX writers
//! - [`config`] - TOML configuration file
//! - [`cli`] - clap command definitions
//! - [`theme`] - colored CLI messages

pub mod cli;
pub mod config;
pub mod extract;
pub mod input;
pub mod table;
pub mod theme;

pub use config::Config;
pub use extract::{
    EpisodeHpExtractor, EpisodeRecord, RecentStatsExtractor, StatsRecord, UnterminatedPolicy,
};
pub use input::{read_log, InputError, LogText};
pub use table::{write_table, FormatSetting, OutputFormat, Table, TableError};
