//! Configuration management for hokstats

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

use crate::extract::{EpisodeHpExtractor, RecentStatsExtractor, UnterminatedPolicy};
use crate::table::FormatSetting;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "HOKSTATS_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub recent_stats: RecentStatsConfig,
    pub episode_hp: EpisodeHpConfig,
}

/// Where logs are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Log scanned when no input path is given
    pub log_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_file: PathBuf::from("cout.txt"),
        }
    }
}

/// How tables are written
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// auto picks csv for .csv/.txt destinations and xlsx otherwise
    pub format: FormatSetting,
}

/// `recent-stats` settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecentStatsConfig {
    /// Substring that opens a stats block
    pub marker: String,
    /// Table written when no output path is given
    pub output: PathBuf,
}

impl Default for RecentStatsConfig {
    fn default() -> Self {
        Self {
            marker: RecentStatsExtractor::DEFAULT_MARKER.to_string(),
            output: PathBuf::from("recent_stats_summary.xlsx"),
        }
    }
}

/// `episode-hp` settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeHpConfig {
    /// Substring that ends an episode
    pub terminator: String,
    /// Table written when no output path is given
    pub output: PathBuf,
    /// Episodes closed without terminator and without HP: drop or sentinel
    pub unterminated: UnterminatedPolicy,
}

impl Default for EpisodeHpConfig {
    fn default() -> Self {
        Self {
            terminator: EpisodeHpExtractor::DEFAULT_TERMINATOR.to_string(),
            output: PathBuf::from("monster_hp_summary.xlsx"),
            unterminated: UnterminatedPolicy::default(),
        }
    }
}

impl Config {
    /// Resolve the config file location.
    ///
    /// `$HOKSTATS_CONFIG` wins over `<config dir>/hokstats/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("hokstats").join("config.toml"))
    }

    /// Load config from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make every line match.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.recent_stats.marker.is_empty(),
            "recent_stats.marker must not be empty"
        );
        ensure!(
            !self.episode_hp.terminator.is_empty(),
            "episode_hp.terminator must not be empty"
        );
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write config to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}
