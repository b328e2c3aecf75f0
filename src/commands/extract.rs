//! `recent-stats` and `episode-hp` handlers

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use humansize::{format_size, DECIMAL};

use hokstats::cli::{EpisodeHpArgs, RecentStatsArgs, TableArgs};
use hokstats::input::{read_log, resolve};
use hokstats::table::{write_table, OutputFormat, Row, Table};
use hokstats::theme::current_theme;
use hokstats::{Config, EpisodeHpExtractor, RecentStatsExtractor};

/// Input, output and format after applying CLI > config > defaults.
struct Destination {
    input: PathBuf,
    output: PathBuf,
    format: OutputFormat,
}

impl Destination {
    fn resolve(args: &TableArgs, config: &Config, default_output: &Path) -> Self {
        let input = args
            .input
            .clone()
            .unwrap_or_else(|| config.input.log_file.clone());
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output.to_path_buf());
        let format = args.format.unwrap_or(config.output.format).resolve(&output);
        Self {
            input,
            output,
            format,
        }
    }
}

/// Scan `my_main Recent Stats` blocks and write the stats table.
pub fn handle_recent_stats(args: &RecentStatsArgs, config: &Config) -> Result<()> {
    let dest = Destination::resolve(&args.table, config, &config.recent_stats.output);
    let marker = args
        .marker
        .clone()
        .unwrap_or_else(|| config.recent_stats.marker.clone());

    let log = read_log(&dest.input)?;
    let records = RecentStatsExtractor::new(marker).extract(log.text());
    tracing::info!(
        input = %log.path().display(),
        blocks = records.len(),
        "extracted recent stats"
    );

    save(&records, &dest)
}

/// Scan per-episode monster HP and write the episode table.
pub fn handle_episode_hp(args: &EpisodeHpArgs, config: &Config) -> Result<()> {
    let dest = Destination::resolve(&args.table, config, &config.episode_hp.output);
    let terminator = args
        .terminator
        .clone()
        .unwrap_or_else(|| config.episode_hp.terminator.clone());
    let policy = args.unterminated.unwrap_or(config.episode_hp.unterminated);

    let log = read_log(&dest.input)?;
    let records = EpisodeHpExtractor::new(terminator, policy).extract(log.text());
    tracing::info!(
        input = %log.path().display(),
        episodes = records.len(),
        ?policy,
        "extracted episode HP"
    );

    save(&records, &dest)
}

fn save<R: Row>(records: &[R], dest: &Destination) -> Result<()> {
    let table = Table::from_records(records);
    write_table(&table, &dest.output, dest.format)?;
    report_saved(&table, dest);
    Ok(())
}

fn report_saved(table: &Table, dest: &Destination) {
    let path = fs::canonicalize(&dest.output).unwrap_or_else(|_| resolve(&dest.output));
    let size = fs::metadata(&path)
        .map(|m| format_size(m.len(), DECIMAL))
        .unwrap_or_else(|_| "unknown size".to_string());

    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!(
            "Saved {} rows ({}, {}) to {}",
            table.len(),
            dest.format.name(),
            size,
            path.display()
        ))
    );
}
