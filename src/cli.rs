//! Command-line interface definition.
//!
//! Lives in the library so `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::extract::UnterminatedPolicy;
use crate::table::FormatSetting;

/// Version string with build metadata.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "-",
    env!("VERGEN_GIT_SHA"),
    " (",
    env!("HOKSTATS_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("HOKSTATS_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "hokstats")]
#[command(version = VERSION)]
#[command(about = "Extract training metrics from HoK GameCore logs into CSV or XLSX tables")]
#[command(
    long_about = "Extract training metrics from HoK GameCore logs into CSV or XLSX tables.

Each command scans a training log (cout.txt by default) in one pass and
writes one table, sorted by episode. Destinations ending in .csv or .txt
are written as comma-separated text, anything else as an Excel workbook."
)]
pub struct Cli {
    /// Config file [default: $HOKSTATS_CONFIG or <config dir>/hokstats/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); HOKSTATS_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract `my_main Recent Stats` blocks (HP, grad norm, loss, return)
    #[command(long_about = "Extract `my_main Recent Stats` blocks into a table.

Columns: Episode, Monster_HP, Grad_Norm, Loss, Return_Mean. Missing fields
are filled with -1 (Episode, Monster_HP), empty/NaN (Grad_Norm, Loss) or
0.0 (Return_Mean). Loss prefers loss_td and falls back to td_error_abs.")]
    RecentStats(RecentStatsArgs),

    /// Extract the final monster HP of every episode
    #[command(long_about = "Extract the final monster HP of every episode.

An episode starts at `Cur episode N` and ends at `Game Over`; the last
`Monster HP = X` seen in between is recorded (-1 if none).")]
    EpisodeHp(EpisodeHpArgs),

    /// Show or create the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print a shell completion script
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Arguments shared by both extraction commands.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Training log to scan [default: cout.txt]
    pub input: Option<PathBuf>,

    /// Table to write (.csv/.txt for CSV, otherwise XLSX)
    pub output: Option<PathBuf>,

    /// Output format, overriding the destination suffix
    #[arg(long, value_enum)]
    pub format: Option<FormatSetting>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RecentStatsArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Substring that opens a stats block [default: "my_main Recent Stats"]
    #[arg(long, value_name = "TEXT", value_parser = NonEmptyStringValueParser::new())]
    pub marker: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct EpisodeHpArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Substring that ends an episode [default: "Game Over"]
    #[arg(long, value_name = "TEXT", value_parser = NonEmptyStringValueParser::new())]
    pub terminator: Option<String>,

    /// Episodes that end without terminator and without HP [default: drop]
    #[arg(long, value_enum)]
    pub unterminated: Option<UnterminatedPolicy>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
