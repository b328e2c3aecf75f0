use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hokstats::cli::{Cli, Commands, ConfigCommands};
use hokstats::Config;

mod commands;

/// Environment variable holding a tracing filter directive.
const LOG_ENV: &str = "HOKSTATS_LOG";

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::RecentStats(args) => {
            let config = load_config(&cli)?;
            commands::extract::handle_recent_stats(args, &config)
        }
        Commands::EpisodeHp(args) => {
            let config = load_config(&cli)?;
            commands::extract::handle_episode_hp(args, &config)
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(cli.config.as_deref()),
            ConfigCommands::Path => commands::config::handle_path(cli.config.as_deref()),
            ConfigCommands::Init { force } => {
                commands::config::handle_init(cli.config.as_deref(), *force)
            }
        },
        Commands::Completions { shell } => commands::completions::handle(*shell),
    }
}
