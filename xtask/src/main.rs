//! Development tasks for hokstats
//!
//! Usage: `cargo run -p xtask -- man [--out-dir <DIR>]`

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Render the hokstats man page
    Man {
        /// Directory to write hokstats.1 into
        #[arg(long, default_value = "target/man")]
        out_dir: PathBuf,
    },
}

fn render_man(out_dir: PathBuf) -> Result<()> {
    let cmd = hokstats::cli::Cli::command();
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd)
        .render(&mut buffer)
        .context("Failed to render man page")?;

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = out_dir.join("hokstats.1");
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out_dir } => render_man(out_dir),
    }
}
