//! Config subcommands handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use hokstats::theme::current_theme;
use hokstats::Config;

fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_path(),
    }
}

/// Show effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(explicit: Option<&Path>) -> Result<()> {
    let config = Config::load_from(&config_path(explicit)?)?;
    let theme = current_theme();
    print!("{}", theme.primary_text(&config.to_toml()?));
    Ok(())
}

/// Print where the config file is looked up.
pub fn handle_path(explicit: Option<&Path>) -> Result<()> {
    let path = config_path(explicit)?;
    let theme = current_theme();
    let note = if path.exists() { "" } else { " (not created)" };
    println!(
        "{}{}",
        theme.primary_text(&path.display().to_string()),
        theme.secondary_text(note)
    );
    Ok(())
}

/// Write the default configuration.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn handle_init(explicit: Option<&Path>, force: bool) -> Result<()> {
    let path = config_path(explicit)?;
    if path.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(&path)?;
    let theme = current_theme();
    println!(
        "{}",
        theme.success_text(&format!("Config file written to {}", path.display()))
    );
    Ok(())
}
