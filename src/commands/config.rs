use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::Config;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("path", sub_matches)) => show_path(sub_matches),
        Some(("show", sub_matches)) => show(sub_matches),
        Some(("init", sub_matches)) => init(sub_matches),
        _ => {
            println!("Use 'resmon config --help' for more information.");
            Ok(())
        }
    }
}

fn show_path(matches: &ArgMatches) -> Result<()> {
    let path = super::config_path(matches)?;
    println!("{}", path.display());
    Ok(())
}

/// Print the effective thresholds (file merged over defaults) as JSON
fn show(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init(matches: &ArgMatches) -> Result<()> {
    let path = super::config_path(matches)?;
    let force = matches.get_flag("force");

    if path.exists() && !force {
        bail!(
            "Config file already exists at {:?} (use --force to overwrite)",
            path
        );
    }

    Config::default()
        .save_to(&path)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    println!(
        "{} {}",
        "Default thresholds written to".green(),
        path.display().to_string().bold()
    );
    Ok(())
}
