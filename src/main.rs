use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use resmon::commands::{self, monitor};

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print one JSON object per sample instead of text")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("resmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("CPU, RAM and GPU sampler with threshold alerts")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file to use instead of the per-user default")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .subcommand(
            Command::new("watch")
                .about("Sample continuously and report threshold severities")
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .value_name("MS")
                        .help("Sampling interval in milliseconds (minimum 100)")
                        .value_parser(
                            clap::value_parser!(u64).range(monitor::MIN_INTERVAL_MS..),
                        )
                        .default_value("1000"),
                )
                .arg(
                    Arg::new("count")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Stop after N samples")
                        .value_parser(clap::value_parser!(u64).range(1..)),
                )
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("snapshot")
                .about("Take a single evaluated sample")
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("config")
                .about("Manage alert thresholds (use 'resmon config --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("path").about("Print the config file location"))
                .subcommand(Command::new("show").about("Print the effective thresholds as JSON"))
                .subcommand(
                    Command::new("init")
                        .about("Write the default thresholds to the config file")
                        .arg(
                            Arg::new("force")
                                .long("force")
                                .help("Overwrite an existing file")
                                .action(ArgAction::SetTrue),
                        ),
                ),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    resmon::init_logging(matches.get_flag("verbose"));

    match matches.subcommand() {
        Some(("watch", sub_matches)) => monitor::execute_watch(sub_matches),
        Some(("snapshot", sub_matches)) => monitor::execute_snapshot(sub_matches),
        Some(("config", sub_matches)) => commands::config::execute(sub_matches),
        _ => {
            println!("Use 'resmon --help' for more information.");
            Ok(())
        }
    }
}
