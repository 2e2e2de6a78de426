#![warn(clippy::uninlined_format_args)]

mod bill_file;
mod bootstrap;
mod cli;
mod commands;

use std::process;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    bootstrap::init_logging();
    let config = bootstrap::AppConfig::from_env();

    if let Err(err) = commands::run(cli.command, &config) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
