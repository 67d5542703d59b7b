mod cli;
mod commands;
mod config;
mod logging;
mod model;
mod screen;
mod sound;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args
        .command
        .unwrap_or_else(|| cli::Command::Tui(cli::TuiArgs::default()));
    match command {
        cli::Command::Tui(tui) => commands::tui(args.config, tui),
        cli::Command::Config => commands::show_config(args.config),
    }
}
