mod backend;
mod cli;
mod commands;
mod config;
mod error;
mod logging;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use crossbeam_channel::unbounded;

use crate::cli::{Cli, Command};
use crate::config::{poll_interval, Config};
use crate::error::Result;

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(&cli)?;
    print_debug!("config: {config:?}");

    let (stop_tx, stop_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = stop_tx.send(());
    })?;

    let platform = backend::open(config.backend)?;
    match cli.command {
        Command::List => commands::list(platform.as_ref()),
        Command::Watch { interval_ms } => {
            let interval = match interval_ms {
                Some(ms) => poll_interval(ms)?,
                None => config.poll_interval,
            };
            commands::watch(platform, config.controller, interval, &stop_rx)?;
        }
        Command::Rumble {
            left,
            right,
            duration_ms,
        } => {
            let duration = Duration::from_millis(duration_ms);
            commands::rumble(platform, left, right, duration, &stop_rx)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::setup(cli.verbose, cli.no_color) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    if let Err(e) = run(cli) {
        print_error!("{e}");
        std::process::exit(1);
    }
}
