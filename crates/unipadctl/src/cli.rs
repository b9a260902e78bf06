use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::config::Backend;

#[derive(Debug, Subcommand, PartialEq)]
pub(crate) enum Command {
    /// List attached controllers.
    List,
    /// Poll a controller and print its state until interrupted.
    Watch {
        /// Poll interval in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,
    },
    /// Run the vibration motors of the attached gamepad.
    Rumble {
        /// Left motor intensity, 0 to 100
        #[arg(long, default_value_t = 100.0)]
        left: f64,
        /// Right motor intensity, 0 to 100
        #[arg(long, default_value_t = 100.0)]
        right: f64,
        /// How long to keep the motors running
        #[arg(long, default_value_t = 500)]
        duration_ms: u64,
    },
}

/// Probe for game controllers behind the unipad adapters.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to a YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Input backend
    #[arg(short, long, value_enum)]
    pub backend: Option<Backend>,

    /// Controller type: xbox, playstation, generic or auto
    #[arg(long)]
    pub controller: Option<String>,

    /// The command to run
    #[clap(subcommand)]
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rumble_defaults_to_full_strength() {
        let cli = Cli::parse_from(["unipadctl", "rumble"]);
        assert_eq!(
            cli.command,
            Command::Rumble {
                left: 100.0,
                right: 100.0,
                duration_ms: 500
            }
        );
    }

    #[test]
    fn global_flags_parse() {
        let cli = Cli::parse_from([
            "unipadctl",
            "--backend",
            "virtual",
            "--controller",
            "ps",
            "-v",
            "watch",
            "--interval-ms",
            "20",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.backend, Some(Backend::Virtual));
        assert_eq!(cli.controller.as_deref(), Some("ps"));
        assert_eq!(cli.command, Command::Watch { interval_ms: Some(20) });
    }
}
