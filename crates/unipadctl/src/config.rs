use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use unipad::ControllerType;

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Poll interval used when neither the config file nor the command line
/// sets one.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Where controller input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// SDL2 joystick and game controller subsystems.
    Sdl,
    /// In-memory platform with one simulated gamepad.
    Virtual,
}

impl Default for Backend {
    fn default() -> Self {
        if cfg!(feature = "sdl2-backend") {
            Backend::Sdl
        } else {
            Backend::Virtual
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Sdl => f.write_str("sdl"),
            Backend::Virtual => f.write_str("virtual"),
        }
    }
}

/// Config file layout. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    controller: Option<String>,
    backend: Option<Backend>,
    poll_interval_ms: Option<u64>,
}

/// Settings after merging the config file with command-line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub controller: ControllerType,
    pub backend: Backend,
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            controller: ControllerType::Auto,
            backend: Backend::default(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl Config {
    /// Parses a YAML config document on top of the defaults.
    pub fn parse(input: &str) -> Result<Self> {
        let file: ConfigFile = if input.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(input)?
        };
        let mut config = Config::default();
        if let Some(controller) = file.controller {
            config.controller = parse_controller(&controller)?;
        }
        if let Some(backend) = file.backend {
            config.backend = backend;
        }
        if let Some(ms) = file.poll_interval_ms {
            config.poll_interval = poll_interval(ms)?;
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let input = fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&input)
    }

    /// Loads the config named on the command line, if any, and applies the
    /// command-line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(controller) = &cli.controller {
            config.controller = parse_controller(controller)?;
        }
        if let Some(backend) = cli.backend {
            config.backend = backend;
        }
        Ok(config)
    }
}

fn parse_controller(value: &str) -> Result<ControllerType> {
    value.parse().map_err(CliError::InvalidConfig)
}

pub(crate) fn poll_interval(ms: u64) -> Result<Duration> {
    if ms == 0 {
        return Err(CliError::InvalidConfig(
            "poll interval must be positive".to_string(),
        ));
    }
    Ok(Duration::from_millis(ms))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = Config::parse("").expect("config");
        assert_eq!(config, Config::default());
        assert_eq!(config.poll_interval, Duration::from_millis(50));
    }

    #[test]
    fn file_values_are_applied() {
        let yaml = "controller: playstation\nbackend: virtual\npoll_interval_ms: 16\n";
        let config = Config::parse(yaml).expect("config");
        assert_eq!(config.controller, ControllerType::Playstation);
        assert_eq!(config.backend, Backend::Virtual);
        assert_eq!(config.poll_interval, Duration::from_millis(16));
    }

    #[test]
    fn unknown_keys_and_values_are_rejected() {
        assert!(matches!(
            Config::parse("colour: red\n"),
            Err(CliError::ConfigParse(_))
        ));
        assert!(matches!(
            Config::parse("controller: wheel\n"),
            Err(CliError::InvalidConfig(_))
        ));
        assert!(matches!(
            Config::parse("poll_interval_ms: 0\n"),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn command_line_overrides_defaults() {
        let cli = Cli::parse_from(["unipadctl", "--controller", "xbox", "--backend", "virtual", "list"]);
        let config = Config::resolve(&cli).expect("config");
        assert_eq!(config.controller, ControllerType::Xbox);
        assert_eq!(config.backend, Backend::Virtual);
    }
}
