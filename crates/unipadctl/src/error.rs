use thiserror::Error;

use crate::config::Backend;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: String,
        source: std::io::Error,
    },
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("backend {0} is not available in this build")]
    BackendUnavailable(Backend),
    #[error("platform error: {0}")]
    Platform(#[from] unipad_platform::Error),
    #[error("controller error: {0}")]
    Controller(#[from] unipad::Error),
    #[error("no native gamepad attached")]
    NoGamepad,
    #[error("failed to set up logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
