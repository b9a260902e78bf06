use thiserror::Error;

use crate::types::ControllerType;

/// Error type for controller operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The device failed to produce a battery report.
    #[error("battery report failed: {0}")]
    Battery(#[from] unipad_platform::Error),
    /// No adapter exists for the requested controller type.
    #[error("controller type {0} is not supported")]
    Unsupported(ControllerType),
    /// Automatic detection found nothing attached.
    #[error("no controller attached")]
    NoController,
}

/// Convenient result alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
