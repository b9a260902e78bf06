use thiserror::Error;

/// Error type for platform operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// The device could not produce a battery report.
    #[error("Battery report unavailable")]
    BatteryUnavailable,
    /// Operation is not supported on the current device/backend.
    #[error("Operation unsupported")]
    Unsupported,
    /// A generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Convenient result alias for platform operations.
pub type Result<T> = std::result::Result<T, Error>;
