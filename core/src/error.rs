//! Error types for the devlaunch-core library.

use thiserror::Error;

/// Result type alias for devlaunch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while launching and supervising the dev server.
#[derive(Error, Debug)]
pub enum Error {
    /// No free port was found within the retry budget.
    #[error("No free port found in {min}-{max} after {attempts} attempts")]
    PortExhausted { attempts: u32, min: u16, max: u16 },

    /// Port range bounds are invalid.
    #[error("Invalid port range: {0}")]
    InvalidRange(String),

    /// Failed to start the dev server process.
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// An external command ran but reported failure.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// An external command did not finish in time.
    #[error("Command timed out: {0}")]
    Timeout(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
