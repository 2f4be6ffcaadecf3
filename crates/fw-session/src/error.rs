use std::path::PathBuf;

use fw_simulation::SimError;
use fw_view::ViewError;

/// Convenience alias for session results.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised while loading configuration or starting a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be written as TOML.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A numeric setting is out of range.
    #[error("{name} must be positive and finite, got {value}")]
    InvalidSetting {
        /// Setting name.
        name: &'static str,
        /// Configured value.
        value: f64,
    },

    /// A simulation configuration error.
    #[error(transparent)]
    Sim(#[from] SimError),

    /// A view configuration error.
    #[error(transparent)]
    View(#[from] ViewError),
}
