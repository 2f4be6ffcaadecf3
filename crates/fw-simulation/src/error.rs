use fw_core::{CoreError, SimDate};

/// Convenience alias for simulation results.
pub type SimResult<T> = Result<T, SimError>;

/// Configuration problems that keep a simulation from starting.
///
/// Runtime conditions (unknown policy ids, dangling farm references, dates
/// outside every era) are never errors; they fall back to neutral defaults.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The era table has no entries.
    #[error("era table is empty")]
    EmptyEraTable,

    /// No era contains the configured start date.
    #[error("era table does not cover the start date {0}")]
    StartNotCovered(SimDate),

    /// The tick size must move the calendar forward.
    #[error("tick_days must be at least 1, got {0}")]
    InvalidTickDays(i32),

    /// World generation parameters cannot produce a world.
    #[error("invalid world generation settings: {0}")]
    InvalidWorldGen(String),

    /// An error from the core data model.
    #[error(transparent)]
    Core(#[from] CoreError),
}
