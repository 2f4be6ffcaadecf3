/// Convenience alias for view results.
pub type ViewResult<T> = Result<T, ViewError>;

/// Configuration problems in the view engine.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The level table has no entries.
    #[error("level table is empty")]
    EmptyLevelTable,

    /// A level scale is zero, negative, or not finite.
    #[error("level '{id}' has invalid scale {scale}")]
    InvalidScale {
        /// The offending level.
        id: String,
        /// Its configured scale.
        scale: f64,
    },

    /// Two levels share an id.
    #[error("duplicate level id '{0}'")]
    DuplicateLevel(String),

    /// The zoom band is empty or not positive.
    #[error("invalid zoom bounds [{min}, {max}]")]
    InvalidZoomBounds {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A camera or transition setting must be positive and finite.
    #[error("{name} must be positive and finite, got {value}")]
    NonPositiveSetting {
        /// Setting name.
        name: &'static str,
        /// Configured value.
        value: f64,
    },
}
