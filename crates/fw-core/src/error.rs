use crate::id::{FarmId, HouseholdId, PersonId};

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building the world model or the era table.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A farm with the same id is already part of the world.
    #[error("duplicate farm id: {0}")]
    DuplicateFarm(FarmId),

    /// A person with the same id is already part of the world.
    #[error("duplicate person id: {0}")]
    DuplicatePerson(PersonId),

    /// A household with the same id is already part of the world.
    #[error("duplicate household id: {0}")]
    DuplicateHousehold(HouseholdId),

    /// The era table has no entries.
    #[error("era table is empty")]
    EmptyEraTable,

    /// An era ends before it starts.
    #[error("era \"{id}\" ends ({end}) before it starts ({start})")]
    InvertedEra {
        /// The offending era id.
        id: String,
        /// The era start date.
        start: String,
        /// The era end date.
        end: String,
    },

    /// Two eras overlap or are listed out of chronological order.
    #[error("era \"{next}\" starts on or before the end of \"{previous}\"")]
    EraOverlap {
        /// The earlier era in table order.
        previous: String,
        /// The era that starts too early.
        next: String,
    },

    /// A calendar date could not be represented.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
