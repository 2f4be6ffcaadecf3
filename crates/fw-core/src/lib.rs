//! Core types for Furrow: eras, farms, persons, households, and the world model.
//!
//! This crate holds the data model the simulation ticks over. Entities refer
//! to one another only by id; the [`World`] owns every collection and keeps
//! id-to-index maps so lookups stay O(1).

/// Integer day-count dates and calendar conversion.
pub mod date;
/// Historical eras and the ordered era table.
pub mod era;
/// Error types used throughout the crate.
pub mod error;
/// Farm state and the daily yield model.
pub mod farm;
/// Household state and daily consumption.
pub mod household;
/// Typed identifiers for farms, persons, and households.
pub mod id;
/// Person state and the daily person update.
pub mod person;
/// The world model that owns all entity collections.
pub mod world;

/// Re-export the simulation date type.
pub use date::SimDate;
/// Re-export era types.
pub use era::{Era, EraTable};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export farm types.
pub use farm::{Farm, Ownership};
/// Re-export the household type.
pub use household::Household;
/// Re-export identifier types.
pub use id::{FarmId, HouseholdId, PersonId};
/// Re-export the person type.
pub use person::Person;
/// Re-export the world model.
pub use world::World;
