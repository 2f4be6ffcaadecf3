//! Era-aware daily simulation for Furrow.
//!
//! A [`Simulation`] owns a [`fw_core::World`], a [`TimeController`] that walks
//! the calendar through an era table, and a [`PolicyRegistry`] of named daily
//! effects. Each simulated day resets farms, applies the active era's
//! policies, computes yields, updates households and persons, and refreshes
//! the [`SimulationMetrics`] snapshot.

/// Calendar advancement and active-era resolution.
pub mod clock;
/// Configuration types for simulation runs.
pub mod config;
/// Mutable state handed to policies each day.
pub mod context;
/// Error types for the simulation crate.
pub mod error;
/// Simulation event types and the bounded event log.
pub mod event;
/// Aggregate metrics recomputed after every day.
pub mod metrics;
/// Named daily policies and the registry that resolves them.
pub mod policy;
/// Seeded generation of the initial world.
pub mod setup;
/// Top-level simulation orchestrator.
pub mod simulation;

/// Re-exports of [`clock::TimeController`] and [`clock::EraResolution`].
pub use clock::{EraResolution, TimeController};
/// Re-export of [`config::SimConfig`].
pub use config::SimConfig;
/// Re-export of [`context::PolicyContext`].
pub use context::PolicyContext;
/// Re-exports of [`error::SimError`] and [`error::SimResult`].
pub use error::{SimError, SimResult};
/// Re-exports of [`event::EventLog`], [`event::SimEvent`], and [`event::SimEventKind`].
pub use event::{EventLog, SimEvent, SimEventKind};
/// Re-export of [`metrics::SimulationMetrics`].
pub use metrics::SimulationMetrics;
/// Re-exports of [`policy::Policy`] and [`policy::PolicyRegistry`].
pub use policy::{Policy, PolicyRegistry};
/// Re-exports of [`setup::WorldGenConfig`] and [`setup::generate_world`].
pub use setup::{WorldGenConfig, generate_world};
/// Re-exports of [`simulation::Simulation`] and [`simulation::DayReport`].
pub use simulation::{DayReport, Simulation};
