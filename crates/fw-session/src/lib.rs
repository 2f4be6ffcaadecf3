//! The interactive session layer for Furrow.
//!
//! A [`Session`] ties one [`fw_simulation::Simulation`] to the view engine
//! and tracks selection and overlays. A [`FrameScheduler`] paces simulated
//! days against wall-clock frames and routes [`InputEvent`]s. Each frame's
//! drawable output is a [`RenderState`], free of any graphics API.

/// Session configuration loaded from TOML.
pub mod config;
/// Error types for the session crate.
pub mod error;
/// Normalized input events and commands.
pub mod input;
/// Derived render state and overlays.
pub mod render;
/// Frame pacing and event routing.
pub mod scheduler;
/// The session: simulation, view, and selection.
pub mod session;

/// Re-exports of configuration types.
pub use config::{SessionConfig, ViewSettings};
/// Re-exports of [`error::SessionError`] and [`error::SessionResult`].
pub use error::{SessionError, SessionResult};
/// Re-exports of input types.
pub use input::{Command, InputEvent, Key};
/// Re-exports of render types.
pub use render::{FarmMarker, Heat, MarkerView, Overlay, PersonDot, RenderState, ScreenRect};
/// Re-exports of scheduler types.
pub use scheduler::{FrameReport, FrameScheduler, SchedulerConfig};
/// Re-exports of session types.
pub use session::{Selection, Session};
