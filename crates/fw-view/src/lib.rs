//! The hierarchical view engine for Furrow.
//!
//! Levels run from `house` (closest) to `world` (farthest). A
//! [`LevelTransition`] eases between level scales, a [`Camera`] smooths
//! panning and wheel zoom, and the pair together define the world/screen
//! transform used for picking. Nothing here knows about the simulation.

/// The smoothed camera and the world/screen transform.
pub mod camera;
/// Error types for the view crate.
pub mod error;
/// Per-level bounds and marker entities.
pub mod layout;
/// Level definitions and the ordered level table.
pub mod level;
/// Nearest-entity picking.
pub mod pick;
/// The eased level transition state machine.
pub mod transition;

/// Re-exports of camera types.
pub use camera::{Camera, CameraConfig, Viewport};
/// Re-exports of [`error::ViewError`] and [`error::ViewResult`].
pub use error::{ViewError, ViewResult};
/// Re-exports of layout types.
pub use layout::{Bounds, LevelLayout, Marker, MarkerKind, WorldLayout};
/// Re-exports of level types.
pub use level::{Level, LevelTable};
/// Re-exports of picking helpers.
pub use pick::{Pick, pick_nearest};
/// Re-exports of transition types.
pub use transition::{LevelRequest, LevelTransition, ease_in_out_cubic, lerp};
