//! Core state machine for the hypercube puzzle module
//!
//! This crate ties the geometry engine, derived mesh, and puzzle
//! generator together into a playable module:
//!
//! - [`BombHost`] - what the module consumes from the host game
//! - [`HypercubeModule`] - the tick-driven module itself
//! - [`ModuleState`] / [`ModuleFlags`] - progression state and flags
//! - [`ColorTransition`] / [`RotationSweep`] / [`ShrinkAnimation`] -
//!   resumable animation sequences driven by the tick function
//!
//! Everything runs on single-threaded cooperative scheduling: the host
//! calls [`HypercubeModule::tick`] once per frame with the elapsed time
//! and the module advances whatever sequences are in flight.

mod animation;
mod color;
mod host;
mod module;
mod state;

pub use animation::{RotationSweep, ShrinkAnimation, SweepPhase, SweepTiming};
pub use color::{hsv_to_rgb, ColorTransition, Hsv, MaterialColors};
pub use host::BombHost;
pub use module::{HypercubeModule, MODULE_NAME, SOLVED_TEXT};
pub use state::{ModuleFlags, ModuleState};

// Re-export commonly used types from the leaf crates for convenience
pub use hypercube_math::{SignPattern, Vec3, Vec4, VERTEX_COUNT};
pub use hypercube_mesh::WireMesh;
pub use hypercube_puzzle::{AxisPair, PuzzleError, StagePlan};
