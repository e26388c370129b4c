//! Resumable animation sequences
//!
//! Long-running behaviors are explicit progress-plus-duration state
//! objects advanced by the tick function, never threads. The module owns
//! at most one [`RotationSweep`] and one shrink at a time.

use hypercube_math::easing;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Durations (in seconds) of the module's animation sequences.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SweepTiming {
    /// Hold before each rotation sweep begins
    pub pre_sweep_pause: f32,
    /// One quarter-turn rotation sweep
    pub sweep: f32,
    /// Hold after the sweep snaps back to unrotated
    pub settle: f32,
    /// Color fade between stages and into submission
    pub color_fade: f32,
    /// Shrink-and-hide on solve
    pub shrink: f32,
    /// Gap between scripted presses
    pub press_gap: f32,
}

impl Default for SweepTiming {
    fn default() -> Self {
        Self {
            pre_sweep_pause: 0.75,
            sweep: 2.0,
            settle: 0.5,
            color_fade: 1.0,
            shrink: 1.0,
            press_gap: 0.2,
        }
    }
}

/// Where a rotation sweep iteration currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SweepPhase {
    /// Between iterations: stage changes are processed here
    Boundary,
    /// Waiting for a stage color fade to finish before sweeping
    AwaitColor,
    /// Pre-sweep hold
    Pause,
    /// The quarter-turn sweep itself
    Sweep,
    /// Post-sweep hold at the unrotated pose
    Settle,
}

/// One rotation sweep loop. The axes are re-read from the governing
/// stage plan at every iteration start, so a stage change between
/// iterations changes the plane without restarting the sequence.
#[derive(Clone, Copy, Debug)]
pub struct RotationSweep {
    pub phase: SweepPhase,
    pub elapsed: f32,
    pub axis1: usize,
    pub axis2: usize,
}

impl RotationSweep {
    pub fn new() -> Self {
        Self {
            phase: SweepPhase::Boundary,
            elapsed: 0.0,
            axis1: 0,
            axis2: 1,
        }
    }

    /// The eased sweep angle for the current elapsed time: 0 → π/2 over
    /// the sweep duration with a quadratic ease-in-out profile.
    pub fn angle(&self, timing: &SweepTiming) -> f32 {
        FRAC_PI_2 * easing::in_out_quad(self.elapsed / timing.sweep)
    }
}

impl Default for RotationSweep {
    fn default() -> Self {
        Self::new()
    }
}

/// The shrink-and-hide played once on solve: scale eases from 1 to 0.
#[derive(Clone, Copy, Debug)]
pub struct ShrinkAnimation {
    elapsed: f32,
    duration: f32,
}

impl ShrinkAnimation {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.0,
            duration,
        }
    }

    /// Advance by one tick. Returns true once fully shrunk.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        self.elapsed >= self.duration
    }

    /// Current scale in [0, 1]
    pub fn scale(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        1.0 - easing::in_quad((self.elapsed / self.duration).clamp(0.0, 1.0))
    }
}
