//! Module progression state

use bitflags::bitflags;

bitflags! {
    /// Flags tracking what the module currently permits and which
    /// orthogonal modes (submission, recovery) are active.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ModuleFlags: u8 {
        /// The current sweep has finished and a stage change may be
        /// processed before the next one begins
        const READY_TO_ADVANCE = 1 << 0;
        /// A wrong submission press is waiting to be acknowledged
        const STAGE_RECOVERY = 1 << 1;
        /// All stages played; presses are compared against targets
        const SUBMISSION = 1 << 2;
        /// Vertex presses are accepted
        const ALLOWED_TO_PRESS = 1 << 3;
        /// Rotation sweeps may run
        const CAN_ROTATE = 1 << 4;
        /// A finishing color transition may arm submission input
        const CAN_CONTINUE = 1 << 5;
        /// A color transition is in flight (blocks presses)
        const ANIMATING = 1 << 6;
        /// Terminal: the module has passed
        const SOLVED = 1 << 7;
    }
}

/// Progression counters plus the flag set. Mutated only by the state
/// machine in `module.rs`.
#[derive(Clone, Copy, Debug)]
pub struct ModuleState {
    /// Index of the stage currently playing; -1 before the first stage
    pub current_stage: i32,
    /// Count of non-ignored host solves observed at the last poll
    pub current_solves: usize,
    /// Index of the submission press the player is expected to make
    pub current_submission: usize,
    pub flags: ModuleFlags,
}

impl ModuleState {
    pub fn new() -> Self {
        Self {
            current_stage: -1,
            current_solves: 0,
            current_submission: 0,
            flags: ModuleFlags::empty(),
        }
    }
}

impl Default for ModuleState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = ModuleState::new();
        assert_eq!(state.current_stage, -1);
        assert_eq!(state.current_solves, 0);
        assert_eq!(state.current_submission, 0);
        assert!(state.flags.is_empty());
    }

    #[test]
    fn test_flags_are_distinct() {
        let all = ModuleFlags::all();
        assert_eq!(all.bits().count_ones(), 8);
    }
}
