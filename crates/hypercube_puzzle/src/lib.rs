//! Puzzle generation for the hypercube module
//!
//! At init the module draws one rotation per stage and derives the
//! correct target vertex for each from the device serial code. The
//! result is immutable for the lifetime of the module: the state machine
//! only ever reads it.
//!
//! Random draws go through an injected [`rand::Rng`], so a seeded
//! generator reproduces the exact same stage list.

mod generator;
mod rotation;
mod serial;

pub use generator::{generate, StagePlan};
pub use rotation::AxisPair;
pub use serial::digit_value;

/// Error deriving a puzzle from the device serial code
#[derive(Debug, PartialEq, Eq)]
pub enum PuzzleError {
    /// Serial code shorter than the 6 characters the derivation reads
    SerialTooShort(usize),
    /// Serial code contains a character outside 0-9, A-Z
    BadSerialChar(char),
}

impl std::fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PuzzleError::SerialTooShort(len) => {
                write!(f, "serial code has {} characters, need at least 6", len)
            }
            PuzzleError::BadSerialChar(c) => {
                write!(f, "serial code character {:?} is not alphanumeric", c)
            }
        }
    }
}

impl std::error::Error for PuzzleError {}
