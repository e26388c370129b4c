//! Serial-code character decoding
//!
//! The device serial code is alphanumeric. Digits map to their value and
//! letters to their alphabet position ('A' = 1 .. 'Z' = 26).

use crate::PuzzleError;

/// Decode one serial-code character.
pub fn digit_value(c: char) -> Result<u32, PuzzleError> {
    match c {
        '0'..='9' => Ok(c as u32 - '0' as u32),
        'A'..='Z' => Ok(c as u32 - 'A' as u32 + 1),
        _ => Err(PuzzleError::BadSerialChar(c)),
    }
}
