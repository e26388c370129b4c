//! Per-stage rotation draw and target derivation

use hypercube_math::SignPattern;
use rand::Rng;

use crate::{digit_value, AxisPair, PuzzleError};

/// One generated stage: the rotation the hypercube performs and the
/// vertex the player must press for it during submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StagePlan {
    pub rotation: AxisPair,
    pub target: SignPattern,
}

/// Generate the full stage list for a device.
///
/// Per stage i the rotation is a uniform draw over the 12 axis pairs and
/// the target is the rotation's template with its two placeholders
/// filled from `digit_value(serial[i % 6]) % 4`: the high bit drives the
/// first placeholder, the low bit the second ('-' for 0, '+' for 1).
///
/// Identical serial + identical rotation draws produce identical
/// targets; seed the rng to reproduce a run.
pub fn generate<R: Rng>(
    serial: &str,
    stage_count: usize,
    rng: &mut R,
) -> Result<Vec<StagePlan>, PuzzleError> {
    let chars: Vec<char> = serial.chars().collect();
    if chars.len() < 6 {
        return Err(PuzzleError::SerialTooShort(chars.len()));
    }
    // Only the first six characters are ever read; validate them all up
    // front so a bad serial fails at init, not mid-generation.
    for &c in &chars[..6] {
        digit_value(c)?;
    }

    let mut plans = Vec::with_capacity(stage_count);
    for i in 0..stage_count {
        let rotation = AxisPair::ALL[rng.gen_range(0..AxisPair::ALL.len())];
        let val = digit_value(chars[i % 6])? % 4;
        plans.push(StagePlan {
            rotation,
            target: fill_template(rotation.template(), val),
        });
    }
    Ok(plans)
}

/// Fill a rotation template's two placeholders from the two bits of
/// `val` (0..4), fixed characters copied verbatim.
fn fill_template(template: &str, val: u32) -> SignPattern {
    let mut bits = 0usize;
    let mut placeholder = 0;
    for (axis, c) in template.chars().enumerate() {
        let positive = match c {
            '+' => true,
            '-' => false,
            _ => {
                let bit = if placeholder == 0 { val / 2 } else { val % 2 };
                placeholder += 1;
                bit == 1
            }
        };
        if positive {
            bits |= 1 << axis;
        }
    }
    SignPattern::from_index(bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fill_template_bit_order() {
        // val=1: high bit 0 → '-', low bit 1 → '+'
        assert_eq!(fill_template("+.+.", 1).to_string(), "+-++");
        // val=2: high bit 1 → '+', low bit 0 → '-'
        assert_eq!(fill_template("+.+.", 2).to_string(), "+++-");
        // val=0 and val=3
        assert_eq!(fill_template("..++", 0).to_string(), "--++");
        assert_eq!(fill_template("..++", 3).to_string(), "++++");
    }

    #[test]
    fn test_generate_counts_and_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let plans = generate("AB3XY9", 10, &mut rng).unwrap();
        assert_eq!(plans.len(), 10);
        for plan in &plans {
            let s = plan.target.to_string();
            assert_eq!(s.len(), 4);
            assert!(s.chars().all(|c| c == '+' || c == '-'));
        }
    }

    #[test]
    fn test_generate_is_deterministic_under_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        let first = generate("AB3XY9", 8, &mut a).unwrap();
        let second = generate("AB3XY9", 8, &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_target_is_pure_function_of_rotation_and_serial() {
        // Serial "AB3XY9" stage values: A→1, B→2, '3'→3 (mod 4)
        for (stage, expect_val) in [(0usize, 1u32), (1, 2), (2, 3)] {
            // Fix the rotation draw and check the target against a direct
            // template fill for that stage's serial character.
            let mut rng = StdRng::seed_from_u64(5);
            let plans = generate("AB3XY9", stage + 1, &mut rng).unwrap();
            let plan = plans[stage];
            assert_eq!(plan.target, fill_template(plan.rotation.template(), expect_val));
        }
    }

    #[test]
    fn test_serial_wraps_after_six_characters() {
        let mut rng = StdRng::seed_from_u64(9);
        // Position 6 holds 'Z' (val 2) but stage 6 wraps back to
        // serial[0] = 'A' (val 1).
        let plans = generate("AB3XY9ZZ", 7, &mut rng).unwrap();
        let plan = plans[6];
        assert_eq!(plan.target, fill_template(plan.rotation.template(), 1));
        assert_ne!(plan.target, fill_template(plan.rotation.template(), 2));
    }

    #[test]
    fn test_short_serial_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate("AB3", 2, &mut rng),
            Err(PuzzleError::SerialTooShort(3))
        );
    }

    #[test]
    fn test_bad_serial_character_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            generate("AB3xY9", 1, &mut rng),
            Err(PuzzleError::BadSerialChar('x'))
        );
    }
}
