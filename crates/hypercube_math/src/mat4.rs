//! 4x4 matrix utilities for 4D rotations
//!
//! In 4D, rotations happen in planes rather than around axes. A stage
//! rotation is a single plane rotation applied to all 16 vertices.

use crate::Vec4;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in a specific 2D plane within 4D space.
///
/// The matrix is identity everywhere except the 2x2 block at rows/cols
/// `p1`,`p2`, which holds the usual cos/sin rotation block.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z, 3=W)
pub fn plane_rotation(angle: f32, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    // Rotation in plane p1-p2
    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a Vec4 by a 4x4 matrix (column-major)
///
/// result = M * v
pub fn transform(m: Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m[0][0] * v.x + m[1][0] * v.y + m[2][0] * v.z + m[3][0] * v.w,
        m[0][1] * v.x + m[1][1] * v.y + m[2][1] * v.z + m[3][1] * v.w,
        m[0][2] * v.x + m[1][2] * v.y + m[2][2] * v.z + m[3][2] * v.w,
        m[0][3] * v.x + m[1][3] * v.y + m[2][3] * v.z + m[3][3] * v.w,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    #[test]
    fn test_identity() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert!(vec_approx_eq(transform(IDENTITY, v), v));
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let m = plane_rotation(0.0, 0, 3);
        let v = Vec4::new(1.0, -1.0, 1.0, -1.0);
        assert!(vec_approx_eq(transform(m, v), v));
    }

    #[test]
    fn test_quarter_turn_xy() {
        // At θ=π/2 in the XY plane, (+1,+1,z,w) maps to (-1,+1,z,w)
        // per the matrix definition, not geometric intuition.
        let m = plane_rotation(FRAC_PI_2, 0, 1);
        let v = Vec4::new(1.0, 1.0, -1.0, 1.0);
        let result = transform(m, v);
        assert!(
            vec_approx_eq(result, Vec4::new(-1.0, 1.0, -1.0, 1.0)),
            "got {:?}",
            result
        );
    }

    #[test]
    fn test_quarter_turn_zw() {
        // Untouched axes pass through unchanged
        let m = plane_rotation(FRAC_PI_2, 2, 3);
        let v = Vec4::new(1.0, -1.0, 1.0, 0.0);
        let result = transform(m, v);
        assert!(approx_eq(result.x, 1.0));
        assert!(approx_eq(result.y, -1.0));
        assert!(approx_eq(result.z, 0.0));
        assert!(approx_eq(result.w, 1.0));
    }

    #[test]
    fn test_mul_composition() {
        // Two 45° rotations should equal one 90° rotation
        let r45 = plane_rotation(FRAC_PI_4, 0, 1);
        let r90 = plane_rotation(FRAC_PI_2, 0, 1);

        let composed = mul(r45, r45);

        let v = Vec4::new(1.0, 0.0, 0.0, 0.0);
        let result1 = transform(composed, v);
        let result2 = transform(r90, v);

        assert!(
            vec_approx_eq(result1, result2),
            "Composed: {:?}, Direct: {:?}",
            result1,
            result2
        );
    }

    #[test]
    fn test_mul_identity() {
        let a = plane_rotation(0.5, 1, 3);
        let v = Vec4::new(0.3, -0.7, 1.1, 0.2);
        assert!(vec_approx_eq(
            transform(mul(IDENTITY, a), v),
            transform(a, v)
        ));
        assert!(vec_approx_eq(
            transform(mul(a, IDENTITY), v),
            transform(a, v)
        ));
    }
}
