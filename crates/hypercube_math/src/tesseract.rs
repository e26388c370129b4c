//! Tesseract (4D hypercube) vertex layout and projection
//!
//! A tesseract has 16 vertices (all combinations of ±1 for x,y,z,w),
//! 32 edges and 24 square faces. Vertex i encodes a sign pattern across
//! the 4 axes: bit i set means axis i is positive.
//!
//! The unrotated vertex set is authoritative: it is re-derived on every
//! call so that repeated rotation sweeps start from exact coordinates
//! instead of compounding float error.

use crate::{Vec3, Vec4};

/// Number of tesseract vertices
pub const VERTEX_COUNT: usize = 16;

/// Projection fold: xyz is scaled by `W_BASE + w * W_SCALE`, mapping the
/// unrotated cube to two nested cubes (outer w=+1, inner w=-1). The factor
/// stays positive for every w reachable by a plane rotation of the unit
/// tesseract (|w| ≤ √2).
const W_BASE: f32 = 0.75;
const W_SCALE: f32 = 0.25;

/// The 16 unrotated vertices: vertex i has coordinate +1 on axis a when
/// bit a of i is set, -1 otherwise.
pub fn unrotated_vertices() -> [Vec4; VERTEX_COUNT] {
    let mut vertices = [Vec4::ZERO; VERTEX_COUNT];
    for (i, v) in vertices.iter_mut().enumerate() {
        *v = Vec4::new(
            if i & 1 != 0 { 1.0 } else { -1.0 },
            if i & 2 != 0 { 1.0 } else { -1.0 },
            if i & 4 != 0 { 1.0 } else { -1.0 },
            if i & 8 != 0 { 1.0 } else { -1.0 },
        );
    }
    vertices
}

/// Project a 4D point to render coordinates by folding w into a uniform
/// xyz scale.
pub fn project(v: Vec4) -> Vec3 {
    v.xyz() * (W_BASE + v.w * W_SCALE)
}

/// Project all 16 vertices at once
pub fn project_all(vertices: &[Vec4; VERTEX_COUNT]) -> [Vec3; VERTEX_COUNT] {
    let mut out = [Vec3::ZERO; VERTEX_COUNT];
    for (p, v) in out.iter_mut().zip(vertices.iter()) {
        *p = project(*v);
    }
    out
}

/// A vertex sign pattern: the bijective 4-character "+-+-" form of a
/// vertex index, axis order X, Y, Z, W.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SignPattern(u8);

impl SignPattern {
    /// Build from a vertex index 0..15
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < VERTEX_COUNT);
        Self((index & 0xF) as u8)
    }

    /// The vertex index this pattern encodes
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether the given axis (0=X .. 3=W) is positive
    #[inline]
    pub fn is_positive(self, axis: usize) -> bool {
        self.0 >> axis & 1 == 1
    }

    /// Parse a 4-character string of '+' and '-'.
    /// Returns None on wrong length or any other character.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 4 {
            return None;
        }
        let mut bits = 0u8;
        for (axis, c) in s.chars().enumerate() {
            match c {
                '+' => bits |= 1 << axis,
                '-' => {}
                _ => return None,
            }
        }
        Some(Self(bits))
    }
}

impl std::fmt::Display for SignPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for axis in 0..4 {
            f.write_str(if self.is_positive(axis) { "+" } else { "-" })?;
        }
        Ok(())
    }
}
