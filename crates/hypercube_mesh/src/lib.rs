//! Derived mesh for the projected tesseract
//!
//! Given the 16 projected vertices, derives the 32 edges (pairs of
//! indices at Hamming distance 1) and the 24 square faces (split into 48
//! triangles). The mesh is recomputed from scratch on every update and
//! the new value replaces the previous one wholesale; nothing is patched
//! incrementally.

use hypercube_math::{Vec3, VERTEX_COUNT};

/// An edge between two vertices whose indices differ in exactly one bit.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    /// Lower endpoint index
    pub a: usize,
    /// Higher endpoint index
    pub b: usize,
    /// Midpoint in render coordinates
    pub midpoint: Vec3,
    /// Unit direction from a to b
    pub direction: Vec3,
    /// Distance between the endpoints
    pub length: f32,
}

/// A triangle over three vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub indices: [usize; 3],
}

/// A square face of the tesseract, stored by its four corner indices in
/// the order (i&j, i, i|j, j) for a diagonal pair (i, j).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quad {
    pub corners: [usize; 4],
}

/// The full derived mesh: projected vertex positions plus edge and face
/// records.
#[derive(Clone, Debug, Default)]
pub struct WireMesh {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<Edge>,
    pub quads: Vec<Quad>,
    pub triangles: Vec<Triangle>,
}

impl WireMesh {
    /// Build the mesh for one set of projected vertices.
    ///
    /// Always succeeds: every 16-point input has exactly 32 edges and 24
    /// quads by construction.
    pub fn build(points: &[Vec3; VERTEX_COUNT]) -> Self {
        let mut edges = Vec::with_capacity(32);
        let mut quads = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(48);

        for i in 0..VERTEX_COUNT {
            for j in (i + 1)..VERTEX_COUNT {
                let diff = i ^ j;
                match diff.count_ones() {
                    1 => {
                        let delta = points[j] - points[i];
                        let length = delta.length();
                        edges.push(Edge {
                            a: i,
                            b: j,
                            midpoint: points[i].midpoint(points[j]),
                            direction: delta.normalized(),
                            length,
                        });
                    }
                    2 if (i & diff).count_ones() == 1 => {
                        // i and j each carry one of the two differing bits,
                        // so they are diagonal corners of a square whose
                        // other diagonal is (i&j, i|j).
                        let lo = i & j;
                        let hi = i | j;
                        quads.push(Quad {
                            corners: [lo, i, hi, j],
                        });
                        triangles.push(Triangle { indices: [i, hi, lo] });
                        triangles.push(Triangle { indices: [j, hi, lo] });
                    }
                    _ => {}
                }
            }
        }

        Self {
            vertices: points.to_vec(),
            edges,
            quads,
            triangles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypercube_math::tesseract::{project_all, unrotated_vertices};
    use std::collections::HashSet;

    fn base_mesh() -> WireMesh {
        WireMesh::build(&project_all(&unrotated_vertices()))
    }

    #[test]
    fn test_counts() {
        let mesh = base_mesh();
        assert_eq!(mesh.vertices.len(), 16);
        assert_eq!(mesh.edges.len(), 32);
        assert_eq!(mesh.quads.len(), 24);
        assert_eq!(mesh.triangles.len(), 48);
    }

    #[test]
    fn test_edges_cover_all_hamming_one_pairs() {
        let mesh = base_mesh();
        let found: HashSet<(usize, usize)> = mesh.edges.iter().map(|e| (e.a, e.b)).collect();
        assert_eq!(found.len(), 32, "duplicate edges");
        for i in 0..16usize {
            for j in (i + 1)..16 {
                if (i ^ j).count_ones() == 1 {
                    assert!(found.contains(&(i, j)), "missing edge ({}, {})", i, j);
                }
            }
        }
    }

    #[test]
    fn test_quads_cover_all_diagonal_pairs() {
        let mesh = base_mesh();
        let mut seen = HashSet::new();
        for quad in &mesh.quads {
            let mut sorted = quad.corners;
            sorted.sort_unstable();
            assert!(seen.insert(sorted), "duplicate quad {:?}", quad.corners);

            // Corners are (lo, i, hi, j): diagonals differ in two bits,
            // adjacent corners in one.
            let [lo, i, hi, j] = quad.corners;
            assert_eq!((i ^ j).count_ones(), 2);
            assert_eq!(lo, i & j);
            assert_eq!(hi, i | j);
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_triangle_pairs_cover_quad_corners() {
        let mesh = base_mesh();
        for (q, quad) in mesh.quads.iter().enumerate() {
            let t1 = &mesh.triangles[2 * q];
            let t2 = &mesh.triangles[2 * q + 1];
            let covered: HashSet<usize> =
                t1.indices.iter().chain(t2.indices.iter()).copied().collect();
            let corners: HashSet<usize> = quad.corners.iter().copied().collect();
            assert_eq!(covered, corners, "quad {} not covered", q);
            // The shared diagonal is (lo, hi), so the triangles differ
            // only in which diagonal corner they include.
            assert_ne!(t1.indices[0], t2.indices[0]);
            assert_eq!(&t1.indices[1..], &t2.indices[1..]);
        }
    }

    #[test]
    fn test_edge_records_are_consistent() {
        let mesh = base_mesh();
        for edge in &mesh.edges {
            let a = mesh.vertices[edge.a];
            let b = mesh.vertices[edge.b];
            let expect_mid = a.midpoint(b);
            assert!((edge.midpoint - expect_mid).length() < 1e-6);
            assert!((edge.length - (b - a).length()).abs() < 1e-6);
            // direction points from a toward b
            assert!((edge.direction * edge.length - (b - a)).length() < 1e-5);
        }
    }

    #[test]
    fn test_rebuild_replaces_everything() {
        let first = base_mesh();
        let mut scaled = project_all(&unrotated_vertices());
        for p in scaled.iter_mut() {
            *p = *p * 2.0;
        }
        let second = WireMesh::build(&scaled);
        assert_eq!(second.edges.len(), first.edges.len());
        assert!((second.edges[0].length - first.edges[0].length * 2.0).abs() < 1e-5);
    }
}
