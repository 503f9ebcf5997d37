//! Vertex attribute storage and topology queries.

use glam::{Vec2, Vec3};
use std::collections::BTreeSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error(
        "attribute length mismatch: {positions} positions, {normals} normals, {uvs} uvs"
    )]
    AttributeLengthMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },
    #[error("face index {index} out of bounds for {vertex_count} vertices")]
    FaceIndexOutOfBounds { index: u32, vertex_count: usize },
    #[error("flat position array has {actual} floats, expected {expected}")]
    FlatLengthMismatch { expected: usize, actual: usize },
}

/// Triangle mesh attribute buffer.
///
/// Holds one position, normal, and UV per vertex plus triangle faces indexing
/// into them. Construction validates that the attribute arrays agree in length
/// and that every face index is in bounds; engines may assume both afterward.
#[derive(Debug, Clone)]
pub struct MeshBuffer {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    faces: Vec<[u32; 3]>,
}

impl MeshBuffer {
    /// Create a buffer from raw attributes, validating the topology invariant.
    pub fn new(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        faces: Vec<[u32; 3]>,
    ) -> Result<Self, BufferError> {
        if positions.len() != normals.len() || positions.len() != uvs.len() {
            return Err(BufferError::AttributeLengthMismatch {
                positions: positions.len(),
                normals: normals.len(),
                uvs: uvs.len(),
            });
        }
        let vertex_count = positions.len();
        for face in &faces {
            for &index in face {
                if index as usize >= vertex_count {
                    return Err(BufferError::FaceIndexOutOfBounds {
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self {
            positions,
            normals,
            uvs,
            faces,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable position access for the editing engines.
    ///
    /// Callers that move any vertex must call [`Self::recompute_normals`]
    /// before normal data is read again.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    #[inline]
    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Recompute per-vertex normals as the normalized sum of adjacent face
    /// normals. Face normals are left unnormalized in the accumulation, so
    /// larger triangles weigh more.
    pub fn recompute_normals(&mut self) {
        for normal in &mut self.normals {
            *normal = Vec3::ZERO;
        }
        for face in &self.faces {
            let [a, b, c] = face.map(|i| i as usize);
            let pa = self.positions[a];
            let pb = self.positions[b];
            let pc = self.positions[c];
            let face_normal = (pb - pa).cross(pc - pa);
            self.normals[a] += face_normal;
            self.normals[b] += face_normal;
            self.normals[c] += face_normal;
        }
        for normal in &mut self.normals {
            *normal = normal.normalize_or_zero();
        }
    }

    /// Unique undirected edges of the face topology.
    ///
    /// Each edge shared by two triangles appears once, keyed as
    /// `(min(a, b), max(a, b))`.
    pub fn unique_edges(&self) -> Vec<(u32, u32)> {
        let mut edges = BTreeSet::new();
        for &[a, b, c] in &self.faces {
            for (i, j) in [(a, b), (b, c), (c, a)] {
                edges.insert((i.min(j), i.max(j)));
            }
        }
        edges.into_iter().collect()
    }

    /// Positions as a flat `[x0, y0, z0, x1, ...]` array for persistence.
    pub fn positions_flat(&self) -> Vec<f32> {
        let mut flat = Vec::with_capacity(self.positions.len() * 3);
        for p in &self.positions {
            flat.extend_from_slice(&p.to_array());
        }
        flat
    }

    /// Overwrite all positions from a flat float array.
    ///
    /// Rejects the whole array on a length mismatch rather than partially
    /// overwriting the buffer. Normals are stale after a successful call.
    pub fn set_positions_flat(&mut self, flat: &[f32]) -> Result<(), BufferError> {
        let expected = self.positions.len() * 3;
        if flat.len() != expected {
            return Err(BufferError::FlatLengthMismatch {
                expected,
                actual: flat.len(),
            });
        }
        for (position, chunk) in self.positions.iter_mut().zip(flat.chunks_exact(3)) {
            *position = Vec3::new(chunk[0], chunk[1], chunk[2]);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshBuffer {
        // Two triangles sharing the (0, 2) diagonal.
        MeshBuffer::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Vec3::Z; 4],
            vec![Vec2::ZERO; 4],
            vec![[0, 1, 2], [0, 2, 3]],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_attribute_mismatch() {
        let result = MeshBuffer::new(
            vec![Vec3::ZERO; 3],
            vec![Vec3::Z; 2],
            vec![Vec2::ZERO; 3],
            vec![],
        );
        assert!(matches!(
            result,
            Err(BufferError::AttributeLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_bounds_face() {
        let result = MeshBuffer::new(
            vec![Vec3::ZERO; 3],
            vec![Vec3::Z; 3],
            vec![Vec2::ZERO; 3],
            vec![[0, 1, 3]],
        );
        assert!(matches!(
            result,
            Err(BufferError::FaceIndexOutOfBounds { index: 3, .. })
        ));
    }

    #[test]
    fn test_recompute_normals_unit_and_perpendicular() {
        let mut buffer = quad();
        // Move a vertex off the plane, then recompute.
        buffer.positions_mut()[2].z = 0.5;
        buffer.recompute_normals();

        for &normal in buffer.normals() {
            assert!((normal.length() - 1.0).abs() < 1e-5);
        }

        // Vertex 1 belongs only to face (0, 1, 2); its normal must be
        // perpendicular to both edges of that face.
        let pa = buffer.positions()[0];
        let pb = buffer.positions()[1];
        let pc = buffer.positions()[2];
        let n = buffer.normals()[1];
        assert!(n.dot(pb - pa).abs() < 1e-5);
        assert!(n.dot(pc - pa).abs() < 1e-5);
    }

    #[test]
    fn test_unique_edges_deduplicates_shared_diagonal() {
        let buffer = quad();
        let edges = buffer.unique_edges();
        // 6 directed half-edges, but the shared diagonal counts once: 5 edges.
        assert_eq!(edges.len(), 5);
        assert!(edges.contains(&(0, 2)));
    }

    #[test]
    fn test_flat_positions_round_trip() {
        let mut buffer = quad();
        let mut flat = buffer.positions_flat();
        assert_eq!(flat.len(), 12);

        flat[3] = 7.0;
        buffer.set_positions_flat(&flat).unwrap();
        assert_eq!(buffer.positions()[1].x, 7.0);
    }

    #[test]
    fn test_flat_positions_rejects_mismatch() {
        let mut buffer = quad();
        let before = buffer.positions().to_vec();
        let result = buffer.set_positions_flat(&[0.0; 9]);
        assert!(matches!(
            result,
            Err(BufferError::FlatLengthMismatch {
                expected: 12,
                actual: 9,
            })
        ));
        // Rejection leaves the buffer untouched.
        assert_eq!(buffer.positions(), before.as_slice());
    }
}
