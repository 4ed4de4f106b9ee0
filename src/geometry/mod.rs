//! # Procedural Geometry Generation
//!
//! This module provides functions to generate common 3D primitive shapes procedurally,
//! eliminating the need for external model files for basic shapes. Mesh resources use
//! these generators to realize their build parameters.
//!
//! ## Supported Primitives
//!
//! - **Plane**: flat plane with configurable size, subdivisions and UV tiling
//! - **Cube**: box with configurable edge lengths
//! - **Ico-sphere**: subdivided icosahedron with configurable tessellation
//! - **Cylinder**: capped cylinder with configurable resolution
//!
//! All shapes are generated in a Z-up coordinate system with outward normals
//! and texture coordinates.

pub mod primitives;

pub use primitives::*;

/// Generated geometry ready for upload or collision-bound computation
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub positions: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends another piece of geometry, offsetting its indices past the
    /// vertices already present. Used when a mesh is built from several
    /// primitive parameters.
    pub fn append(&mut self, other: GeometryData) {
        let base = self.positions.len() as u32;
        self.positions.extend(other.positions);
        self.normals.extend(other.normals);
        self.tex_coords.extend(other.tex_coords);
        self.indices.extend(other.indices.into_iter().map(|i| i + base));
    }

    /// Axis-aligned bounds of the vertex positions, as (min, max).
    /// Returns None for empty geometry.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        let first = *self.positions.first()?;
        let mut min = first;
        let mut max = first;
        for p in &self.positions {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some((min, max))
    }
}

/// Computes smooth per-vertex normals by averaging the face normals of every
/// triangle touching each vertex. Used as a fallback when an OBJ file ships
/// positions without normals.
pub fn averaged_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut normals = vec![[0.0f32; 3]; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (v0, v1, v2) = (positions[i0], positions[i1], positions[i2]);

        let e1 = [v1[0] - v0[0], v1[1] - v0[1], v1[2] - v0[2]];
        let e2 = [v2[0] - v0[0], v2[1] - v0[1], v2[2] - v0[2]];

        // Cross product gives an area-weighted face normal, so larger
        // triangles contribute more to the averaged result.
        let face = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];

        for &idx in &[i0, i1, i2] {
            normals[idx][0] += face[0];
            normals[idx][1] += face[1];
            normals[idx][2] += face[2];
        }
    }

    for n in &mut normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        if len > 0.0 {
            n[0] /= len;
            n[1] /= len;
            n[2] /= len;
        }
    }

    normals
}
