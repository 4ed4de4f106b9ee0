//! Collider shapes and their placement relative to an object

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::assets::{AssetId, MeshResource};
use crate::scene::Transform;

use super::Aabb;

/// Half extents used for the unbounded directions of a plane collider
const PLANE_EXTENT: f32 = 1.0e6;
/// Half thickness of a plane collider along its normal's dominant axis
const PLANE_THICKNESS: f32 = 1.0e-3;

/// Collision shape primitive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ColliderShape {
    Box { half_extents: [f32; 3] },
    Sphere { radius: f32 },
    /// Infinite plane through the origin with the given normal
    Plane { normal: [f32; 3] },
    Cylinder { half_extents: [f32; 3] },
    /// Convex hull of a mesh asset's vertices
    ConvexMesh { mesh: AssetId },
}

impl ColliderShape {
    /// Conservative local-space bounds of the bare shape. Convex meshes
    /// fall back to a unit box here; prefer [`Collider::from_mesh`], which
    /// bakes the real bounds at creation time.
    fn local_aabb(&self) -> Aabb {
        match *self {
            ColliderShape::Box { half_extents } | ColliderShape::Cylinder { half_extents } => {
                Aabb::from_half_extents(half_extents.into())
            }
            ColliderShape::Sphere { radius } => {
                Aabb::from_half_extents(Vector3::new(radius, radius, radius))
            }
            ColliderShape::Plane { normal } => {
                let mut half = Vector3::new(PLANE_EXTENT, PLANE_EXTENT, PLANE_EXTENT);
                // Thin along the dominant axis of the normal
                let dominant = if normal[0].abs() >= normal[1].abs()
                    && normal[0].abs() >= normal[2].abs()
                {
                    0
                } else if normal[1].abs() >= normal[2].abs() {
                    1
                } else {
                    2
                };
                half[dominant] = PLANE_THICKNESS;
                Aabb::from_half_extents(half)
            }
            ColliderShape::ConvexMesh { .. } => {
                Aabb::from_half_extents(Vector3::new(1.0, 1.0, 1.0))
            }
        }
    }
}

/// A shape placed relative to the owning object's origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub shape: ColliderShape,
    /// Offset from the object's origin (position, rotation, scale)
    pub offset: Transform,
    /// Baked local bounds for shapes whose extent is not implied by their
    /// parameters (convex meshes)
    pub bounds: Option<Aabb>,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Transform::default(),
            bounds: None,
        }
    }

    /// A box collider with the given half extents
    pub fn cube(half_extents: Vector3<f32>) -> Self {
        Self::new(ColliderShape::Box {
            half_extents: half_extents.into(),
        })
    }

    pub fn sphere(radius: f32) -> Self {
        Self::new(ColliderShape::Sphere { radius })
    }

    pub fn plane(normal: Vector3<f32>) -> Self {
        Self::new(ColliderShape::Plane {
            normal: normal.into(),
        })
    }

    pub fn cylinder(half_extents: Vector3<f32>) -> Self {
        Self::new(ColliderShape::Cylinder {
            half_extents: half_extents.into(),
        })
    }

    /// A convex mesh collider with bounds baked from the mesh geometry
    pub fn from_mesh(mesh_id: AssetId, mesh: &MeshResource) -> Self {
        let bounds = mesh
            .bounds()
            .map(|(min, max)| Aabb::new(min.into(), max.into()));
        Self {
            shape: ColliderShape::ConvexMesh { mesh: mesh_id },
            offset: Transform::default(),
            bounds,
        }
    }

    /// Sets the offset position, chainable after `add_collider`
    pub fn set_position(&mut self, position: Vector3<f32>) -> &mut Self {
        self.offset.position = position;
        self
    }

    /// Sets the offset rotation in Euler degrees
    pub fn set_rotation(&mut self, rotation: Vector3<f32>) -> &mut Self {
        self.offset.rotation = rotation;
        self
    }

    pub fn set_scale(&mut self, scale: Vector3<f32>) -> &mut Self {
        self.offset.scale = scale;
        self
    }

    /// Bounds in the owning object's local space, offset applied
    pub fn local_aabb(&self) -> Aabb {
        let shape_bounds = self.bounds.unwrap_or_else(|| self.shape.local_aabb());
        shape_bounds.transformed(&self.offset.local_matrix())
    }
}
