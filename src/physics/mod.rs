//! # Physics Data
//!
//! Collider shapes, rigid-body state, and trigger volumes as *data*: enough
//! for trigger-overlap tests, authoring, and serialization. There is no
//! constraint solver here and no collision response; a physics backend
//! consumes these components the way a renderer consumes render components.

pub mod collider;
pub mod rigid_body;

pub use collider::{Collider, ColliderShape};
pub use rigid_body::{BodyType, RigidBody, TriggerVolume};

use cgmath::{vec4, Matrix4, Vector3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

impl Aabb {
    pub fn new(min: Vector3<f32>, max: Vector3<f32>) -> Self {
        Self { min, max }
    }

    /// A box centered at the origin extending `half_extents` each way
    pub fn from_half_extents(half_extents: Vector3<f32>) -> Self {
        Self {
            min: -half_extents,
            max: half_extents,
        }
    }

    /// A degenerate box containing a single point
    pub fn point(p: Vector3<f32>) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing both inputs
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: Vector3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Vector3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// Overlap test, inclusive of touching faces
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn contains_point(&self, p: Vector3<f32>) -> bool {
        self.intersects(&Aabb::point(p))
    }

    /// Bounds of this box after an affine transform, computed by
    /// transforming all eight corners
    pub fn transformed(&self, matrix: &Matrix4<f32>) -> Aabb {
        let mut result: Option<Aabb> = None;
        for &x in &[self.min.x, self.max.x] {
            for &y in &[self.min.y, self.max.y] {
                for &z in &[self.min.z, self.max.z] {
                    let corner = (matrix * vec4(x, y, z, 1.0)).truncate();
                    let point = Aabb::point(corner);
                    result = Some(match result {
                        Some(bounds) => bounds.union(&point),
                        None => point,
                    });
                }
            }
        }
        // The corner loop always runs, so the option is always filled
        result.unwrap()
    }
}
