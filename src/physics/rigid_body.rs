//! Rigid body and trigger volume components

use std::any::Any;
use std::collections::HashSet;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::Component;
use crate::scene::{GameObject, GameObjectId, SceneError};

use super::{Aabb, Collider};

/// Gravitational acceleration along -Z, metres per second squared
pub const GRAVITY: f32 = -9.81;

/// How a body responds to simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// Never moves; the default for level geometry
    #[default]
    Static,
    /// Integrates gravity and velocity
    Dynamic,
    /// Moves by velocity only, ignoring gravity
    Kinematic,
}

/// Physical body: motion state plus collision shapes.
///
/// Dynamic bodies integrate gravity and linear velocity into the object's
/// transform each update. Contact resolution is left to a physics backend;
/// the shapes exist for authoring, serialization, and trigger tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    pub body_type: BodyType,
    pub mass: f32,
    pub linear_velocity: Vector3<f32>,
    pub colliders: Vec<Collider>,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(BodyType::Static)
    }
}

impl RigidBody {
    pub const KIND: &'static str = "RigidBody";

    pub fn new(body_type: BodyType) -> Self {
        Self {
            body_type,
            mass: 1.0,
            linear_velocity: Vector3::new(0.0, 0.0, 0.0),
            colliders: Vec::new(),
        }
    }

    /// Attaches a collider and returns it for chained placement:
    /// `body.add_collider(Collider::cube(...)).set_position(...)`
    pub fn add_collider(&mut self, collider: Collider) -> &mut Collider {
        self.colliders.push(collider);
        self.colliders.last_mut().unwrap()
    }

    /// Combined local bounds of all colliders, or a point at the origin
    /// when the body has none
    pub fn local_aabb(&self) -> Aabb {
        self.colliders
            .iter()
            .map(|c| c.local_aabb())
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| Aabb::point(Vector3::new(0.0, 0.0, 0.0)))
    }
}

impl Component for RigidBody {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn to_value(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }

    fn update(&mut self, object: &mut GameObject, dt: f32) {
        match self.body_type {
            BodyType::Static => {}
            BodyType::Dynamic => {
                self.linear_velocity.z += GRAVITY * dt;
                object.transform.position += self.linear_velocity * dt;
            }
            BodyType::Kinematic => {
                object.transform.position += self.linear_velocity * dt;
            }
        }
    }
}

/// Overlap sensor: fires enter/exit hooks instead of producing contacts.
///
/// Occupancy is tracked at runtime and deliberately not serialized; a
/// freshly loaded scene starts with empty volumes and re-fires enter events
/// on the first update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerVolume {
    pub colliders: Vec<Collider>,
    #[serde(skip)]
    pub(crate) inside: HashSet<GameObjectId>,
}

impl TriggerVolume {
    pub const KIND: &'static str = "TriggerVolume";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_collider(&mut self, collider: Collider) -> &mut Collider {
        self.colliders.push(collider);
        self.colliders.last_mut().unwrap()
    }

    /// Combined local bounds of the volume's colliders
    pub fn local_aabb(&self) -> Option<Aabb> {
        self.colliders
            .iter()
            .map(|c| c.local_aabb())
            .reduce(|a, b| a.union(&b))
    }

    /// Objects currently overlapping the volume
    pub fn occupants(&self) -> impl Iterator<Item = GameObjectId> + '_ {
        self.inside.iter().copied()
    }
}

impl Component for TriggerVolume {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn to_value(&self) -> Result<serde_json::Value, SceneError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::GameObjectId;
    use cgmath::vec3;

    fn object() -> GameObject {
        GameObject::new(GameObjectId(0), "Test".to_string())
    }

    #[test]
    fn static_bodies_do_not_move() {
        let mut obj = object();
        let mut body = RigidBody::default();
        body.linear_velocity = vec3(1.0, 0.0, 0.0);

        body.update(&mut obj, 1.0);

        assert_eq!(obj.transform.position, vec3(0.0, 0.0, 0.0));
    }

    #[test]
    fn dynamic_bodies_fall() {
        let mut obj = object();
        let mut body = RigidBody::new(BodyType::Dynamic);

        body.update(&mut obj, 0.5);

        assert!((body.linear_velocity.z - GRAVITY * 0.5).abs() < 1e-5);
        assert!(obj.transform.position.z < 0.0);
    }

    #[test]
    fn kinematic_bodies_ignore_gravity() {
        let mut obj = object();
        let mut body = RigidBody::new(BodyType::Kinematic);
        body.linear_velocity = vec3(2.0, 0.0, 0.0);

        body.update(&mut obj, 0.5);

        assert_eq!(obj.transform.position, vec3(1.0, 0.0, 0.0));
        assert_eq!(body.linear_velocity, vec3(2.0, 0.0, 0.0));
    }

    #[test]
    fn body_aabb_unions_colliders() {
        let mut body = RigidBody::default();
        body.add_collider(Collider::cube(vec3(1.0, 1.0, 1.0)));
        body.add_collider(Collider::sphere(0.5))
            .set_position(vec3(5.0, 0.0, 0.0));

        let aabb = body.local_aabb();
        assert_eq!(aabb.min, vec3(-1.0, -1.0, -1.0));
        assert_eq!(aabb.max, vec3(5.5, 1.0, 1.0));
    }

    #[test]
    fn trigger_occupancy_is_not_serialized() {
        let mut volume = TriggerVolume::new();
        volume.add_collider(Collider::cylinder(vec3(3.0, 3.0, 1.0)));
        volume.inside.insert(GameObjectId(3));

        let json = serde_json::to_string(&volume).unwrap();
        let back: TriggerVolume = serde_json::from_str(&json).unwrap();
        assert_eq!(back.colliders, volume.colliders);
        assert_eq!(back.occupants().count(), 0);
    }
}
