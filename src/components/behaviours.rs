//! Gameplay behaviour components for the demo scene
//!
//! These are intentionally small: each one stores its authored data, and the
//! interesting part is how it reaches siblings during hooks (the component
//! is detached from its object while a hook runs, so `object` exposes the
//! rest).

use std::any::Any;

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::assets::AssetId;
use crate::physics::RigidBody;
use crate::scene::{GameObject, GameObjectId, SceneError};

use super::{Component, RenderComponent};

/// Spins the object at a fixed Euler rate (degrees per second)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotatingBehaviour {
    pub rotation_speed: Vector3<f32>,
}

impl RotatingBehaviour {
    pub const KIND: &'static str = "RotatingBehaviour";

    pub fn new(rotation_speed: Vector3<f32>) -> Self {
        Self { rotation_speed }
    }
}

impl Component for RotatingBehaviour {
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
        object.transform.rotation += self.rotation_speed * dt;
    }
}

/// Applies a vertical impulse to the sibling rigid body when armed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpBehaviour {
    /// Velocity change applied along +Z on jump
    pub impulse: f32,
    #[serde(skip)]
    armed: bool,
}

impl Default for JumpBehaviour {
    fn default() -> Self {
        Self {
            impulse: 10.0,
            armed: false,
        }
    }
}

impl JumpBehaviour {
    pub const KIND: &'static str = "JumpBehaviour";

    pub fn new(impulse: f32) -> Self {
        Self {
            impulse,
            armed: false,
        }
    }

    /// Arms a jump; the impulse lands on the next update
    pub fn jump(&mut self) {
        self.armed = true;
    }
}

impl Component for JumpBehaviour {
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

    fn update(&mut self, object: &mut GameObject, _dt: f32) {
        if !self.armed {
            return;
        }
        self.armed = false;
        match object.get_mut::<RigidBody>() {
            Some(body) => body.linear_velocity.z += self.impulse,
            None => log::warn!("JumpBehaviour on '{}' has no RigidBody sibling", object.name),
        }
    }
}

/// Swaps the sibling render component's material while inside a trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSwapBehaviour {
    /// Material applied when entering a trigger volume
    pub enter_material: AssetId,
    /// Material restored when leaving
    pub exit_material: AssetId,
}

impl MaterialSwapBehaviour {
    pub const KIND: &'static str = "MaterialSwapBehaviour";

    pub fn new(enter_material: AssetId, exit_material: AssetId) -> Self {
        Self {
            enter_material,
            exit_material,
        }
    }
}

impl Component for MaterialSwapBehaviour {
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

    fn on_trigger_enter(&mut self, object: &mut GameObject, _other: GameObjectId) {
        if let Some(renderer) = object.get_mut::<RenderComponent>() {
            renderer.material = self.enter_material;
        }
    }

    fn on_trigger_exit(&mut self, object: &mut GameObject, _other: GameObjectId) {
        if let Some(renderer) = object.get_mut::<RenderComponent>() {
            renderer.material = self.exit_material;
        }
    }
}

/// Logs and counts bodies entering the trigger volume this sits on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerVolumeEnterBehaviour {
    #[serde(skip)]
    pub enter_count: usize,
    #[serde(skip)]
    pub exit_count: usize,
}

impl TriggerVolumeEnterBehaviour {
    pub const KIND: &'static str = "TriggerVolumeEnterBehaviour";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Component for TriggerVolumeEnterBehaviour {
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

    fn on_trigger_enter(&mut self, object: &mut GameObject, other: GameObjectId) {
        self.enter_count += 1;
        log::info!("{:?} entered trigger '{}'", other, object.name);
    }

    fn on_trigger_exit(&mut self, object: &mut GameObject, other: GameObjectId) {
        self.exit_count += 1;
        log::info!("{:?} left trigger '{}'", other, object.name);
    }
}

/// Free-fly camera settings. Input plumbing lives in the application; this
/// component just carries the authored tuning values through the scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimpleCameraControl {
    /// Movement speed in units per second
    pub move_speed: f32,
    /// Mouse look sensitivity in degrees per pixel
    pub look_sensitivity: f32,
}

impl Default for SimpleCameraControl {
    fn default() -> Self {
        Self {
            move_speed: 4.0,
            look_sensitivity: 0.1,
        }
    }
}

impl SimpleCameraControl {
    pub const KIND: &'static str = "SimpleCameraControl";
}

impl Component for SimpleCameraControl {
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
    fn rotating_behaviour_advances_rotation() {
        let mut obj = object();
        let mut behaviour = RotatingBehaviour::new(vec3(90.0, 0.0, -45.0));

        behaviour.update(&mut obj, 0.5);

        assert_eq!(obj.transform.rotation, vec3(45.0, 0.0, -22.5));
    }

    #[test]
    fn jump_pushes_the_sibling_rigid_body() {
        use crate::physics::{BodyType, RigidBody};

        let mut obj = object();
        obj.add(RigidBody::new(BodyType::Dynamic));

        let mut jump = JumpBehaviour::new(10.0);
        jump.update(&mut obj, 0.016);
        assert_eq!(obj.get::<RigidBody>().unwrap().linear_velocity.z, 0.0);

        jump.jump();
        jump.update(&mut obj, 0.016);
        assert_eq!(obj.get::<RigidBody>().unwrap().linear_velocity.z, 10.0);

        // Impulse fires once per arm
        jump.update(&mut obj, 0.016);
        assert_eq!(obj.get::<RigidBody>().unwrap().linear_velocity.z, 10.0);
    }

    #[test]
    fn material_swap_edits_sibling_renderer() {
        use crate::assets::AssetId;

        let mut obj = object();
        obj.add(RenderComponent::new(AssetId(1), AssetId(2)));

        let mut swap = MaterialSwapBehaviour::new(AssetId(9), AssetId(2));
        swap.on_trigger_enter(&mut obj, GameObjectId(5));
        assert_eq!(obj.get::<RenderComponent>().unwrap().material, AssetId(9));

        swap.on_trigger_exit(&mut obj, GameObjectId(5));
        assert_eq!(obj.get::<RenderComponent>().unwrap().material, AssetId(2));
    }
}
