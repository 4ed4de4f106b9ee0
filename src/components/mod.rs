//! # Component System
//!
//! Components are typed units of behaviour and data attached to game
//! objects. The [`Component`] trait covers:
//!
//! - identity (`kind`) and `Any`-based downcasting for typed lookup,
//! - serde persistence (`to_value`, paired with a [`ComponentRegistry`]
//!   deserializer for the reverse direction),
//! - lifecycle hooks: `update` each frame, `on_trigger_enter` /
//!   `on_trigger_exit` when trigger volumes change occupancy.
//!
//! During hook dispatch the component is temporarily detached from its
//! object, so hooks receive `&mut GameObject` and can reach sibling
//! components (a jump behaviour pushing on its rigid body, a material swap
//! editing its render component).

pub mod behaviours;
pub mod camera;
pub mod render;

pub use behaviours::{
    JumpBehaviour, MaterialSwapBehaviour, RotatingBehaviour, SimpleCameraControl,
    TriggerVolumeEnterBehaviour,
};
pub use camera::Camera;
pub use render::RenderComponent;

use std::any::Any;
use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::scene::{GameObject, GameObjectId, SceneError};

/// A typed, serializable unit of behaviour attached to a game object
pub trait Component: Any {
    /// Stable kind string used in scene files and registry lookup
    fn kind(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Serializes the component's data for the scene file
    fn to_value(&self) -> Result<serde_json::Value, SceneError>;

    /// Called once per frame. The component is detached from `object`
    /// while this runs, so sibling components are reachable through it.
    fn update(&mut self, _object: &mut GameObject, _dt: f32) {}

    /// Called when `object` starts overlapping a trigger volume, or when a
    /// body enters a volume on `object`
    fn on_trigger_enter(&mut self, _object: &mut GameObject, _other: GameObjectId) {}

    /// Counterpart of [`on_trigger_enter`](Component::on_trigger_enter)
    fn on_trigger_exit(&mut self, _object: &mut GameObject, _other: GameObjectId) {}
}

impl std::fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.kind())
    }
}

type LoadFn = fn(serde_json::Value) -> Result<Box<dyn Component>, SceneError>;

fn load_component<T: Component + DeserializeOwned>(
    value: serde_json::Value,
) -> Result<Box<dyn Component>, SceneError> {
    Ok(Box::new(serde_json::from_value::<T>(value)?))
}

/// Maps component kind strings to deserializers so scene files can rebuild
/// `Box<dyn Component>` values. Applications register their own component
/// types on top of [`with_defaults`](ComponentRegistry::with_defaults).
#[derive(Default)]
pub struct ComponentRegistry {
    loaders: HashMap<String, LoadFn>,
}

impl ComponentRegistry {
    /// An empty registry with no kinds registered
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with every built-in component registered
    pub fn with_defaults() -> Self {
        use crate::physics::{RigidBody, TriggerVolume};

        let mut registry = Self::new();
        registry.register::<Camera>(Camera::KIND);
        registry.register::<RenderComponent>(RenderComponent::KIND);
        registry.register::<RotatingBehaviour>(RotatingBehaviour::KIND);
        registry.register::<JumpBehaviour>(JumpBehaviour::KIND);
        registry.register::<MaterialSwapBehaviour>(MaterialSwapBehaviour::KIND);
        registry.register::<TriggerVolumeEnterBehaviour>(TriggerVolumeEnterBehaviour::KIND);
        registry.register::<SimpleCameraControl>(SimpleCameraControl::KIND);
        registry.register::<RigidBody>(RigidBody::KIND);
        registry.register::<TriggerVolume>(TriggerVolume::KIND);
        registry
    }

    /// Registers a component type under a kind string
    pub fn register<T: Component + DeserializeOwned>(&mut self, kind: &str) {
        self.loaders.insert(kind.to_string(), load_component::<T>);
    }

    /// Rebuilds a component from its kind and serialized data
    pub fn load(
        &self,
        kind: &str,
        value: serde_json::Value,
    ) -> Result<Box<dyn Component>, SceneError> {
        let loader = self
            .loaders
            .get(kind)
            .ok_or_else(|| SceneError::UnknownComponent(kind.to_string()))?;
        loader(value)
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.loaders.contains_key(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec3;

    #[test]
    fn defaults_cover_builtin_kinds() {
        let registry = ComponentRegistry::with_defaults();
        for kind in [
            "Camera",
            "RenderComponent",
            "RotatingBehaviour",
            "JumpBehaviour",
            "MaterialSwapBehaviour",
            "TriggerVolumeEnterBehaviour",
            "SimpleCameraControl",
            "RigidBody",
            "TriggerVolume",
        ] {
            assert!(registry.is_registered(kind), "missing kind '{}'", kind);
        }
    }

    #[test]
    fn load_round_trips_a_component() {
        let registry = ComponentRegistry::with_defaults();
        let original = RotatingBehaviour::new(vec3(90.0, 0.0, 45.0));
        let value = original.to_value().unwrap();

        let loaded = registry.load(original.kind(), value).unwrap();
        let loaded = loaded
            .as_any()
            .downcast_ref::<RotatingBehaviour>()
            .unwrap();
        assert_eq!(loaded.rotation_speed, original.rotation_speed);
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let registry = ComponentRegistry::with_defaults();
        let result = registry.load("NotAComponent", serde_json::Value::Null);
        assert!(matches!(result, Err(SceneError::UnknownComponent(_))));
    }
}
