//! Game objects: named scene-graph nodes with typed components
//!
//! A game object owns a local [`Transform`], links to its parent and
//! children (by id, resolved through the owning [`Scene`]), and a list of
//! components. Attachment and lookup are typed: `object.get::<RigidBody>()`
//! finds the first component of that concrete type.
//!
//! [`Scene`]: super::Scene

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::Component;

use super::Transform;

/// Index-based handle to a game object within its scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameObjectId(pub u32);

/// A node in the scene graph
pub struct GameObject {
    pub id: GameObjectId,
    pub name: String,
    pub transform: Transform,
    pub parent: Option<GameObjectId>,
    pub children: Vec<GameObjectId>,
    pub(crate) components: Vec<Box<dyn Component>>,
}

impl GameObject {
    pub(crate) fn new(id: GameObjectId, name: String) -> Self {
        Self {
            id,
            name,
            transform: Transform::default(),
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Sets the local position
    pub fn set_position(&mut self, position: Vector3<f32>) -> &mut Self {
        self.transform.position = position;
        self
    }

    /// Sets the local Euler rotation in degrees
    pub fn set_rotation(&mut self, rotation: Vector3<f32>) -> &mut Self {
        self.transform.rotation = rotation;
        self
    }

    /// Sets the local scale
    pub fn set_scale(&mut self, scale: Vector3<f32>) -> &mut Self {
        self.transform.scale = scale;
        self
    }

    /// Rotates the object to face a world-space target (see
    /// [`Transform::look_at`]; only correct for unparented objects, since it
    /// works in local space)
    pub fn look_at(&mut self, target: Vector3<f32>) -> &mut Self {
        self.transform.look_at(target);
        self
    }

    /// Attaches a component and returns a typed reference to it
    pub fn add<T: Component>(&mut self, component: T) -> &mut T {
        self.components.push(Box::new(component));
        self.components
            .last_mut()
            .unwrap()
            .as_any_mut()
            .downcast_mut::<T>()
            .unwrap()
    }

    /// First component of the given type, if attached
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .iter()
            .find_map(|c| c.as_any().downcast_ref::<T>())
    }

    /// Mutable access to the first component of the given type
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .iter_mut()
            .find_map(|c| c.as_any_mut().downcast_mut::<T>())
    }

    /// Whether a component of the given type is attached
    pub fn has<T: Component>(&self) -> bool {
        self.get::<T>().is_some()
    }

    /// Detaches and returns the first component of the given type
    pub fn take<T: Component>(&mut self) -> Option<Box<T>> {
        let index = self
            .components
            .iter()
            .position(|c| c.as_any().is::<T>())?;
        self.components
            .remove(index)
            .into_any()
            .downcast::<T>()
            .ok()
    }

    /// Iterates the attached components in attachment order
    pub fn components(&self) -> impl Iterator<Item = &dyn Component> {
        self.components.iter().map(|c| c.as_ref())
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
