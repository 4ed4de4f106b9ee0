//! Render component: which mesh an object draws with which material

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::assets::AssetId;
use crate::scene::SceneError;

use super::Component;

/// Attaches drawable geometry to a game object by referencing a mesh and a
/// material asset. The renderer resolves both through the resource manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderComponent {
    pub mesh: AssetId,
    pub material: AssetId,
}

impl RenderComponent {
    pub const KIND: &'static str = "RenderComponent";

    pub fn new(mesh: AssetId, material: AssetId) -> Self {
        Self { mesh, material }
    }

    pub fn set_mesh(&mut self, mesh: AssetId) -> &mut Self {
        self.mesh = mesh;
        self
    }

    pub fn set_material(&mut self, material: AssetId) -> &mut Self {
        self.material = material;
        self
    }
}

impl Component for RenderComponent {
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
