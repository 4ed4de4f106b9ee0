//! Material assets
//!
//! A material is a named bundle of a shader program plus the parameter values
//! bound to it: floats, vectors, and texture references. Parameter names
//! match the uniform names the shader declares (e.g. `u_Material.Diffuse`).
//!
//! Materials are stored centrally in the [`ResourceManager`] and objects
//! reference them by id, so parameter edits are shared by every object using
//! the material.
//!
//! [`ResourceManager`]: super::ResourceManager

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::AssetId;

/// A value bound to a named material parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MaterialValue {
    Float(f32),
    Int(i32),
    Bool(bool),
    Vec2([f32; 2]),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
    /// Reference to a texture asset
    Texture(AssetId),
}

impl From<f32> for MaterialValue {
    fn from(v: f32) -> Self {
        MaterialValue::Float(v)
    }
}

impl From<i32> for MaterialValue {
    fn from(v: i32) -> Self {
        MaterialValue::Int(v)
    }
}

impl From<bool> for MaterialValue {
    fn from(v: bool) -> Self {
        MaterialValue::Bool(v)
    }
}

impl From<[f32; 2]> for MaterialValue {
    fn from(v: [f32; 2]) -> Self {
        MaterialValue::Vec2(v)
    }
}

impl From<[f32; 3]> for MaterialValue {
    fn from(v: [f32; 3]) -> Self {
        MaterialValue::Vec3(v)
    }
}

impl From<[f32; 4]> for MaterialValue {
    fn from(v: [f32; 4]) -> Self {
        MaterialValue::Vec4(v)
    }
}

impl From<AssetId> for MaterialValue {
    fn from(v: AssetId) -> Self {
        MaterialValue::Texture(v)
    }
}

/// Material definition: shader reference plus named parameter values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    /// Shader program this material binds its values against
    pub shader: AssetId,
    /// Parameter values keyed by uniform name, kept sorted for stable output
    pub values: BTreeMap<String, MaterialValue>,
}

impl Material {
    /// Creates an empty material for the given shader program
    pub fn new(name: &str, shader: AssetId) -> Self {
        Self {
            name: name.to_string(),
            shader,
            values: BTreeMap::new(),
        }
    }

    /// Sets a named parameter, replacing any previous value
    pub fn set(&mut self, name: &str, value: impl Into<MaterialValue>) -> &mut Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    /// Gets a named parameter value
    pub fn get(&self, name: &str) -> Option<&MaterialValue> {
        self.values.get(name)
    }

    /// Builder pattern: set a parameter during construction
    pub fn with_value(mut self, name: &str, value: impl Into<MaterialValue>) -> Self {
        self.set(name, value);
        self
    }

    /// All texture assets this material references
    pub fn texture_refs(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.values.values().filter_map(|v| match v {
            MaterialValue::Texture(id) => Some(*id),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get_round_trip() {
        let mut mat = Material::new("Box", AssetId(1));
        mat.set("u_Material.Shininess", 0.1f32)
            .set("u_Material.Diffuse", AssetId(7))
            .set("u_Material.Steps", 8i32);

        assert_eq!(mat.get("u_Material.Shininess"), Some(&MaterialValue::Float(0.1)));
        assert_eq!(mat.get("u_Material.Diffuse"), Some(&MaterialValue::Texture(AssetId(7))));
        assert_eq!(mat.get("u_Material.Steps"), Some(&MaterialValue::Int(8)));
        assert_eq!(mat.get("missing"), None);
    }

    #[test]
    fn texture_refs_lists_only_textures() {
        let mat = Material::new("Foliage", AssetId(2))
            .with_value("u_WindDirection", [1.0f32, 1.0, 0.0])
            .with_value("u_Material.Diffuse", AssetId(5))
            .with_value("s_ToonTerm", AssetId(6));

        let mut refs: Vec<AssetId> = mat.texture_refs().collect();
        refs.sort();
        assert_eq!(refs, vec![AssetId(5), AssetId(6)]);
    }

    #[test]
    fn serializes_with_tagged_values() {
        let mat = Material::new("Toon", AssetId(3)).with_value("u_Material.Steps", 8i32);
        let json = serde_json::to_string(&mat).unwrap();
        assert!(json.contains("\"type\":\"int\""));

        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mat);
    }
}
