//! # Resource Manager
//!
//! Centralized creation, storage, and persistence for all asset types.
//!
//! The manager hands out [`AssetId`]s and deduplicates file-backed assets:
//! requesting the same OBJ path, texture path, or shader stage map twice
//! returns the id created the first time. Generated meshes and materials are
//! always distinct assets.
//!
//! [`save_manifest`] persists every asset's rebuild recipe to a JSON manifest;
//! [`load_manifest`] restores a manager from one, re-loading OBJ geometry and
//! re-generating primitive geometry as it goes.
//!
//! [`save_manifest`]: ResourceManager::save_manifest
//! [`load_manifest`]: ResourceManager::load_manifest

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AssetError, AssetId, Material, MeshResource, MeshSource, ShaderProgram, Texture,
};

/// Per-kind asset counts, for logs and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceStats {
    pub shaders: usize,
    pub textures: usize,
    pub materials: usize,
    pub meshes: usize,
}

impl ResourceStats {
    pub fn total(&self) -> usize {
        self.shaders + self.textures + self.materials + self.meshes
    }
}

/// Deduplicating factory and cache for loaded assets
#[derive(Default)]
pub struct ResourceManager {
    next_id: u64,
    shaders: BTreeMap<AssetId, ShaderProgram>,
    textures: BTreeMap<AssetId, Texture>,
    materials: BTreeMap<AssetId, Material>,
    meshes: BTreeMap<AssetId, MeshResource>,
    /// Source-key → id index backing deduplication of file-backed assets
    by_source: HashMap<String, AssetId>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc_id(&mut self) -> AssetId {
        let id = AssetId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a shader program, returning the existing id when an
    /// identical stage map was registered before.
    pub fn create_shader(&mut self, shader: ShaderProgram) -> AssetId {
        let key = shader.source_key();
        if let Some(&id) = self.by_source.get(&key) {
            log::debug!("shader '{}' deduplicated to {}", shader.name, id);
            return id;
        }
        let id = self.alloc_id();
        log::debug!("created shader '{}' as {}", shader.name, id);
        self.by_source.insert(key, id);
        self.shaders.insert(id, shader);
        id
    }

    /// Registers a texture, deduplicated by kind and source path
    pub fn create_texture(&mut self, texture: Texture) -> AssetId {
        let key = texture.source_key();
        if let Some(&id) = self.by_source.get(&key) {
            return id;
        }
        let id = self.alloc_id();
        log::debug!("created texture '{}' as {}", texture.path.display(), id);
        self.by_source.insert(key, id);
        self.textures.insert(id, texture);
        id
    }

    /// Registers a material. Materials are authored data, never deduplicated.
    pub fn create_material(&mut self, material: Material) -> AssetId {
        let id = self.alloc_id();
        log::debug!("created material '{}' as {}", material.name, id);
        self.materials.insert(id, material);
        id
    }

    /// Registers a generated mesh resource
    pub fn create_mesh(&mut self, mesh: MeshResource) -> AssetId {
        let id = self.alloc_id();
        self.meshes.insert(id, mesh);
        id
    }

    /// Loads an OBJ file as a mesh resource, deduplicated by path
    pub fn create_mesh_from_obj(&mut self, path: impl AsRef<Path>) -> Result<AssetId, AssetError> {
        let path = path.as_ref();
        let key = format!("mesh:obj:{}", path.display());
        if let Some(&id) = self.by_source.get(&key) {
            log::debug!("mesh '{}' deduplicated to {}", path.display(), id);
            return Ok(id);
        }
        let mesh = MeshResource::from_obj(path)?;
        let id = self.alloc_id();
        log::debug!("created mesh '{}' as {}", path.display(), id);
        self.by_source.insert(key, id);
        self.meshes.insert(id, mesh);
        Ok(id)
    }

    // Typed lookup

    pub fn shader(&self, id: AssetId) -> Option<&ShaderProgram> {
        self.shaders.get(&id)
    }

    pub fn shader_mut(&mut self, id: AssetId) -> Option<&mut ShaderProgram> {
        self.shaders.get_mut(&id)
    }

    pub fn texture(&self, id: AssetId) -> Option<&Texture> {
        self.textures.get(&id)
    }

    pub fn texture_mut(&mut self, id: AssetId) -> Option<&mut Texture> {
        self.textures.get_mut(&id)
    }

    pub fn material(&self, id: AssetId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn material_mut(&mut self, id: AssetId) -> Option<&mut Material> {
        self.materials.get_mut(&id)
    }

    pub fn mesh(&self, id: AssetId) -> Option<&MeshResource> {
        self.meshes.get(&id)
    }

    pub fn mesh_mut(&mut self, id: AssetId) -> Option<&mut MeshResource> {
        self.meshes.get_mut(&id)
    }

    /// Finds a material by its authored name
    pub fn material_by_name(&self, name: &str) -> Option<(AssetId, &Material)> {
        self.materials
            .iter()
            .find(|(_, m)| m.name == name)
            .map(|(id, m)| (*id, m))
    }

    /// Lists all material names
    pub fn list_materials(&self) -> Vec<&String> {
        self.materials.values().map(|m| &m.name).collect()
    }

    pub fn stats(&self) -> ResourceStats {
        ResourceStats {
            shaders: self.shaders.len(),
            textures: self.textures.len(),
            materials: self.materials.len(),
            meshes: self.meshes.len(),
        }
    }

    /// Writes the asset manifest: every asset's id and rebuild recipe
    pub fn save_manifest(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let mut assets: Vec<ManifestEntry> = Vec::with_capacity(self.stats().total());

        for (&id, shader) in &self.shaders {
            assets.push(ManifestEntry {
                id,
                asset: ManifestAsset::Shader(shader.clone()),
            });
        }
        for (&id, texture) in &self.textures {
            assets.push(ManifestEntry {
                id,
                asset: ManifestAsset::Texture(texture.clone()),
            });
        }
        for (&id, material) in &self.materials {
            assets.push(ManifestEntry {
                id,
                asset: ManifestAsset::Material(material.clone()),
            });
        }
        for (&id, mesh) in &self.meshes {
            assets.push(ManifestEntry {
                id,
                asset: ManifestAsset::Mesh(mesh.source().clone()),
            });
        }
        assets.sort_by_key(|e| e.id);

        let file = ManifestFile { assets };
        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
        log::info!(
            "saved asset manifest '{}' ({} assets)",
            path.display(),
            file.assets.len()
        );
        Ok(())
    }

    /// Rebuilds a manager from a saved manifest, replacing current contents.
    /// OBJ-backed meshes are re-read from disk, generated meshes are rebuilt
    /// from their parameters, and id allocation resumes past the highest
    /// loaded id.
    pub fn load_manifest(&mut self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let path = path.as_ref();
        let file: ManifestFile = serde_json::from_str(&std::fs::read_to_string(path)?)?;

        *self = Self::new();

        for entry in file.assets {
            self.next_id = self.next_id.max(entry.id.0 + 1);
            match entry.asset {
                ManifestAsset::Shader(shader) => {
                    self.by_source.insert(shader.source_key(), entry.id);
                    self.shaders.insert(entry.id, shader);
                }
                ManifestAsset::Texture(texture) => {
                    self.by_source.insert(texture.source_key(), entry.id);
                    self.textures.insert(entry.id, texture);
                }
                ManifestAsset::Material(material) => {
                    self.materials.insert(entry.id, material);
                }
                ManifestAsset::Mesh(source) => {
                    if let MeshSource::Obj { path } = &source {
                        self.by_source
                            .insert(format!("mesh:obj:{}", path.display()), entry.id);
                    }
                    self.meshes.insert(entry.id, MeshResource::from_source(source)?);
                }
            }
        }

        log::info!(
            "loaded asset manifest '{}' ({} assets)",
            path.display(),
            self.stats().total()
        );
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct ManifestFile {
    assets: Vec<ManifestEntry>,
}

#[derive(Serialize, Deserialize)]
struct ManifestEntry {
    id: AssetId,
    asset: ManifestAsset,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ManifestAsset {
    Shader(ShaderProgram),
    Texture(Texture),
    Material(Material),
    Mesh(MeshSource),
}
