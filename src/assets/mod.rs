//! # Asset System
//!
//! Named asset types (shader programs, textures, materials, mesh resources)
//! and the [`ResourceManager`] that creates, deduplicates, and persists them.
//!
//! Every asset is identified by an [`AssetId`] handed out by the manager.
//! Scenes and components reference assets only by id, so a saved scene plus
//! the asset manifest is enough to rebuild everything on reload.

pub mod manager;
pub mod material;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use manager::ResourceManager;
pub use material::{Material, MaterialValue};
pub use mesh::{MeshResource, MeshSource, PrimitiveParam};
pub use shader::{ShaderProgram, ShaderStage};
pub use texture::{MagFilter, MinFilter, Texture, TextureKind, WrapMode};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to an asset owned by a [`ResourceManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "asset#{}", self.0)
    }
}

/// Errors produced by asset creation and manifest persistence
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to load OBJ file '{path}': {source}")]
    ObjLoad {
        path: PathBuf,
        source: tobj::LoadError,
    },

    #[error("unknown {0}")]
    UnknownAsset(AssetId),

    #[error("mesh resource has no geometry; call generate() first")]
    EmptyMesh,
}
