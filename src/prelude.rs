//! # Haar Prelude
//!
//! Brings the commonly used types into scope in one import:
//!
//! ```rust
//! use haar::prelude::*;
//! ```

pub use crate::app::{App, AppConfig, AppLayer};
pub use crate::assets::{
    AssetId, Material, MaterialValue, MeshResource, MeshSource, PrimitiveParam, ResourceManager,
    ShaderProgram, ShaderStage, Texture, TextureKind,
};
pub use crate::components::{
    Camera, Component, ComponentRegistry, JumpBehaviour, MaterialSwapBehaviour, RenderComponent,
    RotatingBehaviour, SimpleCameraControl, TriggerVolumeEnterBehaviour,
};
pub use crate::layers::DefaultSceneLayer;
pub use crate::physics::{Aabb, BodyType, Collider, ColliderShape, RigidBody, TriggerVolume};
pub use crate::scene::{GameObject, GameObjectId, Light, Scene, Skybox, Transform};

pub use cgmath::{vec3, Deg, InnerSpace, Vector3};
