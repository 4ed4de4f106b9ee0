//! # Scene Graph
//!
//! A scene is a flat arena of [`GameObject`]s with parent/child links,
//! plus scene-wide state: lights, an optional skybox, an optional
//! color-grading LUT, and the main camera object. World transforms compose
//! hierarchically; components attach to objects and tick through
//! [`Scene::update`].
//!
//! Scenes serialize to JSON; components are written by kind and rebuilt
//! through a [`ComponentRegistry`].
//!
//! [`ComponentRegistry`]: crate::components::ComponentRegistry

pub mod game_object;
pub mod light;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use game_object::{GameObject, GameObjectId};
pub use light::Light;
pub use scene::{Scene, SceneStatistics, Skybox};
pub use transform::Transform;

use thiserror::Error;

/// Errors produced by scene mutation and persistence
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown component kind '{0}'; was it registered?")]
    UnknownComponent(String),

    #[error("invalid object id {0:?}")]
    InvalidObject(GameObjectId),

    #[error("parenting {child:?} under {parent:?} would create a cycle")]
    HierarchyCycle {
        child: GameObjectId,
        parent: GameObjectId,
    },
}
