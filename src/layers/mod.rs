//! Application layers
//!
//! Layers package startup behaviour behind the [`AppLayer`](crate::app::AppLayer)
//! trait. The stock [`DefaultSceneLayer`] builds the sample scene.

pub mod default_scene;

pub use default_scene::DefaultSceneLayer;
