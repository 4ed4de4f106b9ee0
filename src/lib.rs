// src/lib.rs
//! Haar scene engine
//!
//! A component-based scene graph with a deduplicating resource manager and
//! JSON persistence for both the asset manifest and the scene itself.

pub mod app;
pub mod assets;
pub mod components;
pub mod geometry;
pub mod layers;
pub mod physics;
pub mod prelude;
pub mod scene;

// Re-export main types for convenience
pub use app::{App, AppConfig, AppLayer};

/// Creates a default application with the stock sample scene layer attached
pub fn default() -> App {
    let mut app = App::new();
    app.push_layer(layers::DefaultSceneLayer::default());
    app
}
