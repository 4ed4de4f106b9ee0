//! Application shell: configuration, layer stack, and the load/update cycle

use std::mem;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::ResourceManager;
use crate::components::ComponentRegistry;
use crate::scene::Scene;

/// Application settings, loadable from a JSON file next to the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// When true, layers should load the saved scene instead of rebuilding it
    pub load_existing: bool,
    /// Where the scene graph is saved
    pub scene_path: PathBuf,
    /// Where the asset manifest is saved
    pub manifest_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            load_existing: false,
            scene_path: PathBuf::from("scene.json"),
            manifest_path: PathBuf::from("scene-manifest.json"),
        }
    }
}

impl AppConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading app config '{}'", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing app config '{}'", path.display()))?;
        Ok(config)
    }
}

/// A unit of application behaviour, invoked once after the app starts
pub trait AppLayer {
    fn name(&self) -> &str;

    /// Called once at startup. Layers typically build or load a scene here
    /// and hand it to the app with [`App::set_scene`].
    fn on_app_load(&mut self, app: &mut App) -> anyhow::Result<()>;
}

/// Owns the resource manager, component registry, scene, and layer stack
pub struct App {
    pub config: AppConfig,
    pub resources: ResourceManager,
    pub registry: ComponentRegistry,
    scene: Option<Scene>,
    layers: Vec<Box<dyn AppLayer>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            resources: ResourceManager::new(),
            registry: ComponentRegistry::with_defaults(),
            scene: None,
            layers: Vec::new(),
        }
    }

    pub fn push_layer(&mut self, layer: impl AppLayer + 'static) {
        self.layers.push(Box::new(layer));
    }

    /// Runs every layer's load hook in push order
    pub fn run_load(&mut self) -> anyhow::Result<()> {
        let mut layers = mem::take(&mut self.layers);
        for layer in &mut layers {
            log::info!("loading layer '{}'", layer.name());
            layer
                .on_app_load(self)
                .with_context(|| format!("loading layer '{}'", layer.name()))?;
        }
        self.layers = layers;
        Ok(())
    }

    /// Loads the manifest and scene named by the config
    pub fn load_scene(&mut self) -> anyhow::Result<()> {
        self.resources
            .load_manifest(&self.config.manifest_path)
            .with_context(|| {
                format!(
                    "loading manifest '{}'",
                    self.config.manifest_path.display()
                )
            })?;
        let scene = Scene::load(&self.config.scene_path, &self.registry)
            .with_context(|| format!("loading scene '{}'", self.config.scene_path.display()))?;
        self.scene = Some(scene);
        Ok(())
    }

    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = Some(scene);
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Advances the active scene by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.update(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SceneStub;

    impl AppLayer for SceneStub {
        fn name(&self) -> &str {
            "SceneStub"
        }

        fn on_app_load(&mut self, app: &mut App) -> anyhow::Result<()> {
            app.set_scene(Scene::new());
            Ok(())
        }
    }

    #[test]
    fn config_defaults_point_at_working_directory() {
        let config = AppConfig::default();
        assert!(!config.load_existing);
        assert_eq!(config.scene_path, PathBuf::from("scene.json"));
        assert_eq!(config.manifest_path, PathBuf::from("scene-manifest.json"));
    }

    #[test]
    fn config_accepts_partial_files() {
        let path = std::env::temp_dir().join("haar_partial_config.json");
        std::fs::write(&path, r#"{ "load_existing": true }"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert!(config.load_existing);
        assert_eq!(config.scene_path, PathBuf::from("scene.json"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn layers_run_and_can_install_a_scene() {
        let mut app = App::new();
        app.push_layer(SceneStub);
        app.run_load().unwrap();
        assert!(app.scene().is_some());
        app.update(0.016);
    }
}
