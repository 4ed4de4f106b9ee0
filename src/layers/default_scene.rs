//! The default sample scene
//!
//! Builds a small showcase world on first launch: a tiled ground plane, a
//! rotating centerpiece loaded from OBJ flanked by pillars and flames, a
//! trigger volume, and a free camera. The asset manifest and scene graph are
//! written to disk, and subsequent launches can reload them instead of
//! rebuilding when the app config asks for it.

use std::path::PathBuf;

use anyhow::Context;
use cgmath::vec3;

use crate::app::{App, AppLayer};
use crate::assets::{
    Material, MeshResource, MinFilter, PrimitiveParam, ResourceManager, ShaderProgram,
    ShaderStage, Texture, TextureKind, WrapMode,
};
use crate::components::{
    JumpBehaviour, MaterialSwapBehaviour, RenderComponent, RotatingBehaviour,
    SimpleCameraControl, TriggerVolumeEnterBehaviour,
};
use crate::physics::{BodyType, Collider, RigidBody, TriggerVolume};
use crate::scene::{Light, Scene, Skybox};

/// Builds (or reloads) the sample scene at startup
pub struct DefaultSceneLayer {
    /// OBJ model used for the centerpiece object
    pub model_path: PathBuf,
}

impl Default for DefaultSceneLayer {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/models/totem.obj"),
        }
    }
}

impl AppLayer for DefaultSceneLayer {
    fn name(&self) -> &str {
        "DefaultSceneLayer"
    }

    fn on_app_load(&mut self, app: &mut App) -> anyhow::Result<()> {
        let scene_exists = app.config.scene_path.exists();
        if app.config.load_existing && scene_exists {
            log::info!(
                "reloading saved scene from '{}'",
                app.config.scene_path.display()
            );
            return app.load_scene();
        }
        if app.config.load_existing {
            log::warn!(
                "no saved scene at '{}', building the default scene instead",
                app.config.scene_path.display()
            );
        }

        let scene = self
            .build_scene(&mut app.resources)
            .context("building the default scene")?;

        app.resources
            .save_manifest(&app.config.manifest_path)
            .context("saving the asset manifest")?;
        scene
            .save(&app.config.scene_path)
            .context("saving the scene graph")?;
        app.set_scene(scene);
        Ok(())
    }
}

impl DefaultSceneLayer {
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            model_path: model_path.into(),
        }
    }

    fn build_scene(&self, resources: &mut ResourceManager) -> anyhow::Result<Scene> {
        // Shaders. The basic one covers most materials; the rest drive the
        // specialised surfaces.
        let reflective_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/basic.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/frag_environment_reflective.glsl",
                ),
            ])
            .with_name("Reflective"),
        );
        let basic_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/basic.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/frag_blinn_phong_textured.glsl",
                ),
            ])
            .with_name("Blinn-phong"),
        );
        let spec_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/basic.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/textured_specular.glsl",
                ),
            ])
            .with_name("Textured-Specular"),
        );
        let foliage_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/foliage.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/screendoor_transparency.glsl",
                ),
            ])
            .with_name("Foliage"),
        );
        let toon_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/basic.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/toon_shading.glsl",
                ),
            ])
            .with_name("Toon Shader"),
        );
        let displacement_shader = resources.create_shader(
            ShaderProgram::new([
                (
                    ShaderStage::Vertex,
                    "shaders/vertex_shaders/displacement_mapping.glsl",
                ),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/frag_tangentspace_normal_maps.glsl",
                ),
            ])
            .with_name("Displacement Mapping"),
        );
        let tangent_space_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/basic.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/frag_tangentspace_normal_maps.glsl",
                ),
            ])
            .with_name("Tangent Space Mapping"),
        );
        let multitexture_shader = resources.create_shader(
            ShaderProgram::new([
                (
                    ShaderStage::Vertex,
                    "shaders/vertex_shaders/vert_multitextured.glsl",
                ),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/frag_multitextured.glsl",
                ),
            ])
            .with_name("Multitexturing"),
        );
        let skybox_shader = resources.create_shader(
            ShaderProgram::new([
                (ShaderStage::Vertex, "shaders/vertex_shaders/skybox_vert.glsl"),
                (
                    ShaderStage::Fragment,
                    "shaders/fragment_shaders/skybox_frag.glsl",
                ),
            ])
            .with_name("Skybox"),
        );

        // Textures
        let box_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/box-diffuse.png"));
        let box_specular =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/box-specular.png"));
        let leaf_texture = resources.create_texture(
            Texture::new(TextureKind::D2, "textures/leaves.png")
                .with_min_filter(MinFilter::Nearest),
        );
        let totem_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/totem-diffuse.png"));
        let pillar_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/pillar-diffuse.png"));
        let fire_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/fire-diffuse.png"));
        let bricks_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/bricks_diffuse.png"));
        let displacement_map = resources
            .create_texture(Texture::new(TextureKind::D2, "textures/displacement_map.png"));
        let normal_map =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/normal_map.png"));
        let sand_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/terrain/sand.png"));
        let grass_texture =
            resources.create_texture(Texture::new(TextureKind::D2, "textures/terrain/grass.png"));

        // Lookup tables and the environment cubemap
        let toon_lut = resources.create_texture(
            Texture::new(TextureKind::D1, "luts/toon-1D.png").with_wrap(WrapMode::ClampToEdge),
        );
        let chilly_lut =
            resources.create_texture(Texture::new(TextureKind::D1, "luts/chilly-1D.png"));
        let color_lut = resources.create_texture(Texture::new(TextureKind::D3, "luts/cool.CUBE"));
        let ocean_cubemap = resources.create_texture(Texture::new(
            TextureKind::Cube,
            "cubemaps/ocean/ocean.jpg",
        ));

        // Materials
        let box_material = resources.create_material(
            Material::new("Box", basic_shader)
                .with_value("u_Material.Diffuse", box_texture)
                .with_value("u_Material.Shininess", 0.1_f32),
        );
        resources.create_material(
            Material::new("Totem-Reflective", reflective_shader)
                .with_value("u_Material.Diffuse", totem_texture)
                .with_value("u_Material.Shininess", 0.5_f32),
        );
        resources.create_material(
            Material::new("Box-Specular", spec_shader)
                .with_value("u_Material.Diffuse", box_texture)
                .with_value("u_Material.Specular", box_specular),
        );
        resources.create_material(
            Material::new("Foliage", foliage_shader)
                .with_value("u_Material.Diffuse", leaf_texture)
                .with_value("u_Material.Shininess", 0.1_f32)
                .with_value("u_Material.Threshold", 0.1_f32)
                .with_value("u_WindDirection", [1.0_f32, 1.0, 0.0])
                .with_value("u_WindStrength", 0.5_f32)
                .with_value("u_VerticalScale", 1.0_f32)
                .with_value("u_WindSpeed", 1.0_f32),
        );
        resources.create_material(
            Material::new("Displacement Map", displacement_shader)
                .with_value("u_Material.Diffuse", bricks_texture)
                .with_value("s_Heightmap", displacement_map)
                .with_value("s_NormalMap", normal_map)
                .with_value("u_Material.Shininess", 0.5_f32)
                .with_value("u_Scale", 0.1_f32),
        );
        resources.create_material(
            Material::new("Tangent Space Normal Map", tangent_space_shader)
                .with_value("u_Material.Diffuse", bricks_texture)
                .with_value("s_NormalMap", normal_map)
                .with_value("u_Material.Shininess", 0.5_f32)
                .with_value("u_Scale", 0.1_f32),
        );
        resources.create_material(
            Material::new("Multitexturing", multitexture_shader)
                .with_value("u_Material.DiffuseA", sand_texture)
                .with_value("u_Material.DiffuseB", grass_texture)
                .with_value("u_Material.Shininess", 0.5_f32)
                .with_value("u_Scale", 0.1_f32),
        );
        let toon_material = resources.create_material(
            Material::new("Toon", toon_shader)
                .with_value("u_Material.Diffuse", box_texture)
                .with_value("s_ToonTerm", toon_lut)
                .with_value("u_Material.Shininess", 0.1_f32)
                .with_value("u_Material.Steps", 8),
        );
        let totem_material = resources.create_material(
            Material::new("Totem", spec_shader)
                .with_value("u_Material.Diffuse", totem_texture)
                .with_value("u_Material.Specular", box_specular)
                .with_value("u_Material.Shininess", 0.5_f32)
                .with_value("s_Chilly", chilly_lut),
        );
        let pillar_material = resources.create_material(
            Material::new("Pillar", spec_shader)
                .with_value("u_Material.Diffuse", pillar_texture)
                .with_value("u_Material.Specular", box_specular)
                .with_value("u_Material.Shininess", 0.5_f32)
                .with_value("s_Chilly", chilly_lut),
        );
        let fire_material = resources.create_material(
            Material::new("Fire", spec_shader)
                .with_value("u_Material.Diffuse", fire_texture)
                .with_value("u_Material.Specular", box_specular)
                .with_value("u_Material.Shininess", 0.5_f32)
                .with_value("s_Chilly", chilly_lut),
        );

        // Meshes
        let totem_mesh = resources
            .create_mesh_from_obj(&self.model_path)
            .with_context(|| format!("loading model '{}'", self.model_path.display()))?;
        let mut tiled_plane = MeshResource::new();
        tiled_plane
            .add_param(PrimitiveParam::Plane {
                size: [100.0, 100.0],
                uv_tiling: [20.0, 20.0],
            })
            .generate();
        let plane_mesh = resources.create_mesh(tiled_plane);
        let mut cube = MeshResource::new();
        cube.add_param(PrimitiveParam::Cube {
            center: [0.0, 0.0, 0.0],
            size: [1.0, 1.0, 1.0],
        })
        .generate();
        let cube_mesh = resources.create_mesh(cube);
        let mut sphere = MeshResource::new();
        sphere
            .add_param(PrimitiveParam::IcoSphere {
                center: [0.0, 0.0, 0.0],
                radius: 1.0,
                tessellation: 5,
            })
            .generate();
        let sphere_mesh = resources.create_mesh(sphere);

        let mut scene = Scene::new();

        scene.skybox = Some(Skybox {
            texture: ocean_cubemap,
            shader: skybox_shader,
            // The cubemap is authored Y-up
            rotation: vec3(90.0, 0.0, 0.0),
        });
        scene.color_lut = Some(color_lut);

        scene
            .lights
            .push(Light::new(vec3(0.0, 1.0, 3.0), vec3(1.0, 1.0, 1.0), 100.0));

        // Camera
        if let Some(camera_id) = scene.main_camera {
            let camera = scene
                .object_mut(camera_id)
                .context("scene is missing its main camera object")?;
            camera
                .set_position(vec3(-3.810, 0.09, 6.250))
                .look_at(vec3(1.5, 0.0, 4.0));
            camera.add(SimpleCameraControl::default());
        }

        // Ground plane with a static collision box just below the surface
        let plane = scene.create_object("Plane");
        {
            let object = scene.object_mut(plane).context("missing plane object")?;
            object.add(RenderComponent::new(plane_mesh, box_material));
            object
                .add(RigidBody::new(BodyType::Static))
                .add_collider(Collider::cube(vec3(50.0, 50.0, 1.0)))
                .set_position(vec3(0.0, 0.0, -1.0));
        }

        // Group parent so the showcase can be moved as one unit
        let show_floor = scene.create_object("Show Floor");

        let totem = scene.create_object("Totem");
        {
            let object = scene.object_mut(totem).context("missing totem object")?;
            object.set_position(vec3(1.5, 0.0, 4.0));
            object.add(JumpBehaviour::default());
            object.add(RenderComponent::new(totem_mesh, totem_material));
            object.add(RotatingBehaviour::new(vec3(90.0, 0.0, 0.0)));
            object.add(MaterialSwapBehaviour::new(toon_material, totem_material));
            object
                .add(RigidBody::new(BodyType::Dynamic))
                .add_collider(Collider::cube(vec3(0.5, 0.5, 0.5)));
        }
        scene.add_child(show_floor, totem)?;

        for (name, y) in [("Left Pillar", 2.7), ("Right Pillar", -2.7)] {
            let pillar = scene.create_object(name);
            let object = scene.object_mut(pillar).context("missing pillar object")?;
            object.set_position(vec3(1.5, y, 4.0));
            object.add(RenderComponent::new(cube_mesh, pillar_material));
            object.add(RotatingBehaviour::new(vec3(0.0, 0.0, 90.0)));
            scene.add_child(show_floor, pillar)?;
        }

        for (name, y) in [("Left Flame", 2.7), ("Right Flame", -2.7)] {
            let flame = scene.create_object(name);
            let object = scene.object_mut(flame).context("missing flame object")?;
            object
                .set_position(vec3(1.5, y, 5.0))
                .set_scale(vec3(0.4, 0.4, 0.4));
            object.add(RenderComponent::new(sphere_mesh, fire_material));
            object.add(RotatingBehaviour::new(vec3(0.0, 0.0, -90.0)));
            scene.add_child(show_floor, flame)?;
        }

        // Trigger volume at the floor for testing overlap detection
        let trigger = scene.create_object("Trigger");
        {
            let object = scene.object_mut(trigger).context("missing trigger object")?;
            let volume = object.add(TriggerVolume::new());
            volume
                .add_collider(Collider::cylinder(vec3(3.0, 3.0, 1.0)))
                .set_position(vec3(0.0, 0.0, 0.5));
            object.add(TriggerVolumeEnterBehaviour::new());
        }

        log::info!(
            "built default scene: {} objects, {} assets",
            scene.object_count(),
            resources.stats().total()
        );
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use std::fs;
    use std::path::Path;

    fn write_test_obj(path: &Path) {
        fs::write(
            path,
            "v 0 0 1\nv 1 0 0\nv 0 1 0\nv -1 0 0\nv 0 -1 0\nv 0 0 -1\n\
             f 1 2 3\nf 1 3 4\nf 1 4 5\nf 1 5 2\n\
             f 6 3 2\nf 6 4 3\nf 6 5 4\nf 6 2 5\n",
        )
        .unwrap();
    }

    fn test_app(dir: &Path) -> App {
        App::with_config(AppConfig {
            load_existing: false,
            scene_path: dir.join("scene.json"),
            manifest_path: dir.join("scene-manifest.json"),
        })
    }

    fn test_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("haar_default_scene_{}", tag));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn first_launch_builds_and_saves() {
        let dir = test_dir("build");
        let model = dir.join("totem.obj");
        write_test_obj(&model);

        let mut app = test_app(&dir);
        app.push_layer(DefaultSceneLayer::new(&model));
        app.run_load().unwrap();

        assert!(app.config.scene_path.exists());
        assert!(app.config.manifest_path.exists());

        let scene = app.scene().unwrap();
        assert!(scene.find_by_name("Totem").is_some());
        assert!(scene.find_by_name("Show Floor").is_some());
        assert!(scene.skybox.is_some());
        assert_eq!(scene.lights.len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn built_scene_registers_the_full_material_roster() {
        let dir = test_dir("roster");
        let model = dir.join("totem.obj");
        write_test_obj(&model);

        let mut app = test_app(&dir);
        app.push_layer(DefaultSceneLayer::new(&model));
        app.run_load().unwrap();

        for name in [
            "Box",
            "Totem-Reflective",
            "Box-Specular",
            "Foliage",
            "Toon",
            "Displacement Map",
            "Tangent Space Normal Map",
            "Multitexturing",
            "Totem",
            "Pillar",
            "Fire",
        ] {
            assert!(
                app.resources.material_by_name(name).is_some(),
                "missing material '{}'",
                name
            );
        }

        let (_, foliage) = app.resources.material_by_name("Foliage").unwrap();
        assert!(foliage.get("u_VerticalScale").is_some());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn second_launch_reloads_the_saved_scene() {
        let dir = test_dir("reload");
        let model = dir.join("totem.obj");
        write_test_obj(&model);

        let mut app = test_app(&dir);
        app.push_layer(DefaultSceneLayer::new(&model));
        app.run_load().unwrap();
        let built_stats = app.scene().unwrap().statistics();

        let mut config = app.config.clone();
        config.load_existing = true;
        let mut app = App::with_config(config);
        app.push_layer(DefaultSceneLayer::new(&model));
        app.run_load().unwrap();

        let scene = app.scene().unwrap();
        assert_eq!(scene.statistics(), built_stats);
        assert!(scene.find_by_name("Totem").is_some());
        // Assets were rebuilt from the manifest, not re-registered
        assert!(app.resources.material_by_name("Totem").is_some());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn load_existing_falls_back_when_no_save_is_present() {
        let dir = test_dir("fallback");
        let model = dir.join("totem.obj");
        write_test_obj(&model);

        let config = AppConfig {
            load_existing: true,
            scene_path: dir.join("scene.json"),
            manifest_path: dir.join("scene-manifest.json"),
        };

        let mut app = App::with_config(config);
        app.push_layer(DefaultSceneLayer::new(&model));
        app.run_load().unwrap();

        assert!(app.scene().is_some());
        assert!(app.config.scene_path.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn built_scene_survives_a_physics_step() {
        let dir = test_dir("step");
        let model = dir.join("totem.obj");
        write_test_obj(&model);

        let mut app = test_app(&dir);
        app.push_layer(DefaultSceneLayer::new(&model));
        app.run_load().unwrap();

        let totem = app.scene().unwrap().find_by_name("Totem").unwrap();
        let before = app.scene().unwrap().object(totem).unwrap().transform.position;
        app.update(0.1);
        let after = app.scene().unwrap().object(totem).unwrap().transform.position;

        // Gravity pulls the dynamic centerpiece down, rotation ticks forward
        assert!(after.z < before.z);
        let rotation = app.scene().unwrap().object(totem).unwrap().transform.rotation;
        assert!(rotation.x > 0.0);

        fs::remove_dir_all(&dir).ok();
    }
}
