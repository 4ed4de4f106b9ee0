//! The scene: object arena, hierarchy, update loop, and persistence

use std::path::Path;

use cgmath::{Matrix4, Vector3};
use serde::{Deserialize, Serialize};

use crate::assets::AssetId;
use crate::components::{Camera, ComponentRegistry};
use crate::physics::{Aabb, RigidBody, TriggerVolume};

use super::{GameObject, GameObjectId, Light, SceneError, Transform};

/// Scene-wide environment map settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Skybox {
    /// Cubemap texture asset
    pub texture: AssetId,
    /// Shader program drawing the skybox
    pub shader: AssetId,
    /// Euler rotation in degrees, e.g. to convert a Y-up cubemap to Z-up
    pub rotation: Vector3<f32>,
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub component_count: usize,
    pub light_count: usize,
}

/// Hierarchical collection of game objects plus scene-wide state
pub struct Scene {
    objects: Vec<GameObject>,
    pub lights: Vec<Light>,
    pub skybox: Option<Skybox>,
    /// Color-grading lookup table applied after rendering
    pub color_lut: Option<AssetId>,
    pub main_camera: Option<GameObjectId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates a scene owning a "Main Camera" object with a default
    /// [`Camera`] component
    pub fn new() -> Self {
        let mut scene = Self::bare();
        let camera = scene.create_object("Main Camera");
        scene.object_mut(camera).unwrap().add(Camera::default());
        scene.main_camera = Some(camera);
        scene
    }

    fn bare() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            skybox: None,
            color_lut: None,
            main_camera: None,
        }
    }

    /// Creates a game object, uniquifying the name if it is already taken
    pub fn create_object(&mut self, name: &str) -> GameObjectId {
        let id = GameObjectId(self.objects.len() as u32);
        let name = self.ensure_unique_name(name);
        self.objects.push(GameObject::new(id, name));
        id
    }

    pub fn object(&self, id: GameObjectId) -> Option<&GameObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn object_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id.0 as usize)
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<GameObjectId> {
        self.objects.iter().find(|o| o.name == name).map(|o| o.id)
    }

    fn ensure_unique_name(&self, desired_name: &str) -> String {
        let mut counter = 0;
        let mut test_name = desired_name.to_string();

        while self.objects.iter().any(|obj| obj.name == test_name) {
            counter += 1;
            test_name = format!("{} ({})", desired_name, counter);
        }

        test_name
    }

    /// Re-parents `child`, detaching it from any previous parent.
    /// `None` moves the object back to the scene root.
    pub fn set_parent(
        &mut self,
        child: GameObjectId,
        parent: Option<GameObjectId>,
    ) -> Result<(), SceneError> {
        if self.object(child).is_none() {
            return Err(SceneError::InvalidObject(child));
        }
        if let Some(parent_id) = parent {
            if self.object(parent_id).is_none() {
                return Err(SceneError::InvalidObject(parent_id));
            }
            // Walk up from the new parent; finding the child means a cycle
            let mut cursor = Some(parent_id);
            while let Some(id) = cursor {
                if id == child {
                    return Err(SceneError::HierarchyCycle {
                        child,
                        parent: parent_id,
                    });
                }
                cursor = self.objects[id.0 as usize].parent;
            }
        }

        if let Some(old) = self.objects[child.0 as usize].parent {
            self.objects[old.0 as usize].children.retain(|&c| c != child);
        }
        self.objects[child.0 as usize].parent = parent;
        if let Some(parent_id) = parent {
            self.objects[parent_id.0 as usize].children.push(child);
        }
        Ok(())
    }

    /// Convenience wrapper matching authoring order: parent first
    pub fn add_child(
        &mut self,
        parent: GameObjectId,
        child: GameObjectId,
    ) -> Result<(), SceneError> {
        self.set_parent(child, Some(parent))
    }

    /// World transform composed up the parent chain
    pub fn world_matrix(&self, id: GameObjectId) -> Matrix4<f32> {
        let object = &self.objects[id.0 as usize];
        let local = object.transform.local_matrix();
        match object.parent {
            Some(parent) => self.world_matrix(parent) * local,
            None => local,
        }
    }

    /// World-space position of an object's origin
    pub fn world_position(&self, id: GameObjectId) -> Vector3<f32> {
        (self.world_matrix(id) * cgmath::vec4(0.0, 0.0, 0.0, 1.0)).truncate()
    }

    pub fn statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            component_count: self.objects.iter().map(|o| o.component_count()).sum(),
            light_count: self.lights.len(),
        }
    }

    /// Advances the scene: ticks every component, then runs the trigger
    /// overlap pass and dispatches enter/exit hooks.
    pub fn update(&mut self, dt: f32) {
        for index in 0..self.objects.len() {
            self.tick_components(index, dt);
        }
        self.trigger_pass();
    }

    /// Runs each component's update with the component detached, so it can
    /// reach its sibling components through the object.
    fn tick_components(&mut self, index: usize, dt: f32) {
        let count = self.objects[index].components.len();
        for slot in 0..count {
            let mut component = self.objects[index].components.remove(slot);
            component.update(&mut self.objects[index], dt);
            self.objects[index].components.insert(slot, component);
        }
    }

    /// World bounds of an object's rigid body, if it has one
    fn body_world_aabb(&self, object: &GameObject) -> Option<Aabb> {
        let body = object.get::<RigidBody>()?;
        Some(body.local_aabb().transformed(&self.world_matrix(object.id)))
    }

    fn trigger_pass(&mut self) {
        // Bodies eligible to enter volumes
        let bodies: Vec<(GameObjectId, Aabb)> = self
            .objects
            .iter()
            .filter_map(|o| self.body_world_aabb(o).map(|aabb| (o.id, aabb)))
            .collect();

        // (volume object, bodies now overlapping it)
        let mut occupancy: Vec<(GameObjectId, Vec<GameObjectId>)> = Vec::new();
        for object in &self.objects {
            let Some(volume) = object.get::<TriggerVolume>() else {
                continue;
            };
            let Some(local) = volume.local_aabb() else {
                continue;
            };
            let world = local.transformed(&self.world_matrix(object.id));
            let now: Vec<GameObjectId> = bodies
                .iter()
                .filter(|(id, aabb)| *id != object.id && world.intersects(aabb))
                .map(|(id, _)| *id)
                .collect();
            occupancy.push((object.id, now));
        }

        // Diff against each volume's previous occupancy, then dispatch
        let mut events: Vec<(GameObjectId, GameObjectId, bool)> = Vec::new();
        for (volume_id, now) in occupancy {
            let Some(volume) = self.objects[volume_id.0 as usize].get_mut::<TriggerVolume>()
            else {
                continue;
            };
            for &body in &now {
                if !volume.inside.contains(&body) {
                    events.push((volume_id, body, true));
                }
            }
            for &body in volume.inside.clone().iter() {
                if !now.contains(&body) {
                    events.push((volume_id, body, false));
                }
            }
            volume.inside = now.into_iter().collect();
        }

        for (volume_id, body_id, entered) in events {
            self.dispatch_trigger(volume_id, body_id, entered);
            self.dispatch_trigger(body_id, volume_id, entered);
        }
    }

    /// Fires trigger hooks on every component of `target`, detaching each
    /// component while its hook runs
    fn dispatch_trigger(&mut self, target: GameObjectId, other: GameObjectId, entered: bool) {
        let index = target.0 as usize;
        let count = self.objects[index].components.len();
        for slot in 0..count {
            let mut component = self.objects[index].components.remove(slot);
            if entered {
                component.on_trigger_enter(&mut self.objects[index], other);
            } else {
                component.on_trigger_exit(&mut self.objects[index], other);
            }
            self.objects[index].components.insert(slot, component);
        }
    }

    /// Serializes the scene graph to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneError> {
        let path = path.as_ref();

        let mut objects = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            let mut components = Vec::with_capacity(object.component_count());
            for component in object.components() {
                components.push(ComponentFile {
                    kind: component.kind().to_string(),
                    data: component.to_value()?,
                });
            }
            objects.push(ObjectFile {
                name: object.name.clone(),
                transform: object.transform,
                parent: object.parent,
                components,
            });
        }

        let file = SceneFile {
            main_camera: self.main_camera,
            lights: self.lights.clone(),
            skybox: self.skybox,
            color_lut: self.color_lut,
            objects,
        };

        std::fs::write(path, serde_json::to_string_pretty(&file)?)?;
        log::info!(
            "saved scene '{}' ({} objects)",
            path.display(),
            self.objects.len()
        );
        Ok(())
    }

    /// Loads a scene from a JSON file, rebuilding components through the
    /// registry. Asset ids inside components refer to the manifest that was
    /// saved alongside the scene.
    pub fn load(path: impl AsRef<Path>, registry: &ComponentRegistry) -> Result<Self, SceneError> {
        let path = path.as_ref();
        let file: SceneFile = serde_json::from_str(&std::fs::read_to_string(path)?)?;

        let mut scene = Self::bare();
        scene.lights = file.lights;
        scene.skybox = file.skybox;
        scene.color_lut = file.color_lut;

        for (index, spec) in file.objects.into_iter().enumerate() {
            let id = GameObjectId(index as u32);
            let mut object = GameObject::new(id, spec.name);
            object.transform = spec.transform;
            object.parent = spec.parent;
            for component in spec.components {
                object
                    .components
                    .push(registry.load(&component.kind, component.data)?);
            }
            scene.objects.push(object);
        }

        // Rebuild child links and validate parent references
        for index in 0..scene.objects.len() {
            let id = scene.objects[index].id;
            if let Some(parent) = scene.objects[index].parent {
                if scene.object(parent).is_none() {
                    return Err(SceneError::InvalidObject(parent));
                }
                scene.objects[parent.0 as usize].children.push(id);
            }
        }

        // A hand-edited file can contain parent loops that set_parent would
        // never allow; world_matrix recurses on them, so reject the file
        for index in 0..scene.objects.len() {
            let id = scene.objects[index].id;
            let Some(first_parent) = scene.objects[index].parent else {
                continue;
            };
            let mut cursor = Some(first_parent);
            let mut hops = 0;
            while let Some(parent) = cursor {
                if parent == id || hops >= scene.objects.len() {
                    return Err(SceneError::HierarchyCycle {
                        child: id,
                        parent: first_parent,
                    });
                }
                hops += 1;
                cursor = scene.objects[parent.0 as usize].parent;
            }
        }

        if let Some(camera) = file.main_camera {
            if scene.object(camera).is_none() {
                return Err(SceneError::InvalidObject(camera));
            }
        }
        scene.main_camera = file.main_camera;

        log::info!(
            "loaded scene '{}' ({} objects)",
            path.display(),
            scene.objects.len()
        );
        Ok(scene)
    }
}

#[derive(Serialize, Deserialize)]
struct SceneFile {
    main_camera: Option<GameObjectId>,
    lights: Vec<Light>,
    skybox: Option<Skybox>,
    color_lut: Option<AssetId>,
    objects: Vec<ObjectFile>,
}

#[derive(Serialize, Deserialize)]
struct ObjectFile {
    name: String,
    transform: Transform,
    parent: Option<GameObjectId>,
    components: Vec<ComponentFile>,
}

#[derive(Serialize, Deserialize)]
struct ComponentFile {
    kind: String,
    data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{
        MaterialSwapBehaviour, RenderComponent, RotatingBehaviour, TriggerVolumeEnterBehaviour,
    };
    use crate::physics::{BodyType, Collider};
    use cgmath::{vec3, InnerSpace};

    #[test]
    fn new_scene_has_a_main_camera() {
        let scene = Scene::new();
        let camera = scene.main_camera.unwrap();
        assert!(scene.object(camera).unwrap().has::<Camera>());
        assert_eq!(scene.object(camera).unwrap().name, "Main Camera");
    }

    #[test]
    fn names_are_uniquified() {
        let mut scene = Scene::new();
        let a = scene.create_object("Pillar");
        let b = scene.create_object("Pillar");
        assert_eq!(scene.object(a).unwrap().name, "Pillar");
        assert_eq!(scene.object(b).unwrap().name, "Pillar (1)");
        assert_eq!(scene.find_by_name("Pillar (1)"), Some(b));
    }

    #[test]
    fn world_transform_composes_up_the_hierarchy() {
        let mut scene = Scene::new();
        let parent = scene.create_object("Parent");
        let child = scene.create_object("Child");
        scene.add_child(parent, child).unwrap();

        scene
            .object_mut(parent)
            .unwrap()
            .set_position(vec3(0.0, 0.0, 5.0))
            .set_rotation(vec3(0.0, 0.0, 90.0));
        scene
            .object_mut(child)
            .unwrap()
            .set_position(vec3(1.0, 0.0, 0.0));

        let p = scene.world_position(child);
        assert!((p - vec3(0.0, 1.0, 5.0)).magnitude() < 1e-4);
    }

    #[test]
    fn reparenting_updates_child_links() {
        let mut scene = Scene::new();
        let a = scene.create_object("A");
        let b = scene.create_object("B");
        let c = scene.create_object("C");

        scene.add_child(a, c).unwrap();
        scene.add_child(b, c).unwrap();

        assert!(scene.object(a).unwrap().children.is_empty());
        assert_eq!(scene.object(b).unwrap().children, vec![c]);
        assert_eq!(scene.object(c).unwrap().parent, Some(b));
    }

    #[test]
    fn cyclic_parenting_is_rejected() {
        let mut scene = Scene::new();
        let a = scene.create_object("A");
        let b = scene.create_object("B");
        scene.add_child(a, b).unwrap();

        let result = scene.add_child(b, a);
        assert!(matches!(result, Err(SceneError::HierarchyCycle { .. })));

        let result = scene.set_parent(a, Some(a));
        assert!(matches!(result, Err(SceneError::HierarchyCycle { .. })));
    }

    #[test]
    fn update_ticks_behaviours() {
        let mut scene = Scene::new();
        let spinner = scene.create_object("Spinner");
        scene
            .object_mut(spinner)
            .unwrap()
            .add(RotatingBehaviour::new(vec3(0.0, 0.0, 90.0)));

        scene.update(0.5);
        scene.update(0.5);

        let rotation = scene.object(spinner).unwrap().transform.rotation;
        assert!((rotation.z - 90.0).abs() < 1e-4);
    }

    fn trigger_scene() -> (Scene, GameObjectId, GameObjectId) {
        let mut scene = Scene::new();

        let trigger = scene.create_object("Trigger");
        {
            let object = scene.object_mut(trigger).unwrap();
            let volume = object.add(TriggerVolume::new());
            volume
                .add_collider(Collider::cylinder(vec3(3.0, 3.0, 1.0)))
                .set_position(vec3(0.0, 0.0, 0.5));
            object.add(TriggerVolumeEnterBehaviour::new());
        }

        let visitor = scene.create_object("Visitor");
        {
            let object = scene.object_mut(visitor).unwrap();
            object.set_position(vec3(20.0, 0.0, 0.5));
            object
                .add(RigidBody::new(BodyType::Static))
                .add_collider(Collider::cube(vec3(0.5, 0.5, 0.5)));
            object.add(RenderComponent::new(AssetId(0), AssetId(1)));
            object.add(MaterialSwapBehaviour::new(AssetId(2), AssetId(1)));
        }

        (scene, trigger, visitor)
    }

    #[test]
    fn trigger_fires_enter_and_exit_once() {
        let (mut scene, trigger, visitor) = trigger_scene();

        scene.update(0.016);
        let counter = scene
            .object(trigger)
            .unwrap()
            .get::<TriggerVolumeEnterBehaviour>()
            .unwrap();
        assert_eq!((counter.enter_count, counter.exit_count), (0, 0));

        // Step inside; a second update while inside must not re-fire
        scene
            .object_mut(visitor)
            .unwrap()
            .set_position(vec3(0.0, 0.0, 0.5));
        scene.update(0.016);
        scene.update(0.016);
        let counter = scene
            .object(trigger)
            .unwrap()
            .get::<TriggerVolumeEnterBehaviour>()
            .unwrap();
        assert_eq!((counter.enter_count, counter.exit_count), (1, 0));

        scene
            .object_mut(visitor)
            .unwrap()
            .set_position(vec3(20.0, 0.0, 0.5));
        scene.update(0.016);
        let counter = scene
            .object(trigger)
            .unwrap()
            .get::<TriggerVolumeEnterBehaviour>()
            .unwrap();
        assert_eq!((counter.enter_count, counter.exit_count), (1, 1));
    }

    #[test]
    fn trigger_swaps_visitor_material() {
        let (mut scene, _trigger, visitor) = trigger_scene();

        scene
            .object_mut(visitor)
            .unwrap()
            .set_position(vec3(0.0, 0.0, 0.5));
        scene.update(0.016);
        assert_eq!(
            scene.object(visitor).unwrap().get::<RenderComponent>().unwrap().material,
            AssetId(2)
        );

        scene
            .object_mut(visitor)
            .unwrap()
            .set_position(vec3(20.0, 0.0, 0.5));
        scene.update(0.016);
        assert_eq!(
            scene.object(visitor).unwrap().get::<RenderComponent>().unwrap().material,
            AssetId(1)
        );
    }

    #[test]
    fn save_and_load_round_trip() {
        let (mut scene, trigger, visitor) = trigger_scene();
        scene.lights.push(Light::new(
            vec3(0.0, 1.0, 3.0),
            vec3(1.0, 1.0, 1.0),
            100.0,
        ));
        scene.color_lut = Some(AssetId(12));
        scene.skybox = Some(Skybox {
            texture: AssetId(10),
            shader: AssetId(11),
            rotation: vec3(90.0, 0.0, 0.0),
        });
        let group = scene.create_object("Group");
        scene.add_child(group, visitor).unwrap();

        let path = std::env::temp_dir().join("haar_scene_round_trip.json");
        scene.save(&path).unwrap();

        let registry = ComponentRegistry::with_defaults();
        let loaded = Scene::load(&path, &registry).unwrap();

        assert_eq!(loaded.statistics(), scene.statistics());
        assert_eq!(loaded.main_camera, scene.main_camera);
        assert_eq!(loaded.skybox, scene.skybox);
        assert_eq!(loaded.color_lut, Some(AssetId(12)));
        assert_eq!(loaded.lights.len(), 1);

        let visitor = loaded.find_by_name("Visitor").unwrap();
        assert_eq!(loaded.object(visitor).unwrap().parent, Some(group));
        assert!(loaded.object(visitor).unwrap().has::<RigidBody>());
        assert!(loaded.object(visitor).unwrap().has::<MaterialSwapBehaviour>());
        assert!(loaded.object(trigger).unwrap().has::<TriggerVolume>());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_rejects_parent_cycles() {
        let mut scene = Scene::new();
        let a = scene.create_object("A");
        let b = scene.create_object("B");
        scene.add_child(b, a).unwrap();

        let path = std::env::temp_dir().join("haar_scene_parent_cycle.json");
        scene.save(&path).unwrap();

        // Close the loop by hand, the way a corrupted or edited file would
        let mut file: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        file["objects"][b.0 as usize]["parent"] = serde_json::json!(a.0);
        std::fs::write(&path, file.to_string()).unwrap();

        let registry = ComponentRegistry::with_defaults();
        let result = Scene::load(&path, &registry);
        assert!(matches!(result, Err(SceneError::HierarchyCycle { .. })));

        // Self-parenting is rejected too
        file["objects"][a.0 as usize]["parent"] = serde_json::json!(a.0);
        file["objects"][b.0 as usize]["parent"] = serde_json::Value::Null;
        std::fs::write(&path, file.to_string()).unwrap();
        let result = Scene::load(&path, &registry);
        assert!(matches!(result, Err(SceneError::HierarchyCycle { .. })));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn load_with_unregistered_component_fails() {
        let (scene, _, _) = trigger_scene();
        let path = std::env::temp_dir().join("haar_scene_unknown_component.json");
        scene.save(&path).unwrap();

        let result = Scene::load(&path, &ComponentRegistry::new());
        assert!(matches!(result, Err(SceneError::UnknownComponent(_))));

        std::fs::remove_file(&path).ok();
    }
}
