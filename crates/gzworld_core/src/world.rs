//! World container for shapes
//!
//! The World holds an ordered list of shapes plus the environment settings,
//! and renders both into one SDF document.

use std::fs;
use std::path::{Path, PathBuf};

use gzworld_math::Vec3;

use crate::assets::{Author, ModelLibrary, DEFAULT_MODEL_ROOT};
use crate::document::{Document, Element};
use crate::entity::{Color, Shape};
use crate::error::{WorldError, WorldResult};
use crate::export::{normalize_extension, write_atomic};
use crate::naming::NameGenerator;
use crate::settings::{
    AtmosphereType, AudioDevice, Light, Physics, SphericalCoordinates, WorldSettings,
};
use crate::shapes::ShapeKind;
use crate::SDF_VERSION;

/// A simulation world of static shapes
///
/// Insertion order is preserved: shapes render in the order they were added.
#[derive(Clone, Debug)]
pub struct World {
    name: String,
    shapes: Vec<Shape>,
    settings: WorldSettings,
    names: NameGenerator,
    /// Where mesh-backed shapes are packaged on save (None = next to the document)
    model_root: Option<PathBuf>,
    /// Author written to mesh package manifests
    author: Author,
}

impl Default for World {
    fn default() -> Self {
        Self::new("default")
    }
}

impl World {
    /// Create an empty world with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shapes: Vec::new(),
            settings: WorldSettings::default(),
            names: NameGenerator::new(),
            model_root: None,
            author: Author::default(),
        }
    }

    /// Replace all settings at once
    pub fn with_settings(mut self, settings: WorldSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Package mesh-backed shapes under `root` instead of next to the document
    pub fn with_model_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.model_root = Some(root.into());
        self
    }

    /// Set the author recorded in mesh package manifests
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Append a shape
    ///
    /// Names are not checked for uniqueness; a duplicate is logged and kept.
    /// A `<Kind>_<n>` name moves this world's generator past `n`, so later
    /// [`spawn`](World::spawn) calls never reuse it.
    pub fn add(&mut self, shape: Shape) {
        if self.get_by_name(shape.name()).is_some() {
            log::warn!("World '{}' already has a shape named '{}'", self.name, shape.name());
        }
        self.names.reserve(shape.name());
        self.shapes.push(shape);
    }

    /// Build a shape with a name from this world's generator and add it
    ///
    /// Names already present in the world are skipped. Returns the generated
    /// name.
    pub fn spawn(&mut self, kind: ShapeKind) -> WorldResult<String> {
        kind.validate()?;
        let name = loop {
            let candidate = self.names.next_name(kind.kind_name());
            if self.get_by_name(&candidate).is_none() {
                break candidate;
            }
        };
        self.add(Shape::named(name.clone(), kind)?);
        Ok(name)
    }

    /// Name generator used by [`spawn`](World::spawn)
    pub fn names_mut(&mut self) -> &mut NameGenerator {
        &mut self.names
    }

    /// Remove the first shape equal to `shape`
    pub fn remove(&mut self, shape: &Shape) -> WorldResult<Shape> {
        let index = self
            .shapes
            .iter()
            .position(|s| s == shape)
            .ok_or_else(|| WorldError::NotFound { name: shape.name().to_string() })?;
        Ok(self.shapes.remove(index))
    }

    /// Remove the first shape with the given name
    pub fn remove_by_name(&mut self, name: &str) -> WorldResult<Shape> {
        let index = self
            .shapes
            .iter()
            .position(|s| s.name() == name)
            .ok_or_else(|| WorldError::NotFound { name: name.to_string() })?;
        Ok(self.shapes.remove(index))
    }

    /// All shapes in insertion order
    pub fn get_objects(&self) -> &[Shape] {
        &self.shapes
    }

    /// First shape with the given name
    pub fn get_by_name(&self, name: &str) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.name() == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    /// Remove all shapes, keeping settings
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.settings.gravity = gravity;
    }

    pub fn set_ambient_light(&mut self, color: Color) {
        self.settings.ambient_light = color;
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.settings.background_color = color;
    }

    pub fn set_physics(&mut self, physics: Physics) {
        self.settings.physics = physics;
    }

    pub fn set_light(&mut self, light: Light) {
        self.settings.light = light;
    }

    pub fn set_magnetic_field(&mut self, field: Vec3) {
        self.settings.magnetic_field = field;
    }

    pub fn set_atmosphere(&mut self, atmosphere: AtmosphereType) {
        self.settings.atmosphere = atmosphere;
    }

    pub fn set_audio_device(&mut self, device: AudioDevice) {
        self.settings.audio_device = device;
    }

    pub fn set_spherical_coordinates(&mut self, coordinates: SphericalCoordinates) {
        self.settings.spherical_coordinates = coordinates;
    }

    /// The complete document tree, built from the current state
    pub fn to_document(&self) -> Document {
        let world = Element::new("world")
            .attr("name", &self.name)
            .child(self.settings.light.to_element())
            .children(self.shapes.iter().map(Shape::to_element))
            .children(self.settings.environment_elements());
        Document::new(Element::new("sdf").attr("version", SDF_VERSION).child(world))
    }

    /// Render the world as SDF text
    pub fn render(&self) -> WorldResult<String> {
        let xml = self.to_document().to_xml_string()?;
        log::debug!(
            "Rendered world '{}' with {} shapes ({} bytes)",
            self.name,
            self.shapes.len(),
            xml.len()
        );
        Ok(xml)
    }

    /// Model root used when saving to `document`
    pub fn model_root_for(&self, document: &Path) -> PathBuf {
        match &self.model_root {
            Some(root) => root.clone(),
            None => document
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(DEFAULT_MODEL_ROOT),
        }
    }

    /// Write mesh packages and the document, returning the document path
    ///
    /// `.sdf` is appended when missing and existing files are overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> WorldResult<PathBuf> {
        let path = normalize_extension(path);

        let assets: Vec<_> = self.shapes.iter().filter_map(Shape::mesh_asset).collect();
        if !assets.is_empty() {
            let library = ModelLibrary::new(self.model_root_for(&path))
                .with_author(self.author.clone());
            fs::create_dir_all(library.root())?;
            for asset in &assets {
                library.export(asset)?;
            }
        }

        write_atomic(&path, &self.render()?)?;
        log::info!(
            "Saved world '{}' ({} shapes, {} mesh models) to {}",
            self.name,
            self.shapes.len(),
            assets.len(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::PhysicsEngine;

    fn box_and_sphere() -> World {
        let mut world = World::new("default");
        world.add(
            Shape::named("Box_0", ShapeKind::cuboid(2.0, 1.0, 4.0))
                .unwrap()
                .at(1.0, 2.0, 0.0)
                .with_color("1 1 0 1".parse().unwrap()),
        );
        world.add(
            Shape::named("Sphere_1", ShapeKind::sphere(1.0))
                .unwrap()
                .at(3.0, 4.0, 0.0)
                .with_color("0 1 1 1".parse().unwrap()),
        );
        world
    }

    #[test]
    fn test_world_new() {
        let world = World::new("empty");
        assert!(world.is_empty());
        assert_eq!(world.name(), "empty");
        assert_eq!(world.settings(), &WorldSettings::default());
    }

    #[test]
    fn test_box_and_sphere_document() {
        let doc = box_and_sphere().to_document();
        let world = doc.root.find("world").unwrap();
        let models: Vec<_> = world.find_all("model").collect();
        assert_eq!(models.len(), 2);

        assert_eq!(
            models[0].find_path("link/collision/geometry/box/size").unwrap().text_content(),
            "2 1 4"
        );
        assert_eq!(models[0].find("pose").unwrap().text_content(), "1 2 0 0 0 0");
        assert_eq!(
            models[1].find_path("link/visual/geometry/sphere/radius").unwrap().text_content(),
            "1"
        );
        assert_eq!(models[1].find("pose").unwrap().text_content(), "3 4 0 0 0 0");
    }

    #[test]
    fn test_document_order() {
        let doc = box_and_sphere().to_document();
        assert_eq!(doc.root.attribute("version"), Some("1.6"));
        let order: Vec<&str> = doc.root.find("world").unwrap().elements().map(|e| e.name()).collect();
        assert_eq!(
            order,
            vec![
                "light",
                "model",
                "model",
                "gravity",
                "magnetic_field",
                "atmosphere",
                "physics",
                "scene",
                "audio",
                "wind",
                "spherical_coordinates"
            ]
        );
    }

    #[test]
    fn test_render_is_idempotent() {
        let world = box_and_sphere();
        assert_eq!(world.render().unwrap(), world.render().unwrap());
    }

    #[test]
    fn test_render_reflects_mutation() {
        let mut world = box_and_sphere();
        let before = world.render().unwrap();
        world.set_gravity(Vec3::new(0.0, 0.0, -1.62));
        let after = world.render().unwrap();
        assert_ne!(before, after);
        assert!(after.contains("<gravity>0 0 -1.62</gravity>"));
    }

    #[test]
    fn test_setters_replace_fields() {
        let mut world = World::new("w");
        world.set_physics(Physics { engine: PhysicsEngine::Simbody, ..Physics::default() });
        world.set_atmosphere(AtmosphereType::Constant);
        world.set_audio_device(AudioDevice::Custom("pulse".to_string()));
        world.set_ambient_light(Color::WHITE);
        world.set_background_color(Color::BLACK);
        world.set_magnetic_field(Vec3::ZERO);

        let settings = world.settings();
        assert_eq!(settings.physics.engine, PhysicsEngine::Simbody);
        assert_eq!(settings.atmosphere, AtmosphereType::Constant);
        assert_eq!(settings.audio_device.as_str(), "pulse");
        assert_eq!(settings.ambient_light, Color::WHITE);
        assert_eq!(settings.background_color, Color::BLACK);
        assert_eq!(settings.magnetic_field, Vec3::ZERO);
    }

    #[test]
    fn test_remove() {
        let mut world = box_and_sphere();
        let sphere = world.get_by_name("Sphere_1").unwrap().clone();
        let removed = world.remove(&sphere).unwrap();
        assert_eq!(removed, sphere);
        assert_eq!(world.len(), 1);
        let sdf = world.render().unwrap();
        assert!(!sdf.contains("Sphere_1"));
        assert!(sdf.contains("<model name=\"Box_0\">"));

        let result = world.remove(&sphere);
        assert!(matches!(result, Err(WorldError::NotFound { ref name }) if name == "Sphere_1"));
    }

    #[test]
    fn test_remove_by_name() {
        let mut world = box_and_sphere();
        assert!(world.remove_by_name("Box_0").is_ok());
        assert!(matches!(world.remove_by_name("Box_0"), Err(WorldError::NotFound { .. })));
        assert_eq!(world.get_objects().len(), 1);
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let mut world = World::new("w");
        let shape = Shape::named("dup", ShapeKind::sphere(1.0)).unwrap();
        world.add(shape.clone());
        world.add(shape);
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_spawn_generates_names() {
        let mut world = World::new("w");
        let a = world.spawn(ShapeKind::cuboid(1.0, 1.0, 1.0)).unwrap();
        let b = world.spawn(ShapeKind::cuboid(1.0, 1.0, 1.0)).unwrap();
        let c = world.spawn(ShapeKind::sphere(1.0)).unwrap();
        assert_eq!(a, "Box_0");
        assert_eq!(b, "Box_1");
        assert_eq!(c, "Sphere_2");
        assert!(world.spawn(ShapeKind::sphere(0.0)).is_err());
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_spawn_never_reuses_added_names() {
        let mut own = NameGenerator::new();
        let mut world = World::new("mixed");
        world.add(Shape::new(ShapeKind::cone(1.0, 1.0), &mut own).unwrap());
        world.add(Shape::named("Box_1", ShapeKind::cuboid(1.0, 1.0, 1.0)).unwrap());
        world.add(Shape::named("crate", ShapeKind::cuboid(1.0, 1.0, 1.0)).unwrap());

        let cone = world.spawn(ShapeKind::cone(3.0, 9.0)).unwrap();
        let cuboid = world.spawn(ShapeKind::cuboid(2.0, 2.0, 2.0)).unwrap();
        assert_eq!(cone, "Cone_2");
        assert_eq!(cuboid, "Box_3");

        let mut names: Vec<&str> = world.iter().map(|s| s.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), world.len());
    }

    #[test]
    fn test_spawned_mesh_keeps_its_own_asset() {
        let dir = tempfile::tempdir().unwrap();
        let mut own = NameGenerator::new();
        let mut world = World::new("assets");
        world.add(Shape::new(ShapeKind::cone(1.0, 1.0), &mut own).unwrap());
        let spawned = world.spawn(ShapeKind::cone(3.0, 9.0)).unwrap();
        world.save(dir.path().join("assets")).unwrap();

        let models = dir.path().join("gazebo_models");
        let first = fs::read_to_string(models.join("Cone_0/meshes/Cone_0.dae")).unwrap();
        let second = fs::read_to_string(
            models.join(&spawned).join("meshes").join(format!("{}.dae", spawned)),
        )
        .unwrap();
        assert!(first.contains("0 0 1 0 0 0"), "first cone apex should stay at z=1");
        assert!(second.contains("0 0 9 0 0 0"), "spawned cone apex should be at z=9");
    }

    #[test]
    fn test_model_root_default() {
        let world = World::new("w");
        assert_eq!(
            world.model_root_for(Path::new("out/world.sdf")),
            PathBuf::from("out/gazebo_models")
        );
        let world = world.with_model_root("/tmp/models");
        assert_eq!(
            world.model_root_for(Path::new("out/world.sdf")),
            PathBuf::from("/tmp/models")
        );
    }

    #[test]
    fn test_save_writes_mesh_models() {
        let dir = tempfile::tempdir().unwrap();
        let mut world = World::new("meshes");
        world.spawn(ShapeKind::cone(1.0, 2.0)).unwrap();
        world.spawn(ShapeKind::sphere(1.0)).unwrap();

        let path = world.save(dir.path().join("meshes")).unwrap();
        assert_eq!(path, dir.path().join("meshes.sdf"));
        assert!(dir.path().join("gazebo_models/Cone_0/meshes/Cone_0.dae").is_file());
        assert!(!dir.path().join("gazebo_models/Sphere_1").exists());

        let sdf = fs::read_to_string(&path).unwrap();
        assert!(sdf.contains("<uri>model://Cone_0/meshes/Cone_0.dae</uri>"));
    }

    #[test]
    fn test_save_records_author_in_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let author = Author { name: "Ada".to_string(), email: "ada@example.com".to_string() };
        let mut world = World::new("authored").with_author(author);
        world.spawn(ShapeKind::tetrahedron(1.0, 1.0, 1.0)).unwrap();
        world.save(dir.path().join("authored")).unwrap();

        let manifest =
            fs::read_to_string(dir.path().join("gazebo_models/Tetrahedron_0/model.config")).unwrap();
        assert!(manifest.contains("<email>ada@example.com</email>"));
        assert!(manifest.contains("<name>Ada</name>"));
    }

    #[test]
    fn test_save_without_meshes_creates_no_model_root() {
        let dir = tempfile::tempdir().unwrap();
        box_and_sphere().save(dir.path().join("plain.sdf")).unwrap();
        assert!(!dir.path().join("gazebo_models").exists());
    }
}
