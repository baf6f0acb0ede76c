//! World templates
//!
//! Provides [`WorldTemplate`] for loading/saving world descriptions from RON
//! files. A template holds the world name, its settings and a list of shape
//! templates; [`WorldTemplate::instantiate`] turns it into a [`World`].

use serde::{Serialize, Deserialize};
use std::fs;
use std::path::Path;

use crate::entity::{Material, Shape};
use crate::error::WorldResult;
use crate::export::write_atomic;
use crate::pose::Pose;
use crate::settings::WorldSettings;
use crate::shapes::ShapeKind;
use crate::world::World;

/// Serializable description of one shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeTemplate {
    /// Explicit model name; generated from the kind when absent
    #[serde(default)]
    pub name: Option<String>,
    /// Variant and dimensions
    pub shape: ShapeKind,
    #[serde(default)]
    pub pose: Pose,
    #[serde(default)]
    pub material: Material,
}

impl ShapeTemplate {
    /// Template at the origin with the default material
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            name: None,
            shape,
            pose: Pose::IDENTITY,
            material: Material::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Capture an existing shape
    pub fn from_shape(shape: &Shape) -> Self {
        Self {
            name: Some(shape.name().to_string()),
            shape: shape.kind().clone(),
            pose: shape.pose(),
            material: *shape.material(),
        }
    }
}

/// A serializable world description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldTemplate {
    /// World name
    pub name: String,
    /// Environment settings; missing fields take their defaults
    #[serde(default)]
    pub settings: WorldSettings,
    /// Shapes in render order
    #[serde(default)]
    pub shapes: Vec<ShapeTemplate>,
}

impl WorldTemplate {
    /// Create an empty template with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: WorldSettings::default(),
            shapes: Vec::new(),
        }
    }

    /// Parse a template from RON text
    pub fn from_ron(source: &str) -> WorldResult<Self> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize the template as pretty RON
    pub fn to_ron(&self) -> WorldResult<String> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Load a template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> WorldResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Save the template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> WorldResult<()> {
        write_atomic(path.as_ref(), &self.to_ron()?)
    }

    /// Add a shape template
    pub fn add_shape(&mut self, shape: ShapeTemplate) {
        self.shapes.push(shape);
    }

    pub fn with_settings(mut self, settings: WorldSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Capture a world's name, settings and shapes
    pub fn from_world(world: &World) -> Self {
        Self {
            name: world.name().to_string(),
            settings: world.settings().clone(),
            shapes: world.iter().map(ShapeTemplate::from_shape).collect(),
        }
    }

    /// Build a world from this template
    ///
    /// Unnamed shapes get names from the world's generator, numbered after
    /// any explicit `<Kind>_<n>` names. Fails on the first shape with
    /// malformed geometry.
    pub fn instantiate(&self) -> WorldResult<World> {
        let mut world = World::new(self.name.clone()).with_settings(self.settings.clone());
        for name in self.shapes.iter().filter_map(|t| t.name.as_deref()) {
            world.names_mut().reserve(name);
        }
        for template in &self.shapes {
            let shape = match &template.name {
                Some(name) => Shape::named(name.clone(), template.shape.clone())?,
                None => Shape::new(template.shape.clone(), world.names_mut())?,
            };
            world.add(
                shape
                    .with_pose(template.pose)
                    .with_material(template.material),
            );
        }
        log::debug!("Instantiated world '{}' with {} shapes", self.name, world.len());
        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Color;
    use crate::error::WorldError;
    use crate::settings::PhysicsEngine;
    use gzworld_math::Vec3;

    #[test]
    fn test_template_new() {
        let template = WorldTemplate::new("Test World");
        assert_eq!(template.name, "Test World");
        assert!(template.shapes.is_empty());
        assert_eq!(template.settings, WorldSettings::default());
    }

    #[test]
    fn test_template_serialization() {
        let mut template = WorldTemplate::new("Test World");
        template.add_shape(
            ShapeTemplate::new(ShapeKind::cuboid(2.0, 1.0, 4.0))
                .with_name("crate")
                .with_pose(Pose::new(1.0, 2.0, 0.0, 0.0, 0.0, 0.5))
                .with_material(Material::uniform(Color::RED)),
        );

        let serialized = template.to_ron().unwrap();
        assert!(serialized.contains("Test World"));
        assert!(serialized.contains("crate"));
        assert!(serialized.contains("\"Box\""));

        let deserialized = WorldTemplate::from_ron(&serialized).unwrap();
        assert_eq!(deserialized, template);
    }

    #[test]
    fn test_parse_template_file_format() {
        let source = r#"
WorldTemplate(
    name: "yard",
    settings: (
        gravity: (x: 0.0, y: 0.0, z: -3.7),
        physics: (engine: bullet),
    ),
    shapes: [
        ShapeTemplate(
            name: Some("ground"),
            shape: ShapeKind(type: "Rectangle", width: 10.0, height: 10.0),
        ),
        ShapeTemplate(
            shape: ShapeKind(type: "Sphere", radius: 0.5),
            pose: Pose(position: Vec3(x: 1.0, y: 1.0, z: 0.5)),
            material: Material(ambient: (1.0, 0.0, 0.0, 1.0), diffuse: (1.0, 0.0, 0.0, 1.0)),
        ),
    ],
)
"#;
        let template = WorldTemplate::from_ron(source).unwrap();
        assert_eq!(template.name, "yard");
        assert_eq!(template.settings.gravity, Vec3::new(0.0, 0.0, -3.7));
        assert_eq!(template.settings.physics.engine, PhysicsEngine::Bullet);
        assert_eq!(template.shapes.len(), 2);
        assert_eq!(template.shapes[0].name.as_deref(), Some("ground"));
        assert_eq!(template.shapes[1].material, Material::uniform(Color::RED));
        match &template.shapes[1].shape {
            ShapeKind::Sphere { radius } => assert_eq!(*radius, 0.5),
            other => panic!("Expected Sphere, got {:?}", other),
        }
    }

    #[test]
    fn test_instantiate() {
        let mut template = WorldTemplate::new("built");
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(1.0)).with_name("ball"));
        template.add_shape(
            ShapeTemplate::new(ShapeKind::cylinder(0.5, 2.0))
                .with_pose(Pose::new(3.0, 0.0, 1.0, 0.0, 0.0, 0.0)),
        );

        let world = template.instantiate().unwrap();
        assert_eq!(world.name(), "built");
        assert_eq!(world.len(), 2);
        assert!(world.get_by_name("ball").is_some());
        let cylinder = world.get_by_name("Cylinder_0").unwrap();
        assert_eq!(cylinder.pose().to_string(), "3 0 1 0 0 0");
    }

    #[test]
    fn test_instantiate_numbers_after_explicit_names() {
        let mut template = WorldTemplate::new("numbered");
        template.add_shape(ShapeTemplate::new(ShapeKind::cone(1.0, 1.0)));
        template.add_shape(ShapeTemplate::new(ShapeKind::cone(2.0, 2.0)).with_name("Cone_0"));

        let world = template.instantiate().unwrap();
        let names: Vec<&str> = world.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Cone_1", "Cone_0"]);
    }

    #[test]
    fn test_instantiate_rejects_malformed() {
        let mut template = WorldTemplate::new("bad");
        template.add_shape(ShapeTemplate::new(ShapeKind::sphere(-1.0)));
        assert!(matches!(
            template.instantiate(),
            Err(WorldError::MalformedGeometry { .. })
        ));
    }

    #[test]
    fn test_from_world_round_trips_render() {
        let mut world = World::new("source");
        world.spawn(ShapeKind::cuboid(1.0, 2.0, 3.0)).unwrap();
        world.spawn(ShapeKind::circle(0.5)).unwrap();

        let rebuilt = WorldTemplate::from_world(&world).instantiate().unwrap();
        assert_eq!(rebuilt.render().unwrap(), world.render().unwrap());
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.ron");
        let mut template = WorldTemplate::new("disk");
        template.add_shape(ShapeTemplate::new(ShapeKind::cone(1.0, 2.0)));
        template.save(&path).unwrap();

        let loaded = WorldTemplate::load(&path).unwrap();
        assert_eq!(loaded, template);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            WorldTemplate::load(dir.path().join("missing.ron")),
            Err(WorldError::Io(_))
        ));
        assert!(matches!(
            WorldTemplate::from_ron("WorldTemplate(name: )"),
            Err(WorldError::Template(_))
        ));
    }
}
