//! Shape entities: a named, posed, coloured solid
//!
//! A [`Shape`] is what gets added to a [`World`](crate::World). It pairs a
//! [`ShapeKind`] with a unique name, a [`Pose`] and a [`Material`], and
//! renders itself as a static SDF `<model>`.

use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;

use crate::assets::MeshAsset;
use crate::document::Element;
use crate::error::{WorldError, WorldResult};
use crate::naming::NameGenerator;
use crate::pose::Pose;
use crate::shapes::ShapeKind;
use gzworld_math::Vec3;

/// RGBA colour, each component 0.0-1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a colour from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque colour
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Neutral grey used when no colour is given
    pub const GRAY: Self = Self::rgb(0.5, 0.5, 0.5);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::GRAY
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Color> for [f32; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Parses the SDF form, four whitespace-separated numbers: `"1 1 0 1"`
impl FromStr for Color {
    type Err = WorldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorldError::InvalidColor { input: s.to_string() };
        let components = s
            .split_whitespace()
            .map(|part| part.parse::<f32>().map_err(|_| invalid()))
            .collect::<WorldResult<Vec<f32>>>()?;
        match components[..] {
            [r, g, b, a] if components.iter().all(|c| c.is_finite()) => Ok(Self::new(r, g, b, a)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

/// Visual properties applied to a model's visual geometry
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient colour
    pub ambient: Color,
    /// Diffuse colour
    pub diffuse: Color,
}

impl Material {
    /// Same colour for ambient and diffuse
    pub const fn uniform(color: Color) -> Self {
        Self { ambient: color, diffuse: color }
    }

    /// The `<material>` element
    pub fn to_element(&self) -> Element {
        Element::new("material")
            .child(Element::leaf("ambient", self.ambient))
            .child(Element::leaf("diffuse", self.diffuse))
    }
}

/// A solid placed in the world
///
/// Shapes are immutable once built; the builder methods consume and return
/// the shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    name: String,
    kind: ShapeKind,
    pose: Pose,
    material: Material,
}

impl Shape {
    /// Create a shape at the origin with a generated name
    ///
    /// Fails with `MalformedGeometry` if the dimensions cannot describe a solid.
    pub fn new(kind: ShapeKind, names: &mut NameGenerator) -> WorldResult<Self> {
        kind.validate()?;
        let name = names.next_name(kind.kind_name());
        Ok(Self::unchecked(name, kind))
    }

    /// Create a shape with an explicit name
    pub fn named(name: impl Into<String>, kind: ShapeKind) -> WorldResult<Self> {
        kind.validate()?;
        Ok(Self::unchecked(name.into(), kind))
    }

    fn unchecked(name: String, kind: ShapeKind) -> Self {
        Self {
            name,
            kind,
            pose: Pose::IDENTITY,
            material: Material::uniform(Color::GRAY),
        }
    }

    /// Place the shape at a position
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.pose.position = Vec3::new(x, y, z);
        self
    }

    /// Set roll, pitch and yaw (radians)
    ///
    /// Planar shapes ignore orientation when rendered.
    pub fn with_orientation(mut self, roll: f64, pitch: f64, yaw: f64) -> Self {
        if self.kind.is_planar() {
            log::warn!("{} is planar; orientation will not be rendered", self.name);
        }
        self.pose.roll = roll;
        self.pose.pitch = pitch;
        self.pose.yaw = yaw;
        self
    }

    /// Replace the whole pose
    pub fn with_pose(mut self, pose: Pose) -> Self {
        if self.kind.is_planar() && pose.has_orientation() {
            log::warn!("{} is planar; orientation will not be rendered", self.name);
        }
        self.pose = pose;
        self
    }

    /// Use one colour for ambient and diffuse
    pub fn with_color(mut self, color: Color) -> Self {
        self.material = Material::uniform(color);
        self
    }

    /// Replace the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Model name, unique when generated
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shape variant and dimensions
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Pose as rendered; planar shapes drop their orientation
    pub fn pose(&self) -> Pose {
        if self.kind.is_planar() {
            self.pose.without_orientation()
        } else {
            self.pose
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// The geometry shared by the collision and visual elements
    pub fn geometry_element(&self) -> Element {
        self.kind.geometry_element(&self.name)
    }

    /// The full static `<model>` element
    ///
    /// Collision and visual use identical geometry; only the visual carries
    /// the material.
    pub fn to_element(&self) -> Element {
        let geometry = self.geometry_element();
        let collision = Element::new("collision")
            .attr("name", "collision")
            .child(geometry.clone());
        let visual = Element::new("visual")
            .attr("name", "visual")
            .child(geometry)
            .child(self.material.to_element());

        Element::new("model")
            .attr("name", &self.name)
            .child(Element::leaf("static", true))
            .child(Element::leaf("pose", self.pose()))
            .child(
                Element::new("link")
                    .attr("name", "link")
                    .child(collision)
                    .child(visual),
            )
    }

    /// The `<model>` element as indented markup
    pub fn to_sdf_fragment(&self) -> WorldResult<String> {
        self.to_element().to_xml_string()
    }

    /// Mesh asset for mesh-backed shapes
    pub fn mesh_asset(&self) -> Option<MeshAsset> {
        self.kind
            .mesh()
            .map(|mesh| MeshAsset::new(&self.name, mesh).with_material(self.material))
    }
}
