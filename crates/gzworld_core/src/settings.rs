//! World-wide environment settings
//!
//! Every field has a default matching a stock simulator world, so a partially
//! configured [`WorldSettings`] (from code, a template or a config file)
//! always renders a complete environment block.

use serde::{Serialize, Deserialize};
use gzworld_math::Vec3;

use crate::document::Element;
use crate::entity::Color;
use crate::pose::Pose;

/// Physics engine used by the simulator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsEngine {
    #[default]
    Ode,
    Bullet,
    Simbody,
    Dart,
}

impl PhysicsEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhysicsEngine::Ode => "ode",
            PhysicsEngine::Bullet => "bullet",
            PhysicsEngine::Simbody => "simbody",
            PhysicsEngine::Dart => "dart",
        }
    }
}

/// Atmosphere model
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AtmosphereType {
    #[default]
    Adiabatic,
    Constant,
    Irradiance,
}

impl AtmosphereType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtmosphereType::Adiabatic => "adiabatic",
            AtmosphereType::Constant => "constant",
            AtmosphereType::Irradiance => "irradiance",
        }
    }
}

/// Planetary surface used for spherical coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceModel {
    #[default]
    #[serde(rename = "EARTH_WGS84")]
    EarthWgs84,
    Mars,
    Moon,
    Custom,
}

impl SurfaceModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceModel::EarthWgs84 => "EARTH_WGS84",
            SurfaceModel::Mars => "MARS",
            SurfaceModel::Moon => "MOON",
            SurfaceModel::Custom => "CUSTOM",
        }
    }
}

/// Audio output device
///
/// Serialized as the device name; `"default"` selects the system device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AudioDevice {
    #[default]
    Default,
    Custom(String),
}

impl AudioDevice {
    pub fn as_str(&self) -> &str {
        match self {
            AudioDevice::Default => "default",
            AudioDevice::Custom(device) => device,
        }
    }
}

impl From<String> for AudioDevice {
    fn from(device: String) -> Self {
        if device == "default" {
            AudioDevice::Default
        } else {
            AudioDevice::Custom(device)
        }
    }
}

impl From<AudioDevice> for String {
    fn from(device: AudioDevice) -> Self {
        device.as_str().to_string()
    }
}

/// Light source type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightType {
    #[default]
    Directional,
    Point,
    Spot,
}

impl LightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightType::Directional => "directional",
            LightType::Point => "point",
            LightType::Spot => "spot",
        }
    }
}

/// Physics engine choice and step tuning
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Engine used to simulate the world
    pub engine: PhysicsEngine,
    /// Simulation step in seconds
    pub max_step_size: f64,
    /// Target ratio of simulated to wall-clock time
    pub real_time_factor: f64,
    /// Steps per wall-clock second
    pub real_time_update_rate: f64,
    /// Maximum contacts between two bodies
    pub max_contacts: u32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            engine: PhysicsEngine::Ode,
            max_step_size: 0.001,
            real_time_factor: 1.0,
            real_time_update_rate: 1000.0,
            max_contacts: 20,
        }
    }
}

impl Physics {
    pub fn to_element(&self) -> Element {
        Element::new("physics")
            .attr("name", "default_physics")
            .attr("default", 0)
            .attr("type", self.engine.as_str())
            .child(Element::leaf("max_step_size", self.max_step_size))
            .child(Element::leaf("real_time_factor", self.real_time_factor))
            .child(Element::leaf("real_time_update_rate", self.real_time_update_rate))
            .child(Element::leaf("max_contacts", self.max_contacts))
    }
}

/// Light falloff
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attenuation {
    pub range: f64,
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            range: 1000.0,
            constant: 0.9,
            linear: 0.01,
            quadratic: 0.001,
        }
    }
}

/// The world's light source
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LightType,
    pub cast_shadows: bool,
    pub pose: Pose,
    pub diffuse: Color,
    pub specular: Color,
    pub attenuation: Attenuation,
    /// Direction for directional and spot lights
    pub direction: Vec3,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            name: "sun".to_string(),
            kind: LightType::Directional,
            cast_shadows: true,
            pose: Pose::new(0.0, 0.0, 10.0, 0.0, 0.0, 0.0),
            diffuse: Color::new(0.8, 0.8, 0.8, 1.0),
            specular: Color::new(0.2, 0.2, 0.2, 1.0),
            attenuation: Attenuation::default(),
            direction: Vec3::new(-0.5, 0.1, -0.9),
        }
    }
}

impl Light {
    pub fn to_element(&self) -> Element {
        let attenuation = Element::new("attenuation")
            .child(Element::leaf("range", self.attenuation.range))
            .child(Element::leaf("constant", self.attenuation.constant))
            .child(Element::leaf("linear", self.attenuation.linear))
            .child(Element::leaf("quadratic", self.attenuation.quadratic));
        Element::new("light")
            .attr("name", &self.name)
            .attr("type", self.kind.as_str())
            .child(Element::leaf("cast_shadows", self.cast_shadows))
            .child(Element::leaf("pose", self.pose))
            .child(Element::leaf("diffuse", self.diffuse))
            .child(Element::leaf("specular", self.specular))
            .child(attenuation)
            .child(Element::leaf("direction", self.direction))
    }
}

/// Geographic reference of the world origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphericalCoordinates {
    pub surface_model: SurfaceModel,
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation: f64,
    pub heading_deg: f64,
}

impl SphericalCoordinates {
    pub fn to_element(&self) -> Element {
        Element::new("spherical_coordinates")
            .child(Element::leaf("surface_model", self.surface_model.as_str()))
            .child(Element::leaf("latitude_deg", self.latitude_deg))
            .child(Element::leaf("longitude_deg", self.longitude_deg))
            .child(Element::leaf("elevation", self.elevation))
            .child(Element::leaf("heading_deg", self.heading_deg))
    }
}

/// All world-level settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Gravity vector (m/s^2)
    pub gravity: Vec3,
    /// Magnetic field vector (tesla)
    pub magnetic_field: Vec3,
    /// Scene ambient light
    pub ambient_light: Color,
    /// Scene background colour
    pub background_color: Color,
    /// Whether the scene renders shadows
    pub shadows: bool,
    pub physics: Physics,
    pub light: Light,
    pub atmosphere: AtmosphereType,
    pub audio_device: AudioDevice,
    pub spherical_coordinates: SphericalCoordinates,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, 0.0, -9.8),
            magnetic_field: Vec3::new(5.5645e-6, 22.8758e-6, -42.3884e-6),
            ambient_light: Color::new(0.4, 0.4, 0.4, 1.0),
            background_color: Color::new(0.7, 0.7, 0.7, 1.0),
            shadows: true,
            physics: Physics::default(),
            light: Light::default(),
            atmosphere: AtmosphereType::Adiabatic,
            audio_device: AudioDevice::Default,
            spherical_coordinates: SphericalCoordinates::default(),
        }
    }
}

impl WorldSettings {
    /// The `<scene>` element
    pub fn scene_element(&self) -> Element {
        Element::new("scene")
            .child(Element::leaf("ambient", self.ambient_light))
            .child(Element::leaf("background", self.background_color))
            .child(Element::leaf("shadows", self.shadows))
    }

    /// Environment elements in document order
    ///
    /// Gravity, magnetic field, atmosphere, physics, scene, audio, wind and
    /// spherical coordinates.
    pub fn environment_elements(&self) -> Vec<Element> {
        vec![
            Element::leaf("gravity", self.gravity),
            Element::leaf("magnetic_field", self.magnetic_field),
            Element::new("atmosphere").attr("type", self.atmosphere.as_str()),
            self.physics.to_element(),
            self.scene_element(),
            Element::new("audio").child(Element::leaf("device", self.audio_device.as_str())),
            Element::new("wind"),
            self.spherical_coordinates.to_element(),
        ]
    }
}
