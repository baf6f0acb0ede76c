//! Core types for generating simulator worlds
//!
//! This crate provides everything needed to describe a static world and
//! write it out as an SDF document:
//!
//! - [`ShapeKind`] - Shape variants and their dimensions
//! - [`Shape`] - A named, posed, coloured shape
//! - [`Pose`], [`Color`], [`Material`] - Placement and appearance
//! - [`NameGenerator`] - Unique `<Kind>_<n>` model names
//! - [`World`] - Ordered shapes plus [`WorldSettings`]
//! - [`Element`], [`Document`] - Structured XML tree and its writer
//! - [`ModelLibrary`], [`MeshAsset`] - Mesh model packages for non-primitive shapes
//! - [`Exporter`] - Saves a world to disk
//! - [`WorldTemplate`] - Loadable/saveable RON world description
//! - [`WorldValidator`] - Static checks over worlds and templates

mod error;
mod pose;
mod naming;
mod shapes;
mod entity;
mod settings;
mod world;
mod scene;
mod scene_validator;
mod collada;
pub mod document;
pub mod assets;
pub mod export;

/// SDF version written to every document
pub const SDF_VERSION: &str = "1.6";

pub use error::{WorldError, WorldResult};
pub use pose::Pose;
pub use naming::NameGenerator;
pub use shapes::{ShapeKind, PLANAR_THICKNESS};
pub use entity::{Color, Material, Shape};
pub use settings::{
    AtmosphereType, Attenuation, AudioDevice, Light, LightType, Physics, PhysicsEngine,
    SphericalCoordinates, SurfaceModel, WorldSettings,
};
pub use world::World;
pub use scene::{ShapeTemplate, WorldTemplate};
pub use scene_validator::{ValidationError, WorldValidator};
pub use collada::collada_document;
pub use document::{Document, Element, Node};
pub use assets::{Author, MeshAsset, ModelLibrary};
pub use export::Exporter;

// Re-export geometry types for convenience
pub use gzworld_math::{solids, TriMesh, Triangle, Vec3};
