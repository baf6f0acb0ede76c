//! Geometry library for gzworld
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Triangle`] - A triangle defined by vertex indices
//! - [`TriMesh`] - An indexed triangle surface
//!
//! ## Solids
//!
//! The [`solids`] module builds closed meshes for shapes SDF cannot describe
//! with a native primitive: ellipsoids, tetrahedra, square pyramids and cones.

mod vec3;
pub mod mesh;
pub mod solids;

pub use vec3::Vec3;
pub use mesh::{Triangle, TriMesh};
