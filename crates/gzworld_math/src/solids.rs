//! Parametric solids without a native SDF primitive
//!
//! Each generator returns a closed, outward-wound [`TriMesh`] in local space.
//! Pyramids and cones stand on the XY plane with their apex on +Z; the
//! ellipsoid is centred at the origin. Dimensions are not validated here.

use crate::{TriMesh, Vec3};
use std::f64::consts::{PI, TAU};

/// Samples around the ellipsoid's Z axis
pub const ELLIPSOID_SLICES: usize = 32;
/// Samples from pole to pole of the ellipsoid
pub const ELLIPSOID_STACKS: usize = 16;
/// Sections used to approximate the cone's circular base
pub const CONE_SECTIONS: usize = 32;

/// Ellipsoid with per-axis radii
///
/// A latitude/longitude grid over the unit sphere, scaled by `(rx, ry, rz)`.
/// The poles are single vertices so the surface closes without seams.
pub fn ellipsoid(rx: f64, ry: f64, rz: f64) -> TriMesh {
    ellipsoid_with_resolution(rx, ry, rz, ELLIPSOID_SLICES, ELLIPSOID_STACKS)
}

/// Ellipsoid with an explicit grid resolution
///
/// `slices` is raised to at least 3 and `stacks` to at least 2.
pub fn ellipsoid_with_resolution(
    rx: f64,
    ry: f64,
    rz: f64,
    slices: usize,
    stacks: usize,
) -> TriMesh {
    let slices = slices.max(3);
    let stacks = stacks.max(2);
    let radii = Vec3::new(rx, ry, rz);
    let rings = stacks - 1;
    let mut vertices = Vec::with_capacity(2 + rings * slices);

    vertices.push(Vec3::Z.component_mul(radii));
    for j in 1..stacks {
        let phi = PI * j as f64 / stacks as f64;
        for i in 0..slices {
            let theta = TAU * i as f64 / slices as f64;
            let unit = Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
            vertices.push(unit.component_mul(radii));
        }
    }
    vertices.push((-Vec3::Z).component_mul(radii));

    let north = 0;
    let south = vertices.len() - 1;
    let ring = |j: usize, i: usize| 1 + j * slices + (i % slices);

    let mut triangles = Vec::with_capacity(2 * slices * rings);
    for i in 0..slices {
        triangles.push([north, ring(0, i), ring(0, i + 1)]);
    }
    // Each grid quad becomes two triangles sharing its upper-left to lower-right diagonal
    for j in 0..rings - 1 {
        for i in 0..slices {
            let (a0, a1) = (ring(j, i), ring(j, i + 1));
            let (b0, b1) = (ring(j + 1, i), ring(j + 1, i + 1));
            triangles.push([a0, b0, b1]);
            triangles.push([a0, b1, a1]);
        }
    }
    for i in 0..slices {
        triangles.push([south, ring(rings - 1, i + 1), ring(rings - 1, i)]);
    }

    TriMesh::from_parts(vertices, triangles)
}

/// Tetrahedron with a triangular base of `width` by `depth` and apex at `height`
pub fn tetrahedron(width: f64, depth: f64, height: f64) -> TriMesh {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let vertices = vec![
        Vec3::new(0.0, 0.0, height),
        Vec3::new(hw, hd, 0.0),
        Vec3::new(-hw, hd, 0.0),
        Vec3::new(0.0, -hd, 0.0),
    ];
    TriMesh::from_parts(vertices, [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]])
}

/// Pyramid over a `width` by `depth` rectangle with apex at `height`
pub fn square_pyramid(width: f64, depth: f64, height: f64) -> TriMesh {
    let (hw, hd) = (width / 2.0, depth / 2.0);
    let vertices = vec![
        Vec3::new(0.0, 0.0, height),
        Vec3::new(hw, hd, 0.0),
        Vec3::new(-hw, hd, 0.0),
        Vec3::new(-hw, -hd, 0.0),
        Vec3::new(hw, -hd, 0.0),
    ];
    TriMesh::from_parts(
        vertices,
        [
            [0, 1, 2],
            [0, 2, 3],
            [0, 3, 4],
            [0, 4, 1],
            [1, 3, 2],
            [1, 4, 3],
        ],
    )
}

/// Cone with a circular base of `radius` and apex at `height`
pub fn cone(radius: f64, height: f64) -> TriMesh {
    cone_with_sections(radius, height, CONE_SECTIONS)
}

/// Cone whose base is approximated by `sections` segments (raised to at least 3)
pub fn cone_with_sections(radius: f64, height: f64, sections: usize) -> TriMesh {
    let sections = sections.max(3);
    let mut vertices = Vec::with_capacity(sections + 2);
    vertices.push(Vec3::new(0.0, 0.0, height));
    vertices.push(Vec3::ZERO);
    for i in 0..sections {
        let theta = TAU * i as f64 / sections as f64;
        vertices.push(Vec3::new(radius * theta.cos(), radius * theta.sin(), 0.0));
    }

    let (apex, center) = (0, 1);
    let rim = |i: usize| 2 + (i % sections);
    let mut triangles = Vec::with_capacity(sections * 2);
    for i in 0..sections {
        triangles.push([rim(i), rim(i + 1), apex]);
        triangles.push([center, rim(i + 1), rim(i)]);
    }

    TriMesh::from_parts(vertices, triangles)
}
