//! Indexed triangle meshes
//!
//! Meshes are pure geometry: a vertex list and triangles that index into it.
//! Colours and materials live on the shape that references the mesh.

use crate::Vec3;
use std::collections::HashMap;

/// A triangle defined by three vertex indices
///
/// Winding is counter-clockwise when seen from outside the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    /// Indices into the parent mesh's vertex array
    pub indices: [usize; 3],
}

impl Triangle {
    /// Create a new triangle with the given vertex indices
    #[inline]
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices }
    }

    /// The three directed edges of this triangle, in winding order
    #[inline]
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.indices;
        [(a, b), (b, c), (c, a)]
    }

    /// Same triangle with the winding reversed
    #[inline]
    pub fn flipped(&self) -> Self {
        let [a, b, c] = self.indices;
        Self::new([a, c, b])
    }
}

impl From<[usize; 3]> for Triangle {
    fn from(indices: [usize; 3]) -> Self {
        Self::new(indices)
    }
}

/// A triangulated surface
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriMesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Triangles indexing into `vertices`
    pub triangles: Vec<Triangle>,
}

impl TriMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertex positions and index triples
    pub fn from_parts(vertices: Vec<Vec3>, triangles: impl IntoIterator<Item = [usize; 3]>) -> Self {
        Self {
            vertices,
            triangles: triangles.into_iter().map(Triangle::new).collect(),
        }
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Index of the first triangle referencing a vertex out of range
    pub fn first_invalid_triangle(&self) -> Option<usize> {
        let count = self.vertices.len();
        self.triangles
            .iter()
            .position(|t| t.indices.iter().any(|&i| i >= count))
    }

    /// True when every triangle references existing vertices
    pub fn indices_in_range(&self) -> bool {
        self.first_invalid_triangle().is_none()
    }

    /// Check that the surface is closed
    ///
    /// Every undirected edge must be shared by exactly two triangles.
    pub fn is_closed(&self) -> bool {
        if self.triangles.is_empty() {
            return false;
        }
        let mut uses: HashMap<(usize, usize), u32> = HashMap::new();
        for triangle in &self.triangles {
            for (a, b) in triangle.edges() {
                *uses.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        uses.values().all(|&n| n == 2)
    }

    /// Check that neighbouring triangles agree on winding
    ///
    /// A consistently oriented surface never uses the same directed edge twice.
    pub fn is_consistently_oriented(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.triangles
            .iter()
            .flat_map(|t| t.edges())
            .all(|edge| seen.insert(edge))
    }

    /// Signed volume enclosed by the surface
    ///
    /// Positive when triangles wind counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|t| {
                let [a, b, c] = t.indices;
                self.vertices[a].dot(self.vertices[b].cross(self.vertices[c])) / 6.0
            })
            .sum()
    }

    /// Axis-aligned bounds as (min, max), or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(self.vertices.iter().fold((first, first), |(lo, hi), &v| {
            (lo.min_components(v), hi.max_components(v))
        }))
    }

    /// Scale every vertex component-wise
    pub fn scaled(mut self, scale: Vec3) -> Self {
        for v in &mut self.vertices {
            *v = v.component_mul(scale);
        }
        self
    }
}
