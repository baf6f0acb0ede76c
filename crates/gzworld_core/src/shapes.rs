//! Shape variants and their geometry
//!
//! [`ShapeKind`] is the closed set of solids a world can contain. Each variant
//! stores its dimensions and knows how to describe itself as an SDF
//! `<geometry>` element. Variants without a native SDF primitive are backed by
//! a triangle mesh written as a model asset; their geometry refers to that
//! asset by URI.
//!
//! Planar variants (polygon, circle, rectangle) are given a small fixed
//! thickness so they can stand in a 3D scene.

use serde::{Serialize, Deserialize};
use gzworld_math::{solids, TriMesh, Vec3};

use crate::assets::mesh_uri;
use crate::document::Element;
use crate::error::{WorldError, WorldResult};

/// Thickness given to planar shapes placed in the world
pub const PLANAR_THICKNESS: f64 = 0.1;

fn planar_thickness() -> f64 {
    PLANAR_THICKNESS
}

/// Serializable shape variant with its dimensions
///
/// Dimensions are in metres. Solids stand in local space; the owning
/// [`Shape`](crate::Shape) pose places them in the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeKind {
    /// Axis-aligned box
    Box {
        /// Extent along X
        width: f64,
        /// Extent along Y
        height: f64,
        /// Extent along Z
        depth: f64,
    },
    /// Sphere centred on the pose
    Sphere {
        radius: f64,
    },
    /// Cylinder along Z, centred on the pose
    Cylinder {
        radius: f64,
        length: f64,
    },
    /// Ellipsoid with per-axis radii (mesh-backed)
    Ellipsoid {
        rx: f64,
        ry: f64,
        rz: f64,
    },
    /// Tetrahedron on a triangular base (mesh-backed)
    Tetrahedron {
        width: f64,
        depth: f64,
        height: f64,
    },
    /// Pyramid on a rectangular base (mesh-backed)
    SquarePyramid {
        width: f64,
        depth: f64,
        height: f64,
    },
    /// Cone on a circular base (mesh-backed)
    Cone {
        radius: f64,
        height: f64,
    },
    /// Closed outline in the XY plane, extruded along Z
    Polygon {
        /// Outline vertices as (x, y)
        points: Vec<[f64; 2]>,
        /// Extrusion height
        #[serde(default = "planar_thickness")]
        height: f64,
    },
    /// Disc in the XY plane
    Circle {
        radius: f64,
        /// Thickness along Z
        #[serde(default = "planar_thickness")]
        length: f64,
    },
    /// Rectangle in the XY plane
    Rectangle {
        /// Extent along X
        width: f64,
        /// Extent along Y
        height: f64,
        /// Thickness along Z
        #[serde(default = "planar_thickness")]
        thickness: f64,
    },
}

impl ShapeKind {
    /// Create a box
    pub fn cuboid(width: f64, height: f64, depth: f64) -> Self {
        ShapeKind::Box { width, height, depth }
    }

    /// Create a sphere
    pub fn sphere(radius: f64) -> Self {
        ShapeKind::Sphere { radius }
    }

    /// Create a cylinder
    pub fn cylinder(radius: f64, length: f64) -> Self {
        ShapeKind::Cylinder { radius, length }
    }

    /// Create an ellipsoid
    pub fn ellipsoid(rx: f64, ry: f64, rz: f64) -> Self {
        ShapeKind::Ellipsoid { rx, ry, rz }
    }

    /// Create a tetrahedron
    pub fn tetrahedron(width: f64, depth: f64, height: f64) -> Self {
        ShapeKind::Tetrahedron { width, depth, height }
    }

    /// Create a square pyramid
    pub fn square_pyramid(width: f64, depth: f64, height: f64) -> Self {
        ShapeKind::SquarePyramid { width, depth, height }
    }

    /// Create a cone
    pub fn cone(radius: f64, height: f64) -> Self {
        ShapeKind::Cone { radius, height }
    }

    /// Create a polygon with the default thickness
    pub fn polygon(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        ShapeKind::Polygon {
            points: points.into_iter().map(|(x, y)| [x, y]).collect(),
            height: PLANAR_THICKNESS,
        }
    }

    /// Create a circle with the default thickness
    pub fn circle(radius: f64) -> Self {
        ShapeKind::Circle { radius, length: PLANAR_THICKNESS }
    }

    /// Create a rectangle with the default thickness
    pub fn rectangle(width: f64, height: f64) -> Self {
        ShapeKind::Rectangle { width, height, thickness: PLANAR_THICKNESS }
    }

    /// Kind name used as the prefix of generated model names
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeKind::Box { .. } => "Box",
            ShapeKind::Sphere { .. } => "Sphere",
            ShapeKind::Cylinder { .. } => "Cylinder",
            ShapeKind::Ellipsoid { .. } => "Ellipsoid",
            ShapeKind::Tetrahedron { .. } => "Tetrahedron",
            ShapeKind::SquarePyramid { .. } => "SquarePyramid",
            ShapeKind::Cone { .. } => "Cone",
            ShapeKind::Polygon { .. } => "Polygon",
            ShapeKind::Circle { .. } => "Circle",
            ShapeKind::Rectangle { .. } => "Rectangle",
        }
    }

    /// Planar shapes carry a position only; orientation is not rendered
    pub fn is_planar(&self) -> bool {
        matches!(
            self,
            ShapeKind::Polygon { .. } | ShapeKind::Circle { .. } | ShapeKind::Rectangle { .. }
        )
    }

    /// Shapes whose geometry is an external mesh asset
    pub fn is_mesh_backed(&self) -> bool {
        matches!(
            self,
            ShapeKind::Ellipsoid { .. }
                | ShapeKind::Tetrahedron { .. }
                | ShapeKind::SquarePyramid { .. }
                | ShapeKind::Cone { .. }
        )
    }

    /// Reject dimensions that cannot describe a solid
    ///
    /// Every dimension must be finite and strictly positive; polygons need at
    /// least three finite points.
    pub fn validate(&self) -> WorldResult<()> {
        let kind = self.kind_name();
        match self {
            ShapeKind::Box { width, height, depth } => {
                positive(kind, "width", *width)?;
                positive(kind, "height", *height)?;
                positive(kind, "depth", *depth)
            }
            ShapeKind::Sphere { radius } => positive(kind, "radius", *radius),
            ShapeKind::Cylinder { radius, length } | ShapeKind::Circle { radius, length } => {
                positive(kind, "radius", *radius)?;
                positive(kind, "length", *length)
            }
            ShapeKind::Ellipsoid { rx, ry, rz } => {
                positive(kind, "rx", *rx)?;
                positive(kind, "ry", *ry)?;
                positive(kind, "rz", *rz)
            }
            ShapeKind::Tetrahedron { width, depth, height }
            | ShapeKind::SquarePyramid { width, depth, height } => {
                positive(kind, "width", *width)?;
                positive(kind, "depth", *depth)?;
                positive(kind, "height", *height)
            }
            ShapeKind::Cone { radius, height } => {
                positive(kind, "radius", *radius)?;
                positive(kind, "height", *height)
            }
            ShapeKind::Polygon { points, height } => {
                if points.len() < 3 {
                    return Err(WorldError::malformed(
                        kind,
                        format!("needs at least 3 points, got {}", points.len()),
                    ));
                }
                if let Some(p) = points.iter().find(|p| !p[0].is_finite() || !p[1].is_finite()) {
                    return Err(WorldError::malformed(
                        kind,
                        format!("point ({}, {}) is not finite", p[0], p[1]),
                    ));
                }
                positive(kind, "height", *height)
            }
            ShapeKind::Rectangle { width, height, thickness } => {
                positive(kind, "width", *width)?;
                positive(kind, "height", *height)?;
                positive(kind, "thickness", *thickness)
            }
        }
    }

    /// Triangle mesh for mesh-backed shapes, `None` for native primitives
    pub fn mesh(&self) -> Option<TriMesh> {
        match self {
            ShapeKind::Ellipsoid { rx, ry, rz } => Some(solids::ellipsoid(*rx, *ry, *rz)),
            ShapeKind::Tetrahedron { width, depth, height } => {
                Some(solids::tetrahedron(*width, *depth, *height))
            }
            ShapeKind::SquarePyramid { width, depth, height } => {
                Some(solids::square_pyramid(*width, *depth, *height))
            }
            ShapeKind::Cone { radius, height } => Some(solids::cone(*radius, *height)),
            _ => None,
        }
    }

    /// The `<geometry>` element for this shape
    ///
    /// `model_name` is only used by mesh-backed shapes, whose geometry points
    /// at the asset exported under that name.
    pub fn geometry_element(&self, model_name: &str) -> Element {
        let inner = match self {
            ShapeKind::Box { width, height, depth } => Element::new("box")
                .child(Element::leaf("size", Vec3::new(*width, *height, *depth))),
            ShapeKind::Sphere { radius } => {
                Element::new("sphere").child(Element::leaf("radius", radius))
            }
            ShapeKind::Cylinder { radius, length } | ShapeKind::Circle { radius, length } => {
                Element::new("cylinder")
                    .child(Element::leaf("radius", radius))
                    .child(Element::leaf("length", length))
            }
            ShapeKind::Rectangle { width, height, thickness } => Element::new("box")
                .child(Element::leaf("size", Vec3::new(*width, *height, *thickness))),
            ShapeKind::Polygon { points, height } => Element::new("polyline")
                .children(
                    points
                        .iter()
                        .map(|[x, y]| Element::leaf("point", format!("{} {}", x, y))),
                )
                .child(Element::leaf("height", height)),
            ShapeKind::Ellipsoid { .. }
            | ShapeKind::Tetrahedron { .. }
            | ShapeKind::SquarePyramid { .. }
            | ShapeKind::Cone { .. } => Element::new("mesh")
                .child(Element::leaf("uri", mesh_uri(model_name)))
                .child(Element::leaf("scale", Vec3::ONE)),
        };
        Element::new("geometry").child(inner)
    }
}

fn positive(shape: &'static str, field: &str, value: f64) -> WorldResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WorldError::malformed(
            shape,
            format!("{} must be a positive finite number, got {}", field, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_geometry() {
        let geometry = ShapeKind::cuboid(2.0, 1.0, 4.0).geometry_element("Box_0");
        assert_eq!(geometry.find_path("box/size").unwrap().text_content(), "2 1 4");
    }

    #[test]
    fn test_sphere_geometry() {
        let geometry = ShapeKind::sphere(1.0).geometry_element("Sphere_0");
        assert_eq!(geometry.find_path("sphere/radius").unwrap().text_content(), "1");
    }

    #[test]
    fn test_cylinder_geometry() {
        let geometry = ShapeKind::cylinder(0.3, 1.0).geometry_element("Cylinder_0");
        assert_eq!(geometry.find_path("cylinder/radius").unwrap().text_content(), "0.3");
        assert_eq!(geometry.find_path("cylinder/length").unwrap().text_content(), "1");
    }

    #[test]
    fn test_planar_shapes_use_thin_primitives() {
        let circle = ShapeKind::circle(5.0).geometry_element("Circle_0");
        assert_eq!(circle.find_path("cylinder/length").unwrap().text_content(), "0.1");

        let rectangle = ShapeKind::rectangle(4.0, 2.0).geometry_element("Rectangle_0");
        assert_eq!(rectangle.find_path("box/size").unwrap().text_content(), "4 2 0.1");
    }

    #[test]
    fn test_polygon_geometry() {
        let square = ShapeKind::polygon([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let geometry = square.geometry_element("Polygon_0");
        let polyline = geometry.find("polyline").unwrap();
        let points: Vec<String> = polyline.find_all("point").map(|p| p.text_content()).collect();
        assert_eq!(points, vec!["0 0", "1 0", "1 1", "0 1"]);
        assert_eq!(polyline.find("height").unwrap().text_content(), "0.1");
    }

    #[test]
    fn test_mesh_backed_geometry_references_asset() {
        let geometry = ShapeKind::cone(1.0, 1.0).geometry_element("Cone_7");
        assert_eq!(
            geometry.find_path("mesh/uri").unwrap().text_content(),
            "model://Cone_7/meshes/Cone_7.dae"
        );
        assert_eq!(geometry.find_path("mesh/scale").unwrap().text_content(), "1 1 1");
    }

    #[test]
    fn test_mesh_only_for_mesh_backed() {
        assert!(ShapeKind::sphere(1.0).mesh().is_none());
        assert!(!ShapeKind::sphere(1.0).is_mesh_backed());
        for kind in [
            ShapeKind::ellipsoid(1.0, 2.0, 3.0),
            ShapeKind::tetrahedron(1.0, 1.0, 1.0),
            ShapeKind::square_pyramid(1.0, 1.0, 1.0),
            ShapeKind::cone(1.0, 1.0),
        ] {
            assert!(kind.is_mesh_backed());
            let mesh = kind.mesh().unwrap();
            assert!(mesh.indices_in_range());
            assert!(mesh.is_closed());
        }
    }

    #[test]
    fn test_kind_names_and_planarity() {
        assert_eq!(ShapeKind::cuboid(1.0, 1.0, 1.0).kind_name(), "Box");
        assert_eq!(ShapeKind::square_pyramid(1.0, 1.0, 1.0).kind_name(), "SquarePyramid");
        assert!(ShapeKind::circle(1.0).is_planar());
        assert!(!ShapeKind::cylinder(1.0, 1.0).is_planar());
    }

    #[test]
    fn test_validate_accepts_positive_dimensions() {
        assert!(ShapeKind::cuboid(2.0, 1.0, 4.0).validate().is_ok());
        assert!(ShapeKind::polygon([(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        assert!(matches!(
            ShapeKind::sphere(-1.0).validate(),
            Err(WorldError::MalformedGeometry { shape: "Sphere", .. })
        ));
        assert!(ShapeKind::cuboid(1.0, 0.0, 1.0).validate().is_err());
        assert!(ShapeKind::cone(f64::NAN, 1.0).validate().is_err());
        assert!(ShapeKind::polygon([(0.0, 0.0), (1.0, 0.0)]).validate().is_err());
        assert!(ShapeKind::polygon([(0.0, 0.0), (1.0, f64::INFINITY), (0.0, 1.0)])
            .validate()
            .is_err());
    }

    #[test]
    fn test_ron_round_trip_uses_type_tag() {
        let kind = ShapeKind::cylinder(0.3, 1.0);
        let serialized = ron::to_string(&kind).unwrap();
        assert!(serialized.contains("Cylinder"));
        let back: ShapeKind = ron::from_str(&serialized).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_planar_thickness_defaults_when_omitted() {
        let circle: ShapeKind = ron::from_str(r#"ShapeKind(type: "Circle", radius: 5.0)"#).unwrap();
        assert_eq!(circle, ShapeKind::circle(5.0));
    }
}
