//! COLLADA 1.4.1 mesh documents
//!
//! Just enough of the format for a simulator to load a single coloured,
//! triangulated mesh: one geometry, one phong material and a scene node
//! instancing them. Coordinates are metres with Z up.

use gzworld_math::TriMesh;

use crate::document::{Document, Element};
use crate::entity::Material;

const COLLADA_NAMESPACE: &str = "http://www.collada.org/2005/11/COLLADASchema";
const COLLADA_VERSION: &str = "1.4.1";
/// Material symbol bound between the triangles and the scene node
const MATERIAL_SYMBOL: &str = "material0";

/// Build the COLLADA document for a mesh
pub fn collada_document(name: &str, mesh: &TriMesh, material: &Material) -> Document {
    let effect_id = format!("{}-effect", name);
    let material_id = format!("{}-material", name);
    let geometry_id = format!("{}-mesh", name);

    let root = Element::new("COLLADA")
        .attr("xmlns", COLLADA_NAMESPACE)
        .attr("version", COLLADA_VERSION)
        .child(asset_element())
        .child(Element::new("library_effects").child(effect_element(&effect_id, material)))
        .child(
            Element::new("library_materials").child(
                Element::new("material")
                    .attr("id", &material_id)
                    .attr("name", &material_id)
                    .child(Element::new("instance_effect").attr("url", format!("#{}", effect_id))),
            ),
        )
        .child(Element::new("library_geometries").child(geometry_element(name, &geometry_id, mesh)))
        .child(
            Element::new("library_visual_scenes").child(
                Element::new("visual_scene")
                    .attr("id", "Scene")
                    .attr("name", "Scene")
                    .child(node_element(name, &geometry_id, &material_id)),
            ),
        )
        .child(
            Element::new("scene")
                .child(Element::new("instance_visual_scene").attr("url", "#Scene")),
        );

    Document::new(root)
}

fn asset_element() -> Element {
    Element::new("asset")
        .child(
            Element::new("contributor")
                .child(Element::leaf("authoring_tool", env!("CARGO_PKG_NAME"))),
        )
        .child(Element::new("unit").attr("name", "meter").attr("meter", 1))
        .child(Element::leaf("up_axis", "Z_UP"))
}

fn effect_element(effect_id: &str, material: &Material) -> Element {
    let phong = Element::new("phong")
        .child(Element::new("ambient").child(Element::leaf("color", material.ambient)))
        .child(Element::new("diffuse").child(Element::leaf("color", material.diffuse)));
    Element::new("effect").attr("id", effect_id).child(
        Element::new("profile_COMMON")
            .child(Element::new("technique").attr("sid", "common").child(phong)),
    )
}

fn geometry_element(name: &str, geometry_id: &str, mesh: &TriMesh) -> Element {
    let positions_id = format!("{}-positions", name);
    let array_id = format!("{}-positions-array", name);
    let vertices_id = format!("{}-vertices", name);

    let coordinates = join(mesh.vertices.iter().flat_map(|v| v.to_array()));
    let indices = join(mesh.triangles.iter().flat_map(|t| t.indices));

    let accessor = Element::new("accessor")
        .attr("source", format!("#{}", array_id))
        .attr("count", mesh.vertex_count())
        .attr("stride", 3)
        .children(
            ["X", "Y", "Z"]
                .into_iter()
                .map(|axis| Element::new("param").attr("name", axis).attr("type", "float")),
        );

    let source = Element::new("source")
        .attr("id", &positions_id)
        .child(
            Element::new("float_array")
                .attr("id", &array_id)
                .attr("count", mesh.vertex_count() * 3)
                .text(coordinates),
        )
        .child(Element::new("technique_common").child(accessor));

    let vertices = Element::new("vertices").attr("id", &vertices_id).child(
        Element::new("input")
            .attr("semantic", "POSITION")
            .attr("source", format!("#{}", positions_id)),
    );

    let triangles = Element::new("triangles")
        .attr("material", MATERIAL_SYMBOL)
        .attr("count", mesh.triangle_count())
        .child(
            Element::new("input")
                .attr("semantic", "VERTEX")
                .attr("source", format!("#{}", vertices_id))
                .attr("offset", 0),
        )
        .child(Element::leaf("p", indices));

    Element::new("geometry")
        .attr("id", geometry_id)
        .attr("name", name)
        .child(
            Element::new("mesh")
                .child(source)
                .child(vertices)
                .child(triangles),
        )
}

fn node_element(name: &str, geometry_id: &str, material_id: &str) -> Element {
    let bind = Element::new("bind_material").child(
        Element::new("technique_common").child(
            Element::new("instance_material")
                .attr("symbol", MATERIAL_SYMBOL)
                .attr("target", format!("#{}", material_id)),
        ),
    );
    Element::new("node").attr("id", name).attr("name", name).child(
        Element::new("instance_geometry")
            .attr("url", format!("#{}", geometry_id))
            .child(bind),
    )
}

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(" ")
}
