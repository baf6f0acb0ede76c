//! Mesh model packages
//!
//! Shapes without a native SDF primitive are exported as a self-contained
//! model under a model root directory:
//!
//! ```text
//! <root>/<name>/meshes/<name>.dae   triangulated surface (COLLADA)
//! <root>/<name>/model.config        manifest: name, version, author, description
//! <root>/<name>/model.sdf           static model referencing the mesh
//! ```
//!
//! Worlds refer to the mesh as `model://<name>/meshes/<name>.dae`, so the
//! model root must be on the simulator's model search path.

use serde::{Serialize, Deserialize};
use std::fs;
use std::path::{Path, PathBuf};

use gzworld_math::{solids, TriMesh, Vec3};

use crate::collada::collada_document;
use crate::document::{Document, Element};
use crate::entity::{Color, Material};
use crate::error::WorldResult;
use crate::export::write_atomic;
use crate::SDF_VERSION;

/// Directory name used for model roots when none is configured
pub const DEFAULT_MODEL_ROOT: &str = "gazebo_models";

/// Model-scoped URI of a model's mesh file
pub fn mesh_uri(model_name: &str) -> String {
    format!("model://{0}/meshes/{0}.dae", model_name)
}

/// Author recorded in model manifests
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Default for Author {
    fn default() -> Self {
        Self {
            name: "gzworld".to_string(),
            email: "gzworld@localhost".to_string(),
        }
    }
}

/// A named mesh ready to be exported as a model package
#[derive(Clone, Debug, PartialEq)]
pub struct MeshAsset {
    name: String,
    mesh: TriMesh,
    material: Material,
    scale: Vec3,
}

impl MeshAsset {
    /// Create an asset with unit scale and the default grey material
    pub fn new(name: impl Into<String>, mesh: TriMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            material: Material::default(),
            scale: Vec3::ONE,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Scale applied by the simulator when loading the mesh
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// File name of the mesh inside the package's `meshes` directory
    pub fn mesh_file_name(&self) -> String {
        format!("{}.dae", self.name)
    }

    /// `model.config` contents
    pub fn manifest_document(&self, author: &Author) -> Document {
        Document::new(
            Element::new("model")
                .child(Element::leaf("name", &self.name))
                .child(Element::leaf("version", "1.0"))
                .child(Element::leaf("sdf", "model.sdf").attr("version", SDF_VERSION))
                .child(
                    Element::new("author")
                        .child(Element::leaf("name", &author.name))
                        .child(Element::leaf("email", &author.email)),
                )
                .child(Element::leaf("description", format!("{} model", self.name))),
        )
    }

    /// `model.sdf` contents: a static model whose visual and collision share the mesh
    pub fn model_document(&self) -> Document {
        let geometry = Element::new("geometry").child(
            Element::new("mesh")
                .child(Element::leaf("uri", mesh_uri(&self.name)))
                .child(Element::leaf("scale", self.scale)),
        );
        let link = Element::new("link")
            .attr("name", "link")
            .child(
                Element::new("visual")
                    .attr("name", "visual")
                    .child(geometry.clone())
                    .child(self.material.to_element()),
            )
            .child(
                Element::new("collision")
                    .attr("name", "collision")
                    .child(geometry),
            );
        Document::new(
            Element::new("sdf").attr("version", SDF_VERSION).child(
                Element::new("model")
                    .attr("name", &self.name)
                    .child(Element::leaf("static", true))
                    .child(link),
            ),
        )
    }
}

/// A directory of exported mesh models
#[derive(Clone, Debug)]
pub struct ModelLibrary {
    root: PathBuf,
    author: Author,
}

impl ModelLibrary {
    /// Library rooted at `root`; directories are created on export
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            author: Author::default(),
        }
    }

    /// Set the author written to manifests
    pub fn with_author(mut self, author: Author) -> Self {
        self.author = author;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding one model's package
    pub fn model_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Path of a model's mesh file
    pub fn mesh_path(&self, name: &str) -> PathBuf {
        self.model_dir(name).join("meshes").join(format!("{}.dae", name))
    }

    /// Write the three package files for an asset, returning its mesh URI
    ///
    /// Existing files are overwritten. IO failures are returned, not retried.
    pub fn export(&self, asset: &MeshAsset) -> WorldResult<String> {
        let model_dir = self.model_dir(&asset.name);
        let mesh_dir = model_dir.join("meshes");
        fs::create_dir_all(&mesh_dir)?;

        let collada = collada_document(&asset.name, &asset.mesh, &asset.material);
        write_atomic(&mesh_dir.join(asset.mesh_file_name()), &collada.to_xml_string()?)?;
        write_atomic(
            &model_dir.join("model.config"),
            &asset.manifest_document(&self.author).to_xml_string()?,
        )?;
        write_atomic(&model_dir.join("model.sdf"), &asset.model_document().to_xml_string()?)?;

        log::debug!(
            "Exported mesh model '{}' ({} vertices, {} triangles) to {}",
            asset.name,
            asset.mesh.vertex_count(),
            asset.mesh.triangle_count(),
            model_dir.display()
        );
        Ok(mesh_uri(&asset.name))
    }

    fn create(&self, name: &str, mesh: TriMesh, scale: Vec3, color: Color) -> WorldResult<String> {
        let asset = MeshAsset::new(name, mesh)
            .with_scale(scale)
            .with_material(Material::uniform(color));
        self.export(&asset)
    }

    /// Export an ellipsoid model with per-axis radii
    ///
    /// `scale` is written to the model's `<mesh>` element; the `.dae`
    /// keeps the unscaled vertices.
    pub fn create_ellipsoid(
        &self,
        name: &str,
        rx: f64,
        ry: f64,
        rz: f64,
        scale: Vec3,
        color: Color,
    ) -> WorldResult<String> {
        self.create(name, solids::ellipsoid(rx, ry, rz), scale, color)
    }

    /// Export a tetrahedron model
    pub fn create_tetrahedron(
        &self,
        name: &str,
        width: f64,
        depth: f64,
        height: f64,
        scale: Vec3,
        color: Color,
    ) -> WorldResult<String> {
        self.create(name, solids::tetrahedron(width, depth, height), scale, color)
    }

    /// Export a square pyramid model
    pub fn create_square_pyramid(
        &self,
        name: &str,
        width: f64,
        depth: f64,
        height: f64,
        scale: Vec3,
        color: Color,
    ) -> WorldResult<String> {
        self.create(name, solids::square_pyramid(width, depth, height), scale, color)
    }

    /// Export a cone model
    pub fn create_cone(
        &self,
        name: &str,
        radius: f64,
        height: f64,
        scale: Vec3,
        color: Color,
    ) -> WorldResult<String> {
        self.create(name, solids::cone(radius, height), scale, color)
    }
}
