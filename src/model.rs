//! Renderable model: a triangle list with a transform and a material.

use std::path::Path;

use crate::error::LoadError;
use crate::material::Material;
use crate::mesh;
use crate::transform::Transform;
use crate::triangle::Triangle;

/// A triangle list placed in the world.
///
/// The renderer only reads `triangles`; every pipeline stage works on copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    triangles: Vec<Triangle>,
    transform: Transform,
    material: Material,
}

impl Model {
    /// Create a model from triangles with the default transform and material.
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
            transform: Transform::default(),
            material: Material::default(),
        }
    }

    /// Load a model from an OBJ file.
    ///
    /// All objects/groups in the file are merged into one triangle list.
    pub fn from_obj(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Ok(Self::new(name, mesh::load_obj(path)?))
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ============ Geometry ============

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangles_mut(&mut self) -> &mut Vec<Triangle> {
        &mut self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    // ============ Transform Accessors ============

    /// Get a reference to the model's world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get a mutable reference to the model's world transform.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    // ============ Material ============

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }
}
