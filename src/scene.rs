//! Scene: one light and an ordered list of models.

use crate::light::Light;
use crate::model::Model;

/// Everything the renderer draws in a frame.
///
/// Model order is the draw order before the per-model depth sort.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub light: Light,
    models: Vec<Model>,
}

impl Scene {
    pub fn new(light: Light) -> Self {
        Self {
            light,
            models: Vec::new(),
        }
    }

    /// Appends a model and returns its index.
    pub fn add_model(&mut self, model: Model) -> usize {
        self.models.push(model);
        self.models.len() - 1
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.add_model(model);
        self
    }

    pub fn clear_models(&mut self) {
        self.models.clear();
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    pub fn model(&self, index: usize) -> Option<&Model> {
        self.models.get(index)
    }

    pub fn model_mut(&mut self, index: usize) -> Option<&mut Model> {
        self.models.get_mut(index)
    }

    /// Finds the first model with the given name.
    pub fn find_model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.name() == name)
    }

    pub fn triangle_count(&self) -> usize {
        self.models.iter().map(Model::triangle_count).sum()
    }
}
