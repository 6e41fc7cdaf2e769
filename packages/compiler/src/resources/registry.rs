//! In-memory resource registry

use super::{ResourceDescriptor, ResourceKind, ResourceResolver};
use crate::error::{CompilerError, Result};
use indexmap::IndexMap;
use lazy_static::lazy_static;

lazy_static! {
    /// Template controllers every registry can be seeded with
    static ref BUILTIN_CONTROLLERS: Vec<ResourceDescriptor> = ["if", "else", "repeat", "with"]
        .iter()
        .map(|name| ResourceDescriptor::template_controller(*name))
        .collect();
}

/// Name-keyed element and attribute tables
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    elements: IndexMap<String, ResourceDescriptor>,
    attributes: IndexMap<String, ResourceDescriptor>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `if`, `else`, `repeat` and `with`
    pub fn with_builtins() -> Self {
        BUILTIN_CONTROLLERS
            .iter()
            .cloned()
            .fold(Self::new(), |registry, controller| registry.with(controller))
    }

    /// Builder form of [`ResourceRegistry::register`]
    pub fn with(mut self, descriptor: ResourceDescriptor) -> Self {
        self.register(descriptor);
        self
    }

    /// Later registrations under the same name replace earlier ones.
    pub fn register(&mut self, descriptor: ResourceDescriptor) -> &mut Self {
        let descriptor = descriptor.normalize();
        let table = match descriptor.kind {
            ResourceKind::Element => &mut self.elements,
            ResourceKind::Attribute => &mut self.attributes,
        };
        table.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Built-in controllers plus a JSON array of descriptors
    pub fn from_json(json: &str) -> Result<Self> {
        let descriptors: Vec<ResourceDescriptor> = serde_json::from_str(json)
            .map_err(|e| CompilerError::compile(format!("Invalid resource definitions: {}", e)))?;
        Ok(descriptors
            .into_iter()
            .fold(Self::with_builtins(), |registry, descriptor| registry.with(descriptor)))
    }

    pub fn len(&self) -> usize {
        self.elements.len() + self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResourceResolver for ResourceRegistry {
    fn find_element(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.elements.get(name)
    }

    fn find_attribute(&self, name: &str) -> Option<&ResourceDescriptor> {
        self.attributes.get(name)
    }
}
