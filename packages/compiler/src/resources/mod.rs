//! Resources
//!
//! Descriptors for custom elements and custom attributes, and the lookup
//! seam the compiler resolves them through.

mod binding_mode;
mod registry;

pub use binding_mode::BindingMode;
pub use registry::ResourceRegistry;

use crate::util::{camel_case_to_kebab_case, dash_case_to_camel_case};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Element,
    Attribute,
}

/// One bindable property of a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindableDescriptor {
    pub property: String,
    /// Markup name, the kebab-case form of `property`
    #[serde(default)]
    pub attribute: String,
    #[serde(default)]
    pub mode: BindingMode,
}

impl BindableDescriptor {
    pub fn new(property: impl Into<String>) -> Self {
        let property = property.into();
        BindableDescriptor {
            attribute: camel_case_to_kebab_case(&property),
            property,
            mode: BindingMode::DEFAULT,
        }
    }

    pub fn with_mode(mut self, mode: BindingMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A custom element or custom attribute as seen by the compiler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: String,
    pub kind: ResourceKind,
    /// Keyed by property name, in declaration order
    #[serde(default)]
    pub bindables: IndexMap<String, BindableDescriptor>,
    #[serde(default = "default_resource_mode")]
    pub default_binding_mode: BindingMode,
    #[serde(default)]
    pub is_template_controller: bool,
    #[serde(default)]
    pub has_dynamic_options: bool,
}

fn default_resource_mode() -> BindingMode {
    BindingMode::TO_VIEW
}

impl ResourceDescriptor {
    fn new(name: impl Into<String>, kind: ResourceKind) -> Self {
        ResourceDescriptor {
            name: name.into(),
            kind,
            bindables: IndexMap::new(),
            default_binding_mode: default_resource_mode(),
            is_template_controller: false,
            has_dynamic_options: false,
        }
    }

    pub fn element(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::Element)
    }

    pub fn attribute(name: impl Into<String>) -> Self {
        Self::new(name, ResourceKind::Attribute)
    }

    /// A custom attribute that owns its host's rendering
    pub fn template_controller(name: impl Into<String>) -> Self {
        let mut descriptor = Self::attribute(name).with_bindable(BindableDescriptor::new("value"));
        descriptor.is_template_controller = true;
        descriptor
    }

    pub fn with_bindable(mut self, bindable: BindableDescriptor) -> Self {
        self.bindables.insert(bindable.property.clone(), bindable);
        self
    }

    pub fn with_default_binding_mode(mut self, mode: BindingMode) -> Self {
        self.default_binding_mode = mode;
        self
    }

    pub fn with_dynamic_options(mut self) -> Self {
        self.has_dynamic_options = true;
        self
    }

    /// Descriptors loaded from JSON may omit `attribute`; fill it from the
    /// property name.
    pub(crate) fn normalize(mut self) -> Self {
        self.name = self.name.to_lowercase();
        for bindable in self.bindables.values_mut() {
            if bindable.attribute.is_empty() {
                bindable.attribute = camel_case_to_kebab_case(&bindable.property);
            }
        }
        self
    }

    /// Bindable addressed by a markup name, either its kebab-case attribute
    /// or its camelCase property.
    pub fn find_bindable(&self, name: &str) -> Option<&BindableDescriptor> {
        self.bindables
            .values()
            .find(|b| b.attribute == name || b.property == name)
            .or_else(|| self.bindables.get(&dash_case_to_camel_case(name)))
    }

    /// Target of a custom attribute's single value: the first declared
    /// bindable, or a synthetic `value` one.
    pub fn primary_bindable(&self) -> BindableDescriptor {
        match self.bindables.values().next() {
            Some(bindable) => bindable.clone(),
            None => BindableDescriptor::new("value").with_mode(self.default_binding_mode),
        }
    }

    /// Mode a `bind` command takes on `bindable`.
    pub fn resolve_mode(&self, bindable: &BindableDescriptor) -> BindingMode {
        if bindable.mode != BindingMode::DEFAULT {
            return bindable.mode;
        }
        if self.default_binding_mode != BindingMode::DEFAULT {
            return self.default_binding_mode;
        }
        BindingMode::TO_VIEW
    }
}

/// Resolves resource names for the compiler.
pub trait ResourceResolver: Send + Sync {
    fn find_element(&self, name: &str) -> Option<&ResourceDescriptor>;
    fn find_attribute(&self, name: &str) -> Option<&ResourceDescriptor>;
}
