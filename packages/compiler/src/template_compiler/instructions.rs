//! Instruction tree
//!
//! Output of a compile call. Group `i` of [`TemplateDefinition::instructions`]
//! belongs to the `i`-th tagged node of the template, in document order.

use crate::error::{CompilerError, Result};
use crate::expression_parser::Expression;
use crate::ml_parser::ast::Element;
use crate::ml_parser::serializer::serialize_element;
use crate::resources::BindingMode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelegationStrategy {
    /// `trigger`: directly on the element
    None,
    /// `delegate`: bubbling phase on a shared ancestor
    Bubbling,
    /// `capture`: capturing phase on a shared ancestor
    Capturing,
}

impl DelegationStrategy {
    pub fn from_command(command: &str) -> Option<DelegationStrategy> {
        match command {
            "trigger" => Some(DelegationStrategy::None),
            "delegate" => Some(DelegationStrategy::Bubbling),
            "capture" => Some(DelegationStrategy::Capturing),
            _ => None,
        }
    }
}

/// What a ref binding hands to the view-model
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum RefTarget {
    Element,
    ViewModel,
    /// View-model of the named custom attribute on the same node
    Attribute(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Instruction {
    SetProperty {
        to: String,
        value: String,
    },
    PropertyBinding {
        to: String,
        from: Expression,
        mode: BindingMode,
    },
    Interpolation {
        to: String,
        from: Expression,
    },
    ListenerBinding {
        to: String,
        from: Expression,
        strategy: DelegationStrategy,
        prevent_default: bool,
    },
    CallBinding {
        to: String,
        from: Expression,
    },
    RefBinding {
        from: Expression,
        to: RefTarget,
    },
    IteratorBinding {
        to: String,
        from: Expression,
    },
    LetBinding {
        to: String,
        from: Expression,
    },
    /// Interpolated text; the target is the marker placed before the text node
    TextBinding {
        from: Expression,
    },
    HydrateElement {
        res: String,
        instructions: Vec<Instruction>,
        parts: IndexMap<String, TemplateDefinition>,
    },
    HydrateAttribute {
        res: String,
        instructions: Vec<Instruction>,
    },
    HydrateLetElement {
        instructions: Vec<Instruction>,
        to_view_model: bool,
    },
    HydrateTemplateController {
        res: String,
        def: Box<TemplateDefinition>,
        instructions: Vec<Instruction>,
        link: bool,
    },
}

impl Instruction {
    /// Wire name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::SetProperty { .. } => "setProperty",
            Instruction::PropertyBinding { .. } => "propertyBinding",
            Instruction::Interpolation { .. } => "interpolation",
            Instruction::ListenerBinding { .. } => "listenerBinding",
            Instruction::CallBinding { .. } => "callBinding",
            Instruction::RefBinding { .. } => "refBinding",
            Instruction::IteratorBinding { .. } => "iteratorBinding",
            Instruction::LetBinding { .. } => "letBinding",
            Instruction::TextBinding { .. } => "textBinding",
            Instruction::HydrateElement { .. } => "hydrateElement",
            Instruction::HydrateAttribute { .. } => "hydrateAttribute",
            Instruction::HydrateLetElement { .. } => "hydrateLetElement",
            Instruction::HydrateTemplateController { .. } => "hydrateTemplateController",
        }
    }
}

/// A compiled template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    /// Root `<template>` with every target tagged
    pub template: Element,
    pub instructions: Vec<Vec<Instruction>>,
    /// Applied to the host element of the component
    pub surrogates: Vec<Instruction>,
    pub has_slots: bool,
}

impl TemplateDefinition {
    /// Template markup as HTML
    pub fn template_html(&self) -> String {
        serialize_element(&self.template)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| CompilerError::compile(format!("Failed to serialize template definition: {}", e)))
    }
}
