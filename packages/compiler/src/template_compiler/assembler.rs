//! Instruction collector
//!
//! Gathers instruction groups in document order and tags their targets.

use super::instructions::{Instruction, TemplateDefinition};
use crate::config::CompilerConfig;
use crate::ml_parser::ast::{Attribute, Element};

pub(crate) struct InstructionCollector<'c> {
    config: &'c CompilerConfig,
    groups: Vec<Vec<Instruction>>,
    has_slots: bool,
}

impl<'c> InstructionCollector<'c> {
    pub fn new(config: &'c CompilerConfig) -> Self {
        InstructionCollector {
            config,
            groups: Vec::new(),
            has_slots: false,
        }
    }

    /// Tag `element` and record its group. Empty groups leave it untouched.
    pub fn push_target(&mut self, element: &mut Element, group: Vec<Instruction>) {
        if group.is_empty() {
            return;
        }
        element.add_class(&self.config.target_class);
        self.groups.push(group);
    }

    /// Record a group whose target is a marker from [`Self::marker`]
    pub fn push_marker_group(&mut self, group: Vec<Instruction>) {
        self.groups.push(group);
    }

    /// Inert placeholder target, `<au-m class="au"></au-m>` by default
    pub fn marker(&self) -> Element {
        let mut marker = Element::synthetic(self.config.marker_tag.as_str());
        marker
            .attrs
            .push(Attribute::new("class", self.config.target_class.as_str()));
        marker
    }

    pub fn mark_slots(&mut self) {
        self.has_slots = true;
    }

    pub fn finish(self, template: Element, surrogates: Vec<Instruction>) -> TemplateDefinition {
        TemplateDefinition {
            template,
            instructions: self.groups,
            surrogates,
            has_slots: self.has_slots,
        }
    }
}
