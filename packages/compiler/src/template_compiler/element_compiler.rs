//! Element and attribute compilation
//!
//! Walks the tree in document order. Each element's group is recorded before
//! its children are visited, so group order matches target order.

use super::assembler::InstructionCollector;
use super::attribute_classifier::{classify, BindableTarget};
use super::instructions::{Instruction, TemplateDefinition};
use super::ref_resolver::{is_ref_syntax, resolve_ref};
use super::TemplateCompiler;
use crate::error::Result;
use crate::expression_parser::ExpressionKind;
use crate::ml_parser::ast::{Element, Node, Text};
use crate::resources::ResourceDescriptor;
use crate::util::split_at_last_period;
use indexmap::IndexMap;

pub(crate) const AS_ELEMENT: &str = "as-element";
const REPLACE_PART: &str = "replace-part";

impl<'a> TemplateCompiler<'a> {
    /// Compile the content of `template` into its own definition.
    pub(crate) fn compile_definition(&self, mut template: Element) -> Result<TemplateDefinition> {
        let mut collector = InstructionCollector::new(&self.config);
        self.compile_child_nodes(&mut template.children, &mut collector)?;
        Ok(collector.finish(template, Vec::new()))
    }

    pub(crate) fn compile_child_nodes(
        &self,
        children: &mut Vec<Node>,
        collector: &mut InstructionCollector<'_>,
    ) -> Result<()> {
        let mut index = 0;
        while index < children.len() {
            match &mut children[index] {
                Node::Element(el) => {
                    self.compile_element(el, collector)?;
                    index += 1;
                }
                Node::Text(text) => {
                    if self.config.strip_whitespace_text && text.value.trim().is_empty() {
                        children.remove(index);
                        continue;
                    }
                    let Some(from) = self.parser.parse(&text.value, ExpressionKind::Interpolation)? else {
                        index += 1;
                        continue;
                    };
                    // The marker takes the text's place; the runtime renders into
                    // the empty text node that follows it.
                    let span = text.source_span;
                    children[index] = Node::Element(collector.marker());
                    children.insert(index + 1, Node::Text(Text::new(String::new(), span)));
                    collector.push_marker_group(vec![Instruction::TextBinding { from }]);
                    index += 2;
                }
                Node::Comment(_) => index += 1,
            }
        }
        Ok(())
    }

    fn compile_element(&self, el: &mut Element, collector: &mut InstructionCollector<'_>) -> Result<()> {
        if el.name == "slot" {
            collector.mark_slots();
        }
        if self.first_template_controller(el).is_some() {
            return self.compile_template_controllers(el, collector);
        }
        if el.name == "let" {
            return self.compile_let(el, collector);
        }

        let custom_element = self.resolve_element(el);
        let parts = match custom_element {
            Some(_) => self.compile_replace_parts(el, collector)?,
            None => IndexMap::new(),
        };
        let group = self.compile_attributes(el, custom_element, parts)?;
        collector.push_target(el, group);
        self.compile_child_nodes(&mut el.children, collector)
    }

    /// Custom element named by `as-element`, or else by the tag.
    pub(crate) fn resolve_element(&self, el: &Element) -> Option<&'a ResourceDescriptor> {
        let name = el.attr(AS_ELEMENT).map(|a| a.value.as_str()).unwrap_or(&el.name);
        let found = self.resources.find_element(name);
        if found.is_none() && el.has_attr(AS_ELEMENT) {
            log::trace!("as-element \"{}\" is not a custom element; compiling <{}> as plain", name, el.name);
        }
        found
    }

    /// `[HydrateElement?, siblings...]` for a non-controller element.
    fn compile_attributes(
        &self,
        el: &Element,
        custom_element: Option<&'a ResourceDescriptor>,
        parts: IndexMap<String, TemplateDefinition>,
    ) -> Result<Vec<Instruction>> {
        let mut element_instructions = Vec::new();
        let mut siblings = Vec::new();

        for attr in &el.attrs {
            if attr.name == AS_ELEMENT {
                continue;
            }
            if is_ref_syntax(&attr.name) {
                siblings.push(resolve_ref(
                    self.parser,
                    self.resources,
                    el,
                    custom_element,
                    &attr.name,
                    &attr.value,
                )?);
                continue;
            }

            let (prefix, _) = split_at_last_period(&attr.name);
            if let Some(resource) = self.resources.find_attribute(prefix) {
                siblings.push(Instruction::HydrateAttribute {
                    res: resource.name.clone(),
                    instructions: self.compile_custom_attribute(resource, &attr.name, &attr.value)?,
                });
                continue;
            }

            let bindable = custom_element.and_then(|res| res.find_bindable(prefix).map(|b| BindableTarget::new(res, b)));
            if let Some(target) = bindable {
                if let Some(instruction) = classify(self.parser, &attr.name, &attr.value, Some(&target), false)? {
                    element_instructions.push(instruction);
                }
                continue;
            }

            if let Some(instruction) = classify(self.parser, &attr.name, &attr.value, None, false)? {
                siblings.push(instruction);
            }
        }

        let mut group = Vec::with_capacity(siblings.len() + 1);
        if let Some(resource) = custom_element {
            group.push(Instruction::HydrateElement {
                res: resource.name.clone(),
                instructions: element_instructions,
                parts,
            });
        }
        group.extend(siblings);
        Ok(group)
    }

    /// Instructions for one custom attribute occurrence: a multi-binding
    /// option list or a single value bound to the primary bindable. Only a
    /// command-less attribute is read as an option list.
    pub(crate) fn compile_custom_attribute(
        &self,
        resource: &ResourceDescriptor,
        name: &str,
        value: &str,
    ) -> Result<Vec<Instruction>> {
        let (_, command) = split_at_last_period(name);
        if command.is_none() && resource.has_dynamic_options && super::multi_binding::is_multi_binding(value) {
            return self.compile_multi_binding(resource, value);
        }
        let primary = resource.primary_bindable();
        let target = BindableTarget::new(resource, &primary);
        Ok(classify(self.parser, name, value, Some(&target), false)?
            .into_iter()
            .collect())
    }

    /// Lift `<template replace-part="name">` children out of a custom element.
    fn compile_replace_parts(
        &self,
        el: &mut Element,
        collector: &mut InstructionCollector<'_>,
    ) -> Result<IndexMap<String, TemplateDefinition>> {
        let mut parts = IndexMap::new();
        if !el.children.iter().any(is_replace_part) {
            return Ok(parts);
        }
        let mut kept = Vec::with_capacity(el.children.len());
        for child in std::mem::take(&mut el.children) {
            match child {
                Node::Element(mut part) if part.is_template() && part.has_attr(REPLACE_PART) => {
                    let name = part.attr(REPLACE_PART).map(|a| a.value.clone()).unwrap_or_default();
                    part.attrs.retain(|a| a.name != REPLACE_PART);
                    log::trace!("compiling replace-part \"{}\" of <{}>", name, el.name);
                    let definition = self.compile_definition(part)?;
                    if definition.has_slots {
                        collector.mark_slots();
                    }
                    parts.insert(name, definition);
                }
                other => kept.push(other),
            }
        }
        el.children = kept;
        Ok(parts)
    }
}

fn is_replace_part(node: &Node) -> bool {
    matches!(node, Node::Element(el) if el.is_template() && el.has_attr(REPLACE_PART))
}
