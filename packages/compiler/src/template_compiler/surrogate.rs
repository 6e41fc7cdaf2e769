//! Surrogates and `<let>`

use super::assembler::InstructionCollector;
use super::attribute_classifier::{classify, parse};
use super::instructions::Instruction;
use super::ref_resolver::{is_ref_syntax, resolve_ref};
use super::TemplateCompiler;
use crate::error::{CompilerError, Result};
use crate::expression_parser::{Expression, ExpressionKind};
use crate::ml_parser::ast::Element;
use crate::util::{dash_case_to_camel_case, split_at_last_period};
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Attributes that must stay unique to the host and never surrogate
    static ref INVALID_SURROGATE_ATTRIBUTES: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("id");
        set.insert("part");
        set.insert("replace-part");
        set
    };
}

const TO_VIEW_MODEL: &str = "to-view-model";

impl<'a> TemplateCompiler<'a> {
    /// Compile and remove every attribute of the root `<template>`.
    pub(crate) fn compile_surrogates(&self, root: &mut Element) -> Result<Vec<Instruction>> {
        let mut surrogates = Vec::with_capacity(root.attrs.len());
        for attr in &root.attrs {
            let (prefix, _) = split_at_last_period(&attr.name);
            if INVALID_SURROGATE_ATTRIBUTES.contains(attr.name.as_str()) {
                return Err(CompilerError::InvalidSurrogateAttribute {
                    name: attr.name.clone(),
                });
            }
            if is_ref_syntax(&attr.name) {
                surrogates.push(resolve_ref(self.parser, self.resources, root, None, &attr.name, &attr.value)?);
                continue;
            }
            if let Some(resource) = self.resources.find_attribute(prefix) {
                if resource.is_template_controller {
                    return Err(CompilerError::compile(format!(
                        "Template controller \"{}\" is not allowed on the surrogate template",
                        resource.name
                    )));
                }
                surrogates.push(Instruction::HydrateAttribute {
                    res: resource.name.clone(),
                    instructions: self.compile_custom_attribute(resource, &attr.name, &attr.value)?,
                });
                continue;
            }
            let instruction = classify(self.parser, &attr.name, &attr.value, None, false)?;
            surrogates.push(instruction.unwrap_or_else(|| Instruction::SetProperty {
                to: attr.name.clone(),
                value: attr.value.clone(),
            }));
        }
        root.attrs.clear();
        Ok(surrogates)
    }

    /// `<let a.bind="b" c="${d}" to-view-model>`. A custom element named
    /// `let` never applies here.
    pub(crate) fn compile_let(&self, el: &mut Element, collector: &mut InstructionCollector<'_>) -> Result<()> {
        let mut to_view_model = false;
        let mut instructions = Vec::with_capacity(el.attrs.len());
        for attr in &el.attrs {
            if attr.name == TO_VIEW_MODEL {
                to_view_model = true;
                continue;
            }
            let (prefix, command) = split_at_last_period(&attr.name);
            let from = if command.is_some() {
                parse(self.parser, &attr.value, ExpressionKind::IsProperty)?
            } else {
                match self.parser.parse(&attr.value, ExpressionKind::Interpolation)? {
                    Some(interpolation) => interpolation,
                    None => Expression::string(attr.value.as_str()),
                }
            };
            instructions.push(Instruction::LetBinding {
                to: dash_case_to_camel_case(prefix),
                from,
            });
        }
        collector.push_target(
            el,
            vec![Instruction::HydrateLetElement {
                instructions,
                to_view_model,
            }],
        );
        Ok(())
    }
}
