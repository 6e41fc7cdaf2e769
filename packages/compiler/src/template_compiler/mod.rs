//! Template Compiler
//!
//! Turns markup into a [`TemplateDefinition`]: the markup with every target
//! tagged, plus one instruction group per target in document order.
//!
//! Compilation is pure. A compiler holds only borrowed collaborators and its
//! configuration, so one instance can serve many threads at once.

mod assembler;
pub mod attribute_classifier;
mod element_compiler;
pub mod instructions;
mod multi_binding;
pub mod ref_resolver;
mod surrogate;
mod template_controller;

pub use attribute_classifier::{classify, BindableTarget, BindingCommand};
pub use instructions::{DelegationStrategy, Instruction, RefTarget, TemplateDefinition};

use crate::config::CompilerConfig;
use crate::error::{CompilerError, Result};
use crate::expression_parser::{ExpressionParser, Parser};
use crate::ml_parser::ast::{Element, Node};
use crate::ml_parser::html_parser::HtmlParser;
use crate::resources::ResourceResolver;
use rayon::prelude::*;

static DEFAULT_PARSER: Parser = Parser;

pub struct TemplateCompiler<'a> {
    resources: &'a dyn ResourceResolver,
    parser: &'a dyn ExpressionParser,
    config: CompilerConfig,
}

impl<'a> TemplateCompiler<'a> {
    pub fn new(resources: &'a dyn ResourceResolver) -> Self {
        TemplateCompiler {
            resources,
            parser: &DEFAULT_PARSER,
            config: CompilerConfig::default(),
        }
    }

    pub fn with_parser(mut self, parser: &'a dyn ExpressionParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Parse and compile markup.
    pub fn compile(&self, markup: &str) -> Result<TemplateDefinition> {
        log::debug!("compiling template ({} bytes)", markup.len());
        let parsed = HtmlParser::new().parse(markup);
        if !parsed.errors.is_empty() {
            let message = parsed
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            return Err(CompilerError::Markup { message });
        }
        self.compile_nodes(parsed.root_nodes)
    }

    /// Compile an already parsed node list. A lone root `<template>` is the
    /// definition root and carries the surrogates; anything else is wrapped.
    pub fn compile_nodes(&self, nodes: Vec<Node>) -> Result<TemplateDefinition> {
        let root = match single_template_root(&nodes) {
            Some(index) => match nodes.into_iter().nth(index) {
                Some(Node::Element(el)) => el,
                _ => return Err(CompilerError::compile("Template root disappeared")),
            },
            None => Element::synthetic("template").with_children(nodes),
        };
        self.compile_root(root)
    }

    /// Compile a root `<template>` element.
    pub fn compile_root(&self, mut root: Element) -> Result<TemplateDefinition> {
        let surrogates = self.compile_surrogates(&mut root)?;
        let mut definition = self.compile_definition(root)?;
        definition.surrogates = surrogates;
        log::debug!(
            "compiled template: {} target(s), {} surrogate(s), has_slots={}",
            definition.instructions.len(),
            definition.surrogates.len(),
            definition.has_slots
        );
        Ok(definition)
    }

    /// Compile independent templates in parallel, one result per input.
    pub fn compile_all(&self, markups: &[&str]) -> Vec<Result<TemplateDefinition>> {
        markups.par_iter().map(|markup| self.compile(markup)).collect()
    }
}

/// Index of the only significant root node, if it is a `<template>`
fn single_template_root(nodes: &[Node]) -> Option<usize> {
    let mut significant = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| !node.is_insignificant());
    let (index, node) = significant.next()?;
    if significant.next().is_some() {
        return None;
    }
    match node {
        Node::Element(el) if el.is_template() => Some(index),
        _ => None,
    }
}
