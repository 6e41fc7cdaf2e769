//! Multi-binding custom attribute values
//!
//! `<div tooltip="text.bind: msg; position: top">` sets several bindables
//! from one attribute.

use super::attribute_classifier::{classify, BindableTarget, BindingCommand};
use super::instructions::Instruction;
use super::TemplateCompiler;
use crate::error::{CompilerError, Result};
use crate::resources::ResourceDescriptor;
use crate::util::split_at_last_period;
use smallvec::SmallVec;

/// A `:` before any `${` marks an option list.
pub(crate) fn is_multi_binding(value: &str) -> bool {
    match (value.find(':'), value.find("${")) {
        (Some(colon), Some(interpolation)) => colon < interpolation,
        (Some(_), None) => true,
        _ => false,
    }
}

/// Split `a: x; b.bind: y` into `(name, value)` pairs. Semicolons inside
/// quotes or `${}` do not end an option.
pub(crate) fn split_options(value: &str) -> Result<SmallVec<[(&str, &str); 4]>> {
    let mut options = SmallVec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    let mut push = |from: usize, to: usize| -> Result<()> {
        let segment = &value[from..to];
        if segment.trim().is_empty() {
            return Ok(());
        }
        let Some(colon) = segment.find(':') else {
            return Err(CompilerError::compile(format!(
                "Missing ':' in multi-binding option \"{}\"",
                segment.trim()
            )));
        };
        options.push((segment[..colon].trim(), segment[colon + 1..].trim()));
        Ok(())
    };

    for (index, ch) in value.char_indices() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => {}
            None => match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                ';' if depth == 0 => {
                    push(start, index)?;
                    start = index + 1;
                }
                _ => {}
            },
        }
    }
    push(start, value.len())?;
    Ok(options)
}

impl<'a> TemplateCompiler<'a> {
    pub(crate) fn compile_multi_binding(&self, resource: &ResourceDescriptor, value: &str) -> Result<Vec<Instruction>> {
        let unknown = |option: &str| CompilerError::UnknownMultiBindingOption {
            resource: resource.name.clone(),
            option: option.to_string(),
        };

        let mut instructions = Vec::new();
        for (name, option_value) in split_options(value)? {
            let (prefix, command) = split_at_last_period(name);
            if command.is_some_and(|c| BindingCommand::parse(c).is_none()) || prefix.contains('.') {
                return Err(unknown(name));
            }
            let target = resource
                .find_bindable(prefix)
                .map(|bindable| BindableTarget::new(resource, bindable));
            if let Some(instruction) = classify(self.parser, name, option_value, target.as_ref(), true)? {
                instructions.push(instruction);
            }
        }
        Ok(instructions)
    }
}
