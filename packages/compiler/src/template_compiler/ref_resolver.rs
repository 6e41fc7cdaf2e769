//! Ref resolver
//!
//! `ref`, `ref.<target>` and `<target>.ref` hand a live reference to the
//! view-model. The runtime assigns it on bind and resets it to null on unbind.

use super::attribute_classifier::parse;
use super::instructions::{Instruction, RefTarget};
use crate::error::{CompilerError, Result};
use crate::expression_parser::{ExpressionKind, ExpressionParser};
use crate::ml_parser::ast::Element;
use crate::resources::{ResourceDescriptor, ResourceResolver};
use crate::util::split_at_last_period;

pub fn is_ref_syntax(name: &str) -> bool {
    name == "ref" || name.starts_with("ref.") || name.ends_with(".ref")
}

/// Raw target token of a ref attribute; bare `ref` means the element.
fn ref_target_name(name: &str) -> &str {
    if name == "ref" {
        return "element";
    }
    if let Some(rest) = name.strip_prefix("ref.") {
        return rest;
    }
    split_at_last_period(name).0
}

pub fn resolve_ref(
    parser: &dyn ExpressionParser,
    resources: &dyn ResourceResolver,
    element: &Element,
    custom_element: Option<&ResourceDescriptor>,
    name: &str,
    value: &str,
) -> Result<Instruction> {
    let target = ref_target_name(name);
    let invalid = |reason: &str| CompilerError::InvalidRefTarget {
        attribute: name.to_string(),
        target: target.to_string(),
        reason: reason.to_string(),
    };

    let to = match target {
        "element" => RefTarget::Element,
        "view-model" => {
            if custom_element.is_none() {
                return Err(invalid("view-model refs require a custom element"));
            }
            RefTarget::ViewModel
        }
        _ => {
            let Some(resource) = resources.find_attribute(target) else {
                return Err(invalid("not a custom attribute"));
            };
            if resource.is_template_controller {
                return Err(invalid("template controllers cannot be referenced"));
            }
            let present = element
                .attrs
                .iter()
                .any(|attr| !is_ref_syntax(&attr.name) && split_at_last_period(&attr.name).0 == target);
            if !present {
                return Err(invalid("custom attribute is not present on the element"));
            }
            RefTarget::Attribute(resource.name.clone())
        }
    };

    Ok(Instruction::RefBinding {
        from: parse(parser, value, ExpressionKind::IsProperty)?,
        to,
    })
}
