//! Attribute classifier
//!
//! Maps one `name[.command]="value"` pair to the instruction it compiles to.

use super::instructions::{DelegationStrategy, Instruction};
use crate::error::Result;
use crate::expression_parser::{Expression, ExpressionKind, ExpressionParser};
use crate::resources::{BindableDescriptor, BindingMode, ResourceDescriptor};
use crate::util::split_at_last_period;
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Recognised binding commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingCommand {
    Bind,
    OneTime,
    ToView,
    FromView,
    TwoWay,
    Trigger,
    Delegate,
    Capture,
    Call,
    For,
}

lazy_static! {
    static ref COMMANDS: HashMap<&'static str, BindingCommand> = {
        let mut map = HashMap::new();
        map.insert("bind", BindingCommand::Bind);
        map.insert("one-time", BindingCommand::OneTime);
        map.insert("to-view", BindingCommand::ToView);
        map.insert("from-view", BindingCommand::FromView);
        map.insert("two-way", BindingCommand::TwoWay);
        map.insert("trigger", BindingCommand::Trigger);
        map.insert("delegate", BindingCommand::Delegate);
        map.insert("capture", BindingCommand::Capture);
        map.insert("call", BindingCommand::Call);
        map.insert("for", BindingCommand::For);
        map
    };
}

impl BindingCommand {
    pub fn parse(command: &str) -> Option<BindingCommand> {
        COMMANDS.get(command).copied()
    }
}

/// Property a bindable attribute writes to, with the mode `bind` resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindableTarget {
    pub property: String,
    pub bind_mode: BindingMode,
}

impl BindableTarget {
    pub fn new(resource: &ResourceDescriptor, bindable: &BindableDescriptor) -> Self {
        BindableTarget {
            property: bindable.property.clone(),
            bind_mode: resource.resolve_mode(bindable),
        }
    }
}

/// Classify one attribute.
///
/// `multi` marks an option inside a multi-binding custom attribute value,
/// where literals always become `SetProperty`. Plain attributes without a
/// bindable and without a binding yield `None`.
pub fn classify(
    parser: &dyn ExpressionParser,
    name: &str,
    value: &str,
    bindable: Option<&BindableTarget>,
    multi: bool,
) -> Result<Option<Instruction>> {
    let (prefix, command) = split_at_last_period(name);
    let to = bindable
        .map(|b| b.property.clone())
        .unwrap_or_else(|| prefix.to_string());

    let parsed = command.and_then(|raw| BindingCommand::parse(raw).map(|c| (raw, c)));
    if let Some((raw, command)) = parsed {
        let instruction = match command {
            BindingCommand::Trigger | BindingCommand::Delegate | BindingCommand::Capture => Instruction::ListenerBinding {
                to,
                from: parse(parser, value, ExpressionKind::IsFunction)?,
                strategy: DelegationStrategy::from_command(raw).unwrap_or(DelegationStrategy::None),
                prevent_default: command == BindingCommand::Trigger,
            },
            BindingCommand::Call => Instruction::CallBinding {
                to,
                from: parse(parser, value, ExpressionKind::IsFunction)?,
            },
            BindingCommand::For => Instruction::IteratorBinding {
                to: "items".to_string(),
                from: parse(parser, value, ExpressionKind::ForCommand)?,
            },
            BindingCommand::Bind => Instruction::PropertyBinding {
                to,
                from: parse(parser, value, ExpressionKind::IsProperty)?,
                mode: bindable.map(|b| b.bind_mode).unwrap_or(BindingMode::TO_VIEW),
            },
            BindingCommand::OneTime | BindingCommand::ToView | BindingCommand::FromView | BindingCommand::TwoWay => {
                Instruction::PropertyBinding {
                    to,
                    from: parse(parser, value, ExpressionKind::IsProperty)?,
                    mode: BindingMode::from_command(raw).unwrap_or(BindingMode::TO_VIEW),
                }
            }
        };
        return Ok(Some(instruction));
    }

    if let Some(from) = parser.parse(value, ExpressionKind::Interpolation)? {
        return Ok(Some(Instruction::Interpolation { to, from }));
    }

    if bindable.is_some() || multi {
        return Ok(Some(Instruction::SetProperty {
            to,
            value: value.to_string(),
        }));
    }
    Ok(None)
}

/// Parse a non-interpolation expression; a parser that declines yields `''`.
pub(crate) fn parse(parser: &dyn ExpressionParser, value: &str, kind: ExpressionKind) -> Result<Expression> {
    Ok(parser
        .parse(value, kind)?
        .unwrap_or_else(|| Expression::string("")))
}
