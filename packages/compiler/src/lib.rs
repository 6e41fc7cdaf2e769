#![deny(clippy::all)]

/**
 * View Compiler
 *
 * Compiles binding-annotated markup templates into instruction trees that a
 * runtime replays to build and bind views.
 */

pub mod chars;
pub mod config;
pub mod error;
pub mod parse_util;
pub mod util;

// Parsers
pub mod expression_parser;
pub mod ml_parser;

// Compilation
pub mod resources;
pub mod template_compiler;

// Re-exports
pub use config::CompilerConfig;
pub use error::{CompilerError, Result};
pub use expression_parser::{Expression, ExpressionKind, ExpressionParser};
pub use resources::{
    BindableDescriptor, BindingMode, ResourceDescriptor, ResourceKind, ResourceRegistry, ResourceResolver,
};
pub use template_compiler::{DelegationStrategy, Instruction, RefTarget, TemplateCompiler, TemplateDefinition};

/// Compile `markup` against `resources` with the default parser and config.
pub fn compile(markup: &str, resources: &dyn ResourceResolver) -> Result<TemplateDefinition> {
    TemplateCompiler::new(resources).compile(markup)
}
