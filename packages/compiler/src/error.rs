//! Compiler errors
//!
//! Every error is terminal for the compile call that raised it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompilerError {
    /// A reserved attribute (`id`, `part`, `replace-part`) on the template root.
    #[error("Invalid surrogate attribute: {name}")]
    InvalidSurrogateAttribute { name: String },

    #[error("Invalid ref target \"{target}\" in attribute \"{attribute}\": {reason}")]
    InvalidRefTarget {
        attribute: String,
        target: String,
        reason: String,
    },

    #[error("Unknown multi-binding option \"{option}\" on custom attribute \"{resource}\"")]
    UnknownMultiBindingOption { resource: String, option: String },

    #[error("Template parse errors:\n{message}")]
    Markup { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("{message}")]
    Compile { message: String },
}

impl CompilerError {
    pub fn compile(message: impl Into<String>) -> Self {
        CompilerError::Compile {
            message: message.into(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        CompilerError::ParseError {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;
