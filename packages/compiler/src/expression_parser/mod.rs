/**
 * Expression Parser Module
 *
 * Binding expression lexer, parser and unparser
 */
pub mod ast;
pub mod lexer;
pub mod parser;
pub mod serializer;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::{split_interpolation, ExpressionKind, ExpressionParser, Parser};
pub use serializer::serialize;
