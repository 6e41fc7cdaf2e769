//! ML (Markup Language) Parser Module
//!
//! Parses template markup into an owned node tree and writes trees back out.

pub mod ast;
pub mod html_parser;
pub mod html_tags;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod tags;
pub mod tokens;

pub use ast::*;
pub use html_parser::HtmlParser;
pub use html_tags::get_html_tag_definition;
pub use lexer::{tokenize, TokenizeResult};
pub use parser::{ParseTreeResult, Parser};
pub use serializer::{serialize_element, serialize_nodes};
pub use tags::*;
pub use tokens::*;
