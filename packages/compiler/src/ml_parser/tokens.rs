//! ML Parser Tokens

use crate::parse_util::ParseSourceSpan;
use serde::{Deserialize, Serialize};

/// Token types for HTML parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    TagOpenStart,
    TagOpenEnd,
    TagOpenEndVoid,
    TagClose,
    Text,
    RawText,
    CommentStart,
    CommentEnd,
    AttrName,
    AttrQuote,
    AttrValueText,
    DocType,
    Eof,
}

/// A lexed token. `parts` carries the decoded payload: the tag or attribute
/// name, the attribute value, or the text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token {
            token_type,
            parts,
            source_span,
        }
    }

    /// First payload part, or the empty string
    pub fn part(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }
}
