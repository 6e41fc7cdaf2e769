//! Parse Utilities
//!
//! Source locations and recoverable parse errors for the markup parser.

use crate::chars;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }

    /// Location of `offset` within `source`, counting lines and columns from zero.
    pub fn at(source: &str, offset: usize) -> Self {
        let mut line = 0;
        let mut col = 0;
        for ch in source[..offset.min(source.len())].chars() {
            if ch == chars::LF {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        ParseLocation { offset, line, col }
    }
}

impl fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A half-open byte range of the original markup.
///
/// Nodes synthesized by the compiler (wrappers, markers) carry the default,
/// empty span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.start.offset..self.end.offset).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: String) -> Self {
        ParseError {
            span,
            msg,
            level: ParseErrorLevel::Error,
        }
    }

    /// Message with a short excerpt of the offending source, like
    /// `Unexpected closing tag "p" ("<div>[ERROR ->]</p>")`.
    pub fn contextual_message(&self, source: &str) -> String {
        let offset = self.span.start.offset.min(source.len());
        let mut before_start = offset.saturating_sub(30);
        while !source.is_char_boundary(before_start) {
            before_start -= 1;
        }
        let mut after_end = (offset + 30).min(source.len());
        while !source.is_char_boundary(after_end) {
            after_end += 1;
        }
        let level = match self.level {
            ParseErrorLevel::Warning => "WARNING",
            ParseErrorLevel::Error => "ERROR",
        };
        format!(
            "{} (\"{}[{} ->]{}\")",
            self.msg,
            &source[before_start..offset],
            level,
            &source[offset..after_end]
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.msg, self.span.start)
    }
}
