//! ML Parser Lexer
//!
//! HTML tokenizer: converts template source into a flat token stream.
//! Entities are decoded here, so text and attribute tokens carry final values.

use super::tags::{TagContentType, TagDefinition};
use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseLocation, ParseSourceSpan};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Main tokenization function
pub fn tokenize(
    source: &str,
    get_tag_definition: fn(&str) -> &'static dyn TagDefinition,
) -> TokenizeResult {
    let content = CR_OR_CRLF_REGEXP.replace_all(source, "\n");
    let mut tokenizer = Tokenizer::new(&content, get_tag_definition);
    tokenizer.tokenize();
    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

static CR_OR_CRLF_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n?").unwrap());

static NAMED_ENTITIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut entities = HashMap::new();
    entities.insert("amp", "&");
    entities.insert("lt", "<");
    entities.insert("gt", ">");
    entities.insert("quot", "\"");
    entities.insert("apos", "'");
    entities.insert("nbsp", "\u{00A0}");
    entities.insert("copy", "\u{00A9}");
    entities.insert("reg", "\u{00AE}");
    entities.insert("hellip", "\u{2026}");
    entities.insert("mdash", "\u{2014}");
    entities.insert("ndash", "\u{2013}");
    entities
});

/// Position of the scanner inside the source
#[derive(Debug, Clone, Copy)]
struct CursorState {
    index: usize,
    offset: usize,
    line: usize,
    col: usize,
}

impl CursorState {
    fn location(&self) -> ParseLocation {
        ParseLocation::new(self.offset, self.line, self.col)
    }
}

struct Tokenizer {
    chars: Vec<char>,
    state: CursorState,
    get_tag_definition: fn(&str) -> &'static dyn TagDefinition,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl Tokenizer {
    fn new(source: &str, get_tag_definition: fn(&str) -> &'static dyn TagDefinition) -> Self {
        Tokenizer {
            chars: source.chars().collect(),
            state: CursorState {
                index: 0,
                offset: 0,
                line: 0,
                col: 0,
            },
            get_tag_definition,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn tokenize(&mut self) {
        while self.peek() != chars::EOF {
            let start = self.state;
            if self.peek() == chars::LT {
                let next = self.peek_at(1);
                if self.attempt_str("<!--") {
                    self.consume_comment(start);
                } else if next == chars::BANG {
                    self.consume_doc_type(start);
                } else if next == chars::SLASH && chars::is_ascii_letter(self.peek_at(2)) {
                    self.consume_tag_close(start);
                } else if chars::is_ascii_letter(next) {
                    self.consume_tag_open(start);
                } else {
                    self.consume_text();
                }
            } else {
                self.consume_text();
            }
        }
        let eof = self.state;
        self.push_token(TokenType::Eof, vec![], eof);
    }

    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_at(&self, delta: usize) -> char {
        self.chars
            .get(self.state.index + delta)
            .copied()
            .unwrap_or(chars::EOF)
    }

    fn advance(&mut self) {
        let Some(&ch) = self.chars.get(self.state.index) else {
            return;
        };
        self.state.index += 1;
        self.state.offset += ch.len_utf8();
        if ch == chars::LF {
            self.state.line += 1;
            self.state.col = 0;
        } else {
            self.state.col += 1;
        }
    }

    fn attempt_char_code(&mut self, ch: char) -> bool {
        if self.peek() == ch {
            self.advance();
            true
        } else {
            false
        }
    }

    fn attempt_str(&mut self, s: &str) -> bool {
        let matches = s
            .chars()
            .enumerate()
            .all(|(i, ch)| self.peek_at(i) == ch);
        if matches {
            for _ in s.chars() {
                self.advance();
            }
        }
        matches
    }

    fn skip_whitespace(&mut self) {
        while chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn span_from(&self, start: CursorState) -> ParseSourceSpan {
        ParseSourceSpan::new(start.location(), self.state.location())
    }

    fn push_token(&mut self, token_type: TokenType, parts: Vec<String>, start: CursorState) {
        let span = self.span_from(start);
        self.tokens.push(Token::new(token_type, parts, span));
    }

    fn handle_error(&mut self, msg: String, start: CursorState) {
        let span = self.span_from(start);
        self.errors.push(ParseError::new(span, msg));
    }

    fn unexpected_character(&mut self) {
        let start = self.state;
        let ch = self.peek();
        let found = if ch == chars::EOF {
            "EOF".to_string()
        } else {
            ch.to_string()
        };
        self.handle_error(format!("Unexpected character \"{}\"", found), start);
    }

    fn read_name(&mut self) -> String {
        let mut name = String::new();
        while !chars::is_name_end(self.peek()) {
            name.push(self.peek());
            self.advance();
        }
        name
    }

    /// Decode an entity at the cursor (just past the `&`), or return `None`
    /// and leave the cursor untouched if the text is not a known entity.
    fn try_read_entity(&mut self) -> Option<String> {
        let saved = self.state;
        let mut body = String::new();
        while self.peek() != chars::SEMICOLON && self.peek() != chars::EOF && body.len() < 32 {
            let ch = self.peek();
            if !(chars::is_ascii_letter(ch) || chars::is_digit(ch) || ch == chars::HASH) {
                break;
            }
            body.push(ch);
            self.advance();
        }
        if !self.attempt_char_code(chars::SEMICOLON) {
            self.state = saved;
            return None;
        }
        let decoded = if let Some(numeric) = body.strip_prefix('#') {
            let code = match numeric.strip_prefix(['x', 'X']) {
                Some(hex) if !hex.is_empty() && hex.chars().all(chars::is_ascii_hex_digit) => {
                    u32::from_str_radix(hex, 16).ok()
                }
                Some(_) => None,
                None => numeric.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32).map(|c| c.to_string())
        } else {
            NAMED_ENTITIES.get(body.as_str()).map(|s| s.to_string())
        };
        if decoded.is_none() {
            self.state = saved;
        }
        decoded
    }

    fn consume_text(&mut self) {
        let start = self.state;
        let mut value = String::new();
        loop {
            let ch = self.peek();
            if ch == chars::EOF {
                break;
            }
            if ch == chars::LT {
                let next = self.peek_at(1);
                if chars::is_ascii_letter(next)
                    || next == chars::BANG
                    || (next == chars::SLASH && chars::is_ascii_letter(self.peek_at(2)))
                {
                    break;
                }
            }
            self.advance();
            if ch == chars::AMPERSAND {
                if let Some(decoded) = self.try_read_entity() {
                    value.push_str(&decoded);
                    continue;
                }
            }
            value.push(ch);
        }
        self.push_token(TokenType::Text, vec![value], start);
    }

    fn consume_comment(&mut self, start: CursorState) {
        self.push_token(TokenType::CommentStart, vec![], start);
        let content_start = self.state;
        let mut value = String::new();
        loop {
            if self.peek() == chars::EOF {
                self.unexpected_character();
                break;
            }
            let end_start = self.state;
            if self.attempt_str("-->") {
                self.push_token(TokenType::Text, vec![value], content_start);
                self.push_token(TokenType::CommentEnd, vec![], end_start);
                return;
            }
            value.push(self.peek());
            self.advance();
        }
        self.push_token(TokenType::Text, vec![value], content_start);
    }

    fn consume_doc_type(&mut self, start: CursorState) {
        self.advance();
        self.advance();
        let mut value = String::new();
        while self.peek() != chars::GT && self.peek() != chars::EOF {
            value.push(self.peek());
            self.advance();
        }
        if !self.attempt_char_code(chars::GT) {
            self.unexpected_character();
        }
        self.push_token(TokenType::DocType, vec![value], start);
    }

    fn consume_tag_open(&mut self, start: CursorState) {
        self.advance();
        let tag_name = self.read_name().to_lowercase();
        self.push_token(TokenType::TagOpenStart, vec![tag_name.clone()], start);

        loop {
            self.skip_whitespace();
            let ch = self.peek();
            if ch == chars::EOF {
                self.unexpected_character();
                return;
            }
            let end_start = self.state;
            if self.attempt_char_code(chars::GT) {
                self.push_token(TokenType::TagOpenEnd, vec![], end_start);
                break;
            }
            if self.attempt_str("/>") {
                self.push_token(TokenType::TagOpenEndVoid, vec![], end_start);
                return;
            }
            if ch == chars::SLASH || ch == chars::LT || chars::is_quote(ch) || ch == chars::EQ {
                self.unexpected_character();
                self.advance();
                continue;
            }
            self.consume_attribute();
        }

        match (self.get_tag_definition)(&tag_name).content_type() {
            TagContentType::RawText => self.consume_raw_text(&tag_name, false),
            TagContentType::EscapableRawText => self.consume_raw_text(&tag_name, true),
            TagContentType::ParsableData => {}
        }
    }

    fn consume_attribute(&mut self) {
        let name_start = self.state;
        let name = self.read_name().to_lowercase();
        self.push_token(TokenType::AttrName, vec![name], name_start);
        self.skip_whitespace();
        if !self.attempt_char_code(chars::EQ) {
            return;
        }
        self.skip_whitespace();
        let quote = self.peek();
        if quote == chars::SQ || quote == chars::DQ {
            let quote_start = self.state;
            self.advance();
            self.push_token(TokenType::AttrQuote, vec![quote.to_string()], quote_start);
            let value_start = self.state;
            let value = self.read_until_char(quote, true);
            self.push_token(TokenType::AttrValueText, vec![value], value_start);
            let quote_start = self.state;
            if self.attempt_char_code(quote) {
                self.push_token(TokenType::AttrQuote, vec![quote.to_string()], quote_start);
            } else {
                self.unexpected_character();
            }
        } else {
            let value_start = self.state;
            let mut value = String::new();
            while !chars::is_whitespace(self.peek())
                && self.peek() != chars::GT
                && self.peek() != chars::EOF
                && !(self.peek() == chars::SLASH && self.peek_at(1) == chars::GT)
            {
                let ch = self.peek();
                self.advance();
                if ch == chars::AMPERSAND {
                    if let Some(decoded) = self.try_read_entity() {
                        value.push_str(&decoded);
                        continue;
                    }
                }
                value.push(ch);
            }
            self.push_token(TokenType::AttrValueText, vec![value], value_start);
        }
    }

    fn read_until_char(&mut self, end: char, decode_entities: bool) -> String {
        let mut value = String::new();
        while self.peek() != end && self.peek() != chars::EOF {
            let ch = self.peek();
            self.advance();
            if decode_entities && ch == chars::AMPERSAND {
                if let Some(decoded) = self.try_read_entity() {
                    value.push_str(&decoded);
                    continue;
                }
            }
            value.push(ch);
        }
        value
    }

    fn is_closing_tag_match(&self, tag_name: &str) -> bool {
        if self.peek() != chars::LT || self.peek_at(1) != chars::SLASH {
            return false;
        }
        let candidate: String = (0..tag_name.chars().count())
            .map(|i| self.peek_at(2 + i))
            .collect();
        candidate.eq_ignore_ascii_case(tag_name)
            && chars::is_name_end(self.peek_at(2 + tag_name.chars().count()))
    }

    fn consume_raw_text(&mut self, tag_name: &str, consume_entities: bool) {
        let start = self.state;
        let mut value = String::new();
        while self.peek() != chars::EOF && !self.is_closing_tag_match(tag_name) {
            let ch = self.peek();
            self.advance();
            if consume_entities && ch == chars::AMPERSAND {
                if let Some(decoded) = self.try_read_entity() {
                    value.push_str(&decoded);
                    continue;
                }
            }
            value.push(ch);
        }
        self.push_token(TokenType::RawText, vec![value], start);
    }

    fn consume_tag_close(&mut self, start: CursorState) {
        self.advance();
        self.advance();
        let tag_name = self.read_name().to_lowercase();
        self.skip_whitespace();
        if !self.attempt_char_code(chars::GT) {
            self.unexpected_character();
            while self.peek() != chars::GT && self.peek() != chars::EOF {
                self.advance();
            }
            self.attempt_char_code(chars::GT);
        }
        self.push_token(TokenType::TagClose, vec![tag_name], start);
    }
}
