/**
 * Binding Expression Lexer
 *
 * Tokenizes binding expressions into tokens for parsing
 */

use crate::chars;
use serde::{Deserialize, Serialize};

/// Token types in binding expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    String = 3,
    Operator = 4,
    Number = 5,
    Error = 6,
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(index: usize, end: usize, token_type: TokenType, num_value: f64, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    pub fn operator(index: usize, end: usize, str_value: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0.0, str_value.to_string())
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_number(&self) -> bool {
        self.token_type == TokenType::Number
    }

    pub fn is_string(&self) -> bool {
        self.token_type == TokenType::String
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.token_type == TokenType::Keyword
    }

    pub fn is_keyword_value(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

/// Binding expression lexer
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Self::new()
    }
}

const KEYWORDS: &[&str] = &[
    "null", "undefined", "true", "false", "$this", "$parent", "typeof", "void", "instanceof", "in",
];

/// Scanner for tokenizing input
struct Scanner<'a> {
    input: &'a str,
    length: usize,
    index: usize,
    peek: char,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        let peek = input.chars().next().unwrap_or(chars::EOF);
        Scanner {
            input,
            length: input.len(),
            index: 0,
            peek,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.scan_token() {
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }

    fn advance(&mut self) {
        self.index += self.peek.len_utf8();
        self.peek = if self.index < self.length {
            self.input[self.index..].chars().next().unwrap_or(chars::EOF)
        } else {
            chars::EOF
        };
    }

    fn scan_token(&mut self) -> Option<Token> {
        while self.index < self.length && chars::is_whitespace(self.peek) {
            self.advance();
        }

        if self.index >= self.length {
            return None;
        }

        let start = self.index;
        let ch = self.peek;

        if chars::is_identifier_start(ch) {
            return Some(self.scan_identifier());
        }

        if chars::is_digit(ch) {
            return Some(self.scan_number(start));
        }

        match ch {
            chars::PERIOD => {
                self.advance();
                if chars::is_digit(self.peek) {
                    return Some(self.scan_number(start));
                }
                Some(Token::new(start, self.index, TokenType::Character, 0.0, ch.to_string()))
            }
            chars::LPAREN | chars::RPAREN | chars::LBRACKET | chars::RBRACKET | chars::LBRACE
            | chars::RBRACE | chars::COMMA | chars::COLON | chars::SEMICOLON => {
                self.advance();
                Some(Token::new(start, self.index, TokenType::Character, 0.0, ch.to_string()))
            }
            chars::SQ | chars::DQ => Some(self.scan_string(ch)),
            chars::PLUS | chars::MINUS | chars::STAR | chars::SLASH | chars::PERCENT | chars::QUESTION => {
                self.advance();
                if ch == chars::QUESTION && self.peek == chars::QUESTION {
                    self.advance();
                    return Some(Token::operator(start, self.index, "??"));
                }
                Some(Token::operator(start, self.index, &ch.to_string()))
            }
            chars::AMPERSAND => Some(self.scan_complex_operator(start, "&", chars::AMPERSAND, "&&", None)),
            chars::BAR => Some(self.scan_complex_operator(start, "|", chars::BAR, "||", None)),
            chars::LT => Some(self.scan_complex_operator(start, "<", chars::EQ, "<=", None)),
            chars::GT => Some(self.scan_complex_operator(start, ">", chars::EQ, ">=", None)),
            chars::BANG => Some(self.scan_complex_operator(start, "!", chars::EQ, "!=", Some("!=="))),
            chars::EQ => Some(self.scan_complex_operator(start, "=", chars::EQ, "==", Some("==="))),
            _ => {
                self.advance();
                Some(Token::new(
                    start,
                    self.index,
                    TokenType::Error,
                    0.0,
                    format!(
                        "Lexer Error: Unexpected character [{}] at column {} in expression [{}]",
                        ch, start, self.input
                    ),
                ))
            }
        }
    }

    /// `one`, or `two` if followed by `second`, or `three` if followed by a
    /// further `=`.
    fn scan_complex_operator(
        &mut self,
        start: usize,
        one: &str,
        second: char,
        two: &str,
        three: Option<&str>,
    ) -> Token {
        self.advance();
        let mut op = one;
        if self.peek == second {
            self.advance();
            op = two;
            if let Some(three) = three {
                if self.peek == chars::EQ {
                    self.advance();
                    op = three;
                }
            }
        }
        Token::operator(start, self.index, op)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.index;
        self.advance();

        while self.index < self.length && chars::is_identifier_part(self.peek) {
            self.advance();
        }

        let str_value = self.input[start..self.index].to_string();
        let token_type = if KEYWORDS.contains(&str_value.as_str()) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };

        Token::new(start, self.index, token_type, 0.0, str_value)
    }

    fn scan_number(&mut self, start: usize) -> Token {
        while self.index < self.length {
            if chars::is_digit(self.peek) || self.peek == chars::PERIOD {
                self.advance();
            } else if self.peek == 'e' || self.peek == 'E' {
                self.advance();
                if self.peek == chars::PLUS || self.peek == chars::MINUS {
                    self.advance();
                }
            } else {
                break;
            }
        }

        let str_value = &self.input[start..self.index];
        match str_value.parse::<f64>() {
            Ok(num_value) => Token::new(start, self.index, TokenType::Number, num_value, str_value.to_string()),
            Err(_) => Token::new(
                start,
                self.index,
                TokenType::Error,
                0.0,
                format!(
                    "Lexer Error: Invalid number [{}] at column {} in expression [{}]",
                    str_value, start, self.input
                ),
            ),
        }
    }

    fn scan_string(&mut self, quote: char) -> Token {
        let start = self.index;
        self.advance();

        let mut buffer = String::new();
        loop {
            if self.index >= self.length {
                return Token::new(
                    start,
                    self.index,
                    TokenType::Error,
                    0.0,
                    format!(
                        "Lexer Error: Unterminated quote at column {} in expression [{}]",
                        start, self.input
                    ),
                );
            }
            let ch = self.peek;
            self.advance();
            if ch == quote {
                break;
            }
            if ch == chars::BACKSLASH {
                let escaped = self.peek;
                self.advance();
                buffer.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                buffer.push(ch);
            }
        }

        Token::new(start, self.index, TokenType::String, 0.0, buffer)
    }
}
