/**
 * Binding Expression Parser
 *
 * Recursive descent parser for binding expressions, iterator declarations
 * and `${}` interpolations.
 */
use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::error::{CompilerError, Result};
use crate::util::has_interpolation;

/// What an attribute value is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionKind {
    /// Plain expression
    None,
    /// Text that may contain `${}` segments; parses to `None` without any
    Interpolation,
    /// Property binding source
    IsProperty,
    /// Listener or call binding source
    IsFunction,
    /// `lhs of rhs` iterator declaration
    ForCommand,
}

/// Parses binding expressions for the template compiler.
pub trait ExpressionParser: Send + Sync {
    fn parse(&self, input: &str, kind: ExpressionKind) -> Result<Option<Expression>>;
}

/// Default expression parser
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    /// Parse a property, listener or plain expression
    pub fn parse_expression(&self, input: &str) -> Result<Expression> {
        let mut parse_ast = ParseAST::new(input);
        if parse_ast.tokens.is_empty() {
            return Ok(Expression::string(""));
        }
        let ast = parse_ast.parse_binding_behavior()?;
        parse_ast.expect_end()?;
        Ok(ast)
    }

    /// Parse a `declaration of iterable` statement
    pub fn parse_for_of(&self, input: &str) -> Result<Expression> {
        let mut parse_ast = ParseAST::new(input);
        let declaration = parse_ast.parse_binding_declaration()?;
        match parse_ast.current() {
            Some(token) if token.is_identifier() && token.str_value == "of" => parse_ast.advance(),
            _ => {
                return Err(CompilerError::parse(format!(
                    "Missing expected token 'of' in iterator expression [{}]",
                    input
                )))
            }
        }
        let iterable = parse_ast.parse_binding_behavior()?;
        parse_ast.expect_end()?;
        Ok(Expression::for_of(declaration, iterable))
    }

    /// Split `${}` segments out of text. Returns `None` when the text holds
    /// no interpolation.
    pub fn parse_interpolation(&self, input: &str) -> Result<Option<Expression>> {
        if !has_interpolation(input) {
            return Ok(None);
        }
        let split = split_interpolation(input)?;
        if split.expressions.is_empty() {
            return Ok(None);
        }
        let expressions = split
            .expressions
            .iter()
            .map(|text| self.parse_expression(text))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Expression::Interpolation {
            parts: split.strings,
            expressions,
        }))
    }
}

impl ExpressionParser for Parser {
    fn parse(&self, input: &str, kind: ExpressionKind) -> Result<Option<Expression>> {
        match kind {
            ExpressionKind::Interpolation => self.parse_interpolation(input),
            ExpressionKind::ForCommand => self.parse_for_of(input).map(Some),
            ExpressionKind::None | ExpressionKind::IsProperty | ExpressionKind::IsFunction => {
                self.parse_expression(input).map(Some)
            }
        }
    }
}

/// Split interpolation result
#[derive(Debug, Clone, PartialEq)]
pub struct SplitInterpolation {
    pub strings: Vec<String>,
    pub expressions: Vec<String>,
}

/// Split `a${b}c` into strings `["a", "c"]` and expressions `["b"]`.
///
/// Braces nest, and quoted strings inside a segment may contain `}`.
pub fn split_interpolation(input: &str) -> Result<SplitInterpolation> {
    let mut strings = Vec::new();
    let mut expressions = Vec::new();
    let mut current = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if ch == '\\' {
            if let Some(&(_, '$')) = chars.peek() {
                current.push('$');
                chars.next();
                continue;
            }
        }
        if ch == '$' && matches!(chars.peek(), Some(&(_, '{'))) {
            chars.next();
            let mut depth = 0usize;
            let mut quote: Option<char> = None;
            let mut expression = String::new();
            let mut closed = false;
            for (_, inner) in chars.by_ref() {
                match quote {
                    Some(q) => {
                        if inner == q {
                            quote = None;
                        }
                    }
                    None => match inner {
                        '\'' | '"' | '`' => quote = Some(inner),
                        '{' => depth += 1,
                        '}' if depth == 0 => {
                            closed = true;
                            break;
                        }
                        '}' => depth -= 1,
                        _ => {}
                    },
                }
                expression.push(inner);
            }
            if !closed {
                return Err(CompilerError::parse(format!(
                    "Unterminated interpolation starting at column {} in [{}]",
                    index, input
                )));
            }
            strings.push(std::mem::take(&mut current));
            expressions.push(expression);
            continue;
        }
        current.push(ch);
    }
    strings.push(current);

    Ok(SplitInterpolation {
        strings,
        expressions,
    })
}

/// Binding power of a binary operator; higher binds tighter.
pub(crate) fn operator_precedence(operation: &str) -> Option<u8> {
    match operation {
        "??" | "||" => Some(1),
        "&&" => Some(2),
        "==" | "!=" | "===" | "!==" => Some(3),
        "<" | ">" | "<=" | ">=" | "instanceof" | "in" => Some(4),
        "+" | "-" => Some(5),
        "*" | "/" | "%" => Some(6),
        _ => None,
    }
}

fn binary_precedence(token: &Token) -> Option<u8> {
    match token.token_type {
        TokenType::Operator | TokenType::Keyword => operator_precedence(&token.str_value),
        _ => None,
    }
}

/// Parsing state over one token stream
struct ParseAST<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> ParseAST<'a> {
    fn new(input: &'a str) -> Self {
        ParseAST {
            input,
            tokens: Lexer::new().tokenize(input),
            index: 0,
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn error(&self, message: impl AsRef<str>) -> CompilerError {
        let column = self
            .current()
            .map(|t| t.index)
            .unwrap_or(self.input.len());
        CompilerError::parse(format!(
            "{} at column {} in [{}]",
            message.as_ref(),
            column,
            self.input
        ))
    }

    fn consume_optional_character(&mut self, code: char) -> bool {
        if self.current().map(|t| t.is_character(code)).unwrap_or(false) {
            self.advance();
            return true;
        }
        false
    }

    fn consume_optional_operator(&mut self, op: &str) -> bool {
        if self.current().map(|t| t.is_operator(op)).unwrap_or(false) {
            self.advance();
            return true;
        }
        false
    }

    fn expect_character(&mut self, code: char) -> Result<()> {
        if self.consume_optional_character(code) {
            Ok(())
        } else {
            Err(self.error(format!("Missing expected {}", code)))
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.current() {
            Some(token) if token.is_identifier() || token.is_keyword() => {
                let name = token.str_value.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error("Expected identifier")),
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.current() {
            None => Ok(()),
            Some(token) if token.is_error() => Err(CompilerError::parse(token.str_value.clone())),
            Some(token) => Err(self.error(format!("Unconsumed token {}", token.str_value))),
        }
    }

    /// `expr & behavior:arg`
    fn parse_binding_behavior(&mut self) -> Result<Expression> {
        let mut result = self.parse_value_converter()?;
        while self.consume_optional_operator("&") {
            let name = self.expect_identifier()?;
            let mut args = Vec::new();
            while self.consume_optional_character(':') {
                args.push(self.parse_assignment()?);
            }
            result = Expression::BindingBehavior {
                expression: Box::new(result),
                name,
                args,
            };
        }
        Ok(result)
    }

    /// `expr | converter:arg`
    fn parse_value_converter(&mut self) -> Result<Expression> {
        let mut result = self.parse_assignment()?;
        while self.consume_optional_operator("|") {
            let name = self.expect_identifier()?;
            let mut args = Vec::new();
            while self.consume_optional_character(':') {
                args.push(self.parse_assignment()?);
            }
            result = Expression::ValueConverter {
                expression: Box::new(result),
                name,
                args,
            };
        }
        Ok(result)
    }

    fn parse_assignment(&mut self) -> Result<Expression> {
        let target = self.parse_conditional()?;
        if self.consume_optional_operator("=") {
            if !target.is_assignable() {
                return Err(self.error("Left hand side of expression is not assignable"));
            }
            let value = self.parse_assignment()?;
            return Ok(Expression::Assign {
                target: Box::new(target),
                value: Box::new(value),
            });
        }
        Ok(target)
    }

    fn parse_conditional(&mut self) -> Result<Expression> {
        let condition = self.parse_binary(1)?;
        if self.consume_optional_operator("?") {
            let yes = self.parse_assignment()?;
            self.expect_character(':')?;
            let no = self.parse_assignment()?;
            return Ok(Expression::Conditional {
                condition: Box::new(condition),
                yes: Box::new(yes),
                no: Box::new(no),
            });
        }
        Ok(condition)
    }

    /// Precedence climbing over the binary operator table
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let Some(precedence) = self.current().and_then(binary_precedence) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            let operation = self.current().map(|t| t.str_value.clone()).unwrap_or_default();
            self.advance();
            let right = self.parse_binary(precedence + 1)?;
            left = Expression::Binary {
                operation,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        let operation = match self.current() {
            Some(token)
                if token.is_operator("!") || token.is_operator("-") || token.is_operator("+") =>
            {
                Some(token.str_value.clone())
            }
            Some(token) if token.is_keyword_value("typeof") || token.is_keyword_value("void") => {
                Some(token.str_value.clone())
            }
            _ => None,
        };
        if let Some(operation) = operation {
            self.advance();
            let expression = self.parse_unary()?;
            return Ok(Expression::Unary {
                operation,
                expression: Box::new(expression),
            });
        }
        self.parse_left_hand_side()
    }

    fn parse_left_hand_side(&mut self) -> Result<Expression> {
        let mut result = self.parse_primary()?;
        loop {
            if self.consume_optional_character('.') {
                let name = self.expect_identifier()?;
                if self.consume_optional_character('(') {
                    let args = self.parse_call_arguments()?;
                    result = Expression::CallMember {
                        object: Box::new(result),
                        name,
                        args,
                    };
                } else {
                    result = Expression::AccessMember {
                        object: Box::new(result),
                        name,
                    };
                }
            } else if self.consume_optional_character('[') {
                let key = self.parse_binding_behavior()?;
                self.expect_character(']')?;
                result = Expression::AccessKeyed {
                    object: Box::new(result),
                    key: Box::new(key),
                };
            } else if self.consume_optional_character('(') {
                let args = self.parse_call_arguments()?;
                result = Expression::CallFunction {
                    func: Box::new(result),
                    args,
                };
            } else {
                return Ok(result);
            }
        }
    }

    /// Arguments after an already consumed `(`
    fn parse_call_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.consume_optional_character(')') {
            return Ok(args);
        }
        loop {
            args.push(self.parse_assignment()?);
            if !self.consume_optional_character(',') {
                break;
            }
        }
        self.expect_character(')')?;
        Ok(args)
    }

    /// `$this`, `$parent` chains and bare identifiers resolve against the
    /// scope with an ancestor count.
    fn parse_scope_access(&mut self) -> Result<Expression> {
        let mut ancestor = 0;
        let mut is_this = false;
        loop {
            match self.current() {
                Some(token) if token.is_keyword_value("$parent") => {
                    ancestor += 1;
                    self.advance();
                }
                Some(token) if token.is_keyword_value("$this") && ancestor == 0 && !is_this => {
                    is_this = true;
                    self.advance();
                }
                _ => break,
            }
            let continues = matches!(
                (self.current(), self.tokens.get(self.index + 1)),
                (Some(dot), Some(next)) if dot.is_character('.') && next.is_keyword_value("$parent")
            );
            if continues {
                self.advance();
            } else {
                break;
            }
        }

        let is_ancestor_access = ancestor > 0 || is_this;
        if is_ancestor_access {
            let followed_by_name = matches!(
                (self.current(), self.tokens.get(self.index + 1)),
                (Some(dot), Some(next)) if dot.is_character('.') && (next.is_identifier() || next.is_keyword())
            );
            if !followed_by_name {
                return Ok(Expression::AccessThis { ancestor });
            }
            self.advance();
        }

        let name = self.expect_identifier()?;
        if self.consume_optional_character('(') {
            let args = self.parse_call_arguments()?;
            return Ok(Expression::CallScope {
                name,
                args,
                ancestor,
            });
        }
        Ok(Expression::AccessScope { name, ancestor })
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        let Some(token) = self.current().cloned() else {
            return Err(self.error("Unexpected end of expression"));
        };

        if token.is_error() {
            return Err(CompilerError::parse(token.str_value));
        }
        if token.is_character('(') {
            self.advance();
            let expression = self.parse_binding_behavior()?;
            self.expect_character(')')?;
            return Ok(expression);
        }
        if token.is_character('[') {
            self.advance();
            let mut elements = Vec::new();
            if !self.consume_optional_character(']') {
                loop {
                    elements.push(self.parse_assignment()?);
                    if !self.consume_optional_character(',') {
                        break;
                    }
                }
                self.expect_character(']')?;
            }
            return Ok(Expression::ArrayLiteral { elements });
        }
        if token.is_character('{') {
            return self.parse_object_literal();
        }
        if token.is_number() {
            self.advance();
            return Ok(Expression::number(token.num_value));
        }
        if token.is_string() {
            self.advance();
            return Ok(Expression::string(token.str_value));
        }
        if token.is_keyword() {
            let literal = match token.str_value.as_str() {
                "null" => Some(Literal::Null),
                "undefined" => Some(Literal::Undefined),
                "true" => Some(Literal::Boolean(true)),
                "false" => Some(Literal::Boolean(false)),
                _ => None,
            };
            if let Some(value) = literal {
                self.advance();
                return Ok(Expression::PrimitiveLiteral { value });
            }
            if token.str_value == "$this" || token.str_value == "$parent" {
                return self.parse_scope_access();
            }
        }
        if token.is_identifier() {
            return self.parse_scope_access();
        }
        Err(self.error(format!("Unexpected token {}", token.str_value)))
    }

    fn parse_object_literal(&mut self) -> Result<Expression> {
        self.expect_character('{')?;
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.consume_optional_character('}') {
            loop {
                let key = match self.current() {
                    Some(token) if token.is_string() || token.is_identifier() || token.is_keyword() => {
                        token.str_value.clone()
                    }
                    Some(token) if token.is_number() => token.num_value.to_string(),
                    _ => return Err(self.error("Invalid object literal key")),
                };
                let is_identifier = self.current().map(|t| t.is_identifier()).unwrap_or(false);
                self.advance();
                let value = if self.consume_optional_character(':') {
                    self.parse_assignment()?
                } else if is_identifier {
                    Expression::scope(key.clone())
                } else {
                    return Err(self.error("Missing expected :"));
                };
                keys.push(key);
                values.push(value);
                if !self.consume_optional_character(',') {
                    break;
                }
            }
            self.expect_character('}')?;
        }
        Ok(Expression::ObjectLiteral { keys, values })
    }

    /// Left side of `for`: identifier, `[a, b]` or `{a, b}`
    fn parse_binding_declaration(&mut self) -> Result<Expression> {
        if self.consume_optional_character('[') {
            let mut elements = Vec::new();
            loop {
                elements.push(self.parse_binding_identifier()?);
                if !self.consume_optional_character(',') {
                    break;
                }
            }
            self.expect_character(']')?;
            return Ok(Expression::ArrayBindingPattern { elements });
        }
        if self.consume_optional_character('{') {
            let mut keys = Vec::new();
            let mut values = Vec::new();
            loop {
                let key = self.expect_identifier()?;
                let value = if self.consume_optional_character(':') {
                    self.parse_binding_identifier()?
                } else {
                    Expression::identifier(key.clone())
                };
                keys.push(key);
                values.push(value);
                if !self.consume_optional_character(',') {
                    break;
                }
            }
            self.expect_character('}')?;
            return Ok(Expression::ObjectBindingPattern { keys, values });
        }
        self.parse_binding_identifier()
    }

    fn parse_binding_identifier(&mut self) -> Result<Expression> {
        match self.current() {
            Some(token) if token.is_identifier() => {
                let name = token.str_value.clone();
                self.advance();
                Ok(Expression::identifier(name))
            }
            _ => Err(self.error("Expected binding identifier")),
        }
    }
}
