//! ML Parser
//!
//! Tree builder: folds the token stream into an owned element tree, applying
//! HTML's implied end-tag rules.

use super::ast::*;
use super::lexer::tokenize;
use super::tags::{is_custom_element_name, TagDefinition};
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceSpan};

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

impl ParseTreeResult {
    pub fn new(root_nodes: Vec<Node>, errors: Vec<ParseError>) -> Self {
        ParseTreeResult { root_nodes, errors }
    }
}

/// Main parser class
pub struct Parser {
    pub get_tag_definition: fn(&str) -> &'static dyn TagDefinition,
}

impl Parser {
    pub fn new(get_tag_definition: fn(&str) -> &'static dyn TagDefinition) -> Self {
        Parser { get_tag_definition }
    }

    pub fn parse(&self, source: &str) -> ParseTreeResult {
        let tokenize_result = tokenize(source, self.get_tag_definition);
        let mut tree_builder = TreeBuilder::new(tokenize_result.tokens, self.get_tag_definition);
        tree_builder.build();

        let mut errors = tokenize_result.errors;
        errors.extend(tree_builder.errors);
        ParseTreeResult::new(tree_builder.root_nodes, errors)
    }
}

/// Internal tree builder
struct TreeBuilder {
    tokens: std::vec::IntoIter<Token>,
    peek: Option<Token>,
    get_tag_definition: fn(&str) -> &'static dyn TagDefinition,
    element_stack: Vec<Element>,
    root_nodes: Vec<Node>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>, get_tag_definition: fn(&str) -> &'static dyn TagDefinition) -> Self {
        let mut tokens = tokens.into_iter();
        let peek = tokens.next();
        TreeBuilder {
            tokens,
            peek,
            get_tag_definition,
            element_stack: Vec::new(),
            root_nodes: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build(&mut self) {
        while let Some(token) = self.advance() {
            match token.token_type {
                TokenType::TagOpenStart => self.consume_element_start_tag(token),
                TokenType::TagClose => self.consume_element_end_tag(token),
                TokenType::CommentStart => self.consume_comment(token),
                TokenType::Text | TokenType::RawText => self.consume_text(token),
                TokenType::Eof => break,
                _ => {}
            }
        }

        // Unclosed elements at EOF are closed implicitly.
        while let Some(el) = self.element_stack.pop() {
            self.add_to_parent(Node::Element(el));
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let current = self.peek.take();
        self.peek = self.tokens.next();
        current
    }

    fn advance_if(&mut self, token_type: TokenType) -> Option<Token> {
        if self.peek.as_ref().map(|t| t.token_type) == Some(token_type) {
            self.advance()
        } else {
            None
        }
    }

    fn consume_comment(&mut self, start: Token) {
        let text = self.advance_if(TokenType::Text);
        let end = self.advance_if(TokenType::CommentEnd);
        let end_span = end
            .map(|t| t.source_span.end)
            .or_else(|| text.as_ref().map(|t| t.source_span.end))
            .unwrap_or(start.source_span.end);
        let value = text.map(|t| t.part().to_string()).unwrap_or_default();
        let span = ParseSourceSpan::new(start.source_span.start, end_span);
        self.add_to_parent(Node::Comment(Comment::new(value, span)));
    }

    fn consume_text(&mut self, token: Token) {
        let mut value = token.part().to_string();
        if value.starts_with('\n') {
            if let Some(parent) = self.element_stack.last() {
                if parent.children.is_empty() && (self.get_tag_definition)(&parent.name).ignore_first_lf() {
                    value.remove(0);
                }
            }
        }
        if value.is_empty() {
            return;
        }

        // Adjacent text merges into one node.
        let siblings = match self.element_stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.root_nodes,
        };
        if let Some(Node::Text(prev)) = siblings.last_mut() {
            prev.value.push_str(&value);
            prev.source_span.end = token.source_span.end;
            return;
        }
        siblings.push(Node::Text(Text::new(value, token.source_span)));
    }

    fn consume_attr(&mut self, name_token: Token) -> Attribute {
        let name = name_token.part().to_string();
        let mut end = name_token.source_span.end;
        let mut value = String::new();
        let mut value_span = None;

        if let Some(quote) = self.advance_if(TokenType::AttrQuote) {
            end = quote.source_span.end;
        }
        if let Some(value_token) = self.advance_if(TokenType::AttrValueText) {
            value = value_token.part().to_string();
            value_span = Some(value_token.source_span);
            end = value_token.source_span.end;
        }
        if let Some(quote) = self.advance_if(TokenType::AttrQuote) {
            end = quote.source_span.end;
        }

        Attribute {
            name,
            value,
            source_span: ParseSourceSpan::new(name_token.source_span.start, end),
            value_span,
        }
    }

    fn consume_element_start_tag(&mut self, start_token: Token) {
        let name = start_token.part().to_string();
        let mut attrs = Vec::new();
        while let Some(attr_name) = self.advance_if(TokenType::AttrName) {
            attrs.push(self.consume_attr(attr_name));
        }

        let tag_def = (self.get_tag_definition)(&name);
        let mut end = start_token.source_span.end;
        let mut self_closing = false;
        if let Some(token) = self.advance_if(TokenType::TagOpenEndVoid) {
            end = token.source_span.end;
            self_closing = true;
            if !(tag_def.can_self_close() || tag_def.is_void() || is_custom_element_name(&name)) {
                self.errors.push(ParseError::new(
                    start_token.source_span,
                    format!("Only void and custom elements can be self closed \"{}\"", name),
                ));
            }
        } else if let Some(token) = self.advance_if(TokenType::TagOpenEnd) {
            end = token.source_span.end;
        }

        let start_span = ParseSourceSpan::new(start_token.source_span.start, end);
        let element = Element {
            name: name.clone(),
            attrs,
            children: Vec::new(),
            is_self_closing: self_closing,
            is_void: tag_def.is_void(),
            source_span: start_span,
            start_source_span: start_span,
            end_source_span: None,
        };

        let closed_by_child = self
            .element_stack
            .last()
            .map(|parent| (self.get_tag_definition)(&parent.name).is_closed_by_child(&name))
            .unwrap_or(false);
        if closed_by_child {
            if let Some(parent) = self.element_stack.pop() {
                self.add_to_parent(Node::Element(parent));
            }
        }

        if self_closing || tag_def.is_void() {
            let mut completed = element;
            completed.end_source_span = Some(start_span);
            self.add_to_parent(Node::Element(completed));
        } else {
            self.element_stack.push(element);
        }
    }

    fn consume_element_end_tag(&mut self, end_token: Token) {
        let name = end_token.part().to_string();
        if (self.get_tag_definition)(&name).is_void() {
            self.errors.push(ParseError::new(
                end_token.source_span,
                format!("Void elements do not have end tags \"{}\"", name),
            ));
            return;
        }

        let Some(match_index) = self.element_stack.iter().rposition(|el| el.name == name) else {
            self.errors.push(ParseError::new(
                end_token.source_span,
                format!(
                    "Unexpected closing tag \"{}\". It may happen when the tag has already been closed by another tag.",
                    name
                ),
            ));
            return;
        };

        while self.element_stack.len() > match_index {
            let Some(mut el) = self.element_stack.pop() else {
                break;
            };
            if self.element_stack.len() == match_index {
                el.end_source_span = Some(end_token.source_span);
                el.source_span = ParseSourceSpan::new(el.start_source_span.start, end_token.source_span.end);
            } else if !(self.get_tag_definition)(&el.name).closed_by_parent() {
                self.errors.push(ParseError::new(
                    el.start_source_span,
                    format!("Unclosed element \"{}\"", el.name),
                ));
            }
            self.add_to_parent(Node::Element(el));
        }
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.element_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }
}
