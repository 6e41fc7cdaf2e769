//! ML Parser AST
//!
//! Owned markup tree produced by the parser and rewritten by the template
//! compiler. Source spans are kept for diagnostics but are not serialized.

use crate::parse_util::ParseSourceSpan;
use serde::{Deserialize, Serialize};

/// Node type union
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Whitespace-only text and comments
    pub fn is_insignificant(&self) -> bool {
        match self {
            Node::Text(text) => text.value.trim().is_empty(),
            Node::Comment(_) => true,
            Node::Element(_) => false,
        }
    }
}

/// Text node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
    #[serde(skip)]
    pub source_span: ParseSourceSpan,
}

impl Text {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Text { value, source_span }
    }
}

/// Comment node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub value: String,
    #[serde(skip)]
    pub source_span: ParseSourceSpan,
}

impl Comment {
    pub fn new(value: String, source_span: ParseSourceSpan) -> Self {
        Comment { value, source_span }
    }
}

/// Attribute node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    #[serde(skip)]
    pub source_span: ParseSourceSpan,
    #[serde(skip)]
    pub value_span: Option<ParseSourceSpan>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            source_span: ParseSourceSpan::default(),
            value_span: None,
        }
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    #[serde(skip)]
    pub is_self_closing: bool,
    #[serde(skip)]
    pub is_void: bool,
    #[serde(skip)]
    pub source_span: ParseSourceSpan,
    #[serde(skip)]
    pub start_source_span: ParseSourceSpan,
    #[serde(skip)]
    pub end_source_span: Option<ParseSourceSpan>,
}

impl Element {
    /// An element created by the compiler rather than read from markup.
    pub fn synthetic(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
            is_self_closing: false,
            is_void: false,
            source_span: ParseSourceSpan::default(),
            start_source_span: ParseSourceSpan::default(),
            end_source_span: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attr| attr.name == name)
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is_template(&self) -> bool {
        self.name == "template"
    }

    /// Append `class_name` to the `class` attribute, creating it if absent.
    pub fn add_class(&mut self, class_name: &str) {
        match self.attrs.iter_mut().find(|attr| attr.name == "class") {
            Some(attr) => {
                if !attr.value.split_whitespace().any(|c| c == class_name) {
                    if attr.value.trim().is_empty() {
                        attr.value = class_name.to_string();
                    } else {
                        attr.value = format!("{} {}", attr.value.trim_end(), class_name);
                    }
                }
            }
            None => self.attrs.push(Attribute::new("class", class_name)),
        }
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|attr| attr.value.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }
}

/// Visitor over markup nodes
pub trait Visitor {
    fn visit_element(&mut self, element: &Element);
    fn visit_text(&mut self, text: &Text);
    fn visit_comment(&mut self, comment: &Comment);
}

pub fn visit_all(visitor: &mut dyn Visitor, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Element(el) => visitor.visit_element(el),
            Node::Text(text) => visitor.visit_text(text),
            Node::Comment(comment) => visitor.visit_comment(comment),
        }
    }
}
