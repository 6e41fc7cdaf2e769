//! HTML Tag Definitions
//!
//! Void elements, raw-text elements and the implied end-tag rules the tree
//! builder needs to produce the same element nesting a browser would.

use super::tags::{is_custom_element_name, TagContentType, TagDefinition};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

/// HTML tag definition with specific parsing rules
#[derive(Debug, Clone)]
pub struct HtmlTagDefinition {
    pub closed_by_children: HashSet<String>,
    pub content_type: TagContentType,
    pub closed_by_parent: bool,
    pub is_void: bool,
    pub ignore_first_lf: bool,
    pub can_self_close: bool,
}

impl HtmlTagDefinition {
    pub fn new() -> Self {
        HtmlTagDefinition {
            closed_by_children: HashSet::new(),
            content_type: TagContentType::ParsableData,
            closed_by_parent: false,
            is_void: false,
            ignore_first_lf: false,
            can_self_close: false,
        }
    }

    pub fn with_void(mut self, is_void: bool) -> Self {
        self.is_void = is_void;
        self.closed_by_parent = self.closed_by_parent || is_void;
        self.can_self_close = is_void;
        self
    }

    pub fn with_closed_by_children(mut self, children: &[&str]) -> Self {
        self.closed_by_children
            .extend(children.iter().map(|c| c.to_lowercase()));
        self
    }

    pub fn with_closed_by_parent(mut self, closed_by_parent: bool) -> Self {
        self.closed_by_parent = closed_by_parent;
        self
    }

    pub fn with_content_type(mut self, content_type: TagContentType) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn with_ignore_first_lf(mut self, ignore: bool) -> Self {
        self.ignore_first_lf = ignore;
        self
    }

    pub fn with_can_self_close(mut self, can_self_close: bool) -> Self {
        self.can_self_close = can_self_close;
        self
    }
}

impl Default for HtmlTagDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl TagDefinition for HtmlTagDefinition {
    fn closed_by_parent(&self) -> bool {
        self.closed_by_parent
    }

    fn is_void(&self) -> bool {
        self.is_void
    }

    fn ignore_first_lf(&self) -> bool {
        self.ignore_first_lf
    }

    fn can_self_close(&self) -> bool {
        self.can_self_close
    }

    fn is_closed_by_child(&self, name: &str) -> bool {
        self.is_void || self.closed_by_children.contains(&name.to_lowercase())
    }

    fn content_type(&self) -> TagContentType {
        self.content_type
    }
}

static DEFAULT_TAG_DEFINITION: Lazy<HtmlTagDefinition> = Lazy::new(HtmlTagDefinition::new);

static CUSTOM_TAG_DEFINITION: Lazy<HtmlTagDefinition> =
    Lazy::new(|| HtmlTagDefinition::new().with_can_self_close(true));

/// Tag definitions registry
static TAG_DEFINITIONS: Lazy<HashMap<&'static str, HtmlTagDefinition>> = Lazy::new(|| {
    let mut defs = HashMap::new();

    for void in [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ] {
        defs.insert(void, HtmlTagDefinition::new().with_void(true));
    }

    defs.insert(
        "p",
        HtmlTagDefinition::new()
            .with_closed_by_children(&[
                "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer",
                "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "main",
                "nav", "ol", "p", "pre", "section", "table", "ul",
            ])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "thead",
        HtmlTagDefinition::new().with_closed_by_children(&["tbody", "tfoot"]),
    );
    defs.insert(
        "tbody",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["tbody", "tfoot"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "tfoot",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["tbody"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "tr",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["tr"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "td",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["td", "th"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "th",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["td", "th"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "li",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["li"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "dt",
        HtmlTagDefinition::new().with_closed_by_children(&["dt", "dd"]),
    );
    defs.insert(
        "dd",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["dt", "dd"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "optgroup",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["optgroup"])
            .with_closed_by_parent(true),
    );
    defs.insert(
        "option",
        HtmlTagDefinition::new()
            .with_closed_by_children(&["option", "optgroup"])
            .with_closed_by_parent(true),
    );
    defs.insert("pre", HtmlTagDefinition::new().with_ignore_first_lf(true));
    defs.insert("listing", HtmlTagDefinition::new().with_ignore_first_lf(true));
    defs.insert(
        "style",
        HtmlTagDefinition::new().with_content_type(TagContentType::RawText),
    );
    defs.insert(
        "script",
        HtmlTagDefinition::new().with_content_type(TagContentType::RawText),
    );
    defs.insert(
        "title",
        HtmlTagDefinition::new().with_content_type(TagContentType::EscapableRawText),
    );
    defs.insert(
        "textarea",
        HtmlTagDefinition::new()
            .with_content_type(TagContentType::EscapableRawText)
            .with_ignore_first_lf(true),
    );

    defs
});

/// Get HTML tag definition for a (lower-cased) tag name
pub fn get_html_tag_definition(tag_name: &str) -> &'static dyn TagDefinition {
    if let Some(def) = TAG_DEFINITIONS.get(tag_name) {
        return def;
    }
    let lower = tag_name.to_lowercase();
    if let Some(def) = TAG_DEFINITIONS.get(lower.as_str()) {
        return def;
    }
    if is_custom_element_name(&lower) {
        return &*CUSTOM_TAG_DEFINITION;
    }
    &*DEFAULT_TAG_DEFINITION
}
