//! Markup serializer
//!
//! Writes a node tree back out as HTML, the way a DOM's `outerHTML` would.

use super::ast::*;
use super::html_tags::get_html_tag_definition;
use super::tags::TagContentType;

struct SerializerVisitor {
    out: String,
    raw_text: bool,
}

impl SerializerVisitor {
    fn new() -> Self {
        SerializerVisitor {
            out: String::new(),
            raw_text: false,
        }
    }

    fn visit_attribute(&mut self, attr: &Attribute) {
        self.out.push(' ');
        self.out.push_str(&attr.name);
        self.out.push_str("=\"");
        escape_into(&mut self.out, &attr.value, true);
        self.out.push('"');
    }
}

impl Visitor for SerializerVisitor {
    fn visit_element(&mut self, element: &Element) {
        self.out.push('<');
        self.out.push_str(&element.name);
        for attr in &element.attrs {
            self.visit_attribute(attr);
        }
        self.out.push('>');

        let tag_def = get_html_tag_definition(&element.name);
        if tag_def.is_void() {
            return;
        }
        let was_raw = self.raw_text;
        self.raw_text = tag_def.content_type() != TagContentType::ParsableData;
        visit_all(self, &element.children);
        self.raw_text = was_raw;

        self.out.push_str("</");
        self.out.push_str(&element.name);
        self.out.push('>');
    }

    fn visit_text(&mut self, text: &Text) {
        if self.raw_text {
            self.out.push_str(&text.value);
        } else {
            escape_into(&mut self.out, &text.value, false);
        }
    }

    fn visit_comment(&mut self, comment: &Comment) {
        self.out.push_str("<!--");
        self.out.push_str(&comment.value);
        self.out.push_str("-->");
    }
}

fn escape_into(out: &mut String, value: &str, in_attribute: bool) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut visitor = SerializerVisitor::new();
    visit_all(&mut visitor, nodes);
    visitor.out
}

pub fn serialize_element(element: &Element) -> String {
    let mut visitor = SerializerVisitor::new();
    visitor.visit_element(element);
    visitor.out
}
