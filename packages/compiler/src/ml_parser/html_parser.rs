//! HTML Parser
//!
//! Wrapper around `Parser` wired to the HTML tag definitions.

use super::html_tags::get_html_tag_definition;
use super::parser::{ParseTreeResult, Parser};
use super::tags::TagDefinition;

/// HTML parser (generic `Parser` with HTML tag definitions)
pub struct HtmlParser {}

impl HtmlParser {
    pub fn new() -> Self {
        HtmlParser {}
    }

    /// Parse template source into root nodes and collected errors
    pub fn parse(&self, source: &str) -> ParseTreeResult {
        fn tag_def(name: &str) -> &'static dyn TagDefinition {
            get_html_tag_definition(name)
        }

        Parser::new(tag_def).parse(source)
    }
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}
