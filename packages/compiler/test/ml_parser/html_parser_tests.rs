/**
 * HTML Parser Tests
 *
 * Tree building, implied end tags, attribute decoding and error recovery
 * for the markup parser used by the template compiler.
 */

#[cfg(test)]
mod tests {
    use view_compiler::ml_parser::{serialize_nodes, HtmlParser, Node, ParseTreeResult};

    fn parse(html: &str) -> ParseTreeResult {
        HtmlParser::new().parse(html)
    }

    /// Flattens the tree to `[kind, name-or-value, depth]` rows.
    fn humanize_dom(result: &ParseTreeResult) -> Vec<(String, String, usize)> {
        assert!(
            result.errors.is_empty(),
            "unexpected parse errors: {:?}",
            result.errors.iter().map(|e| e.msg.clone()).collect::<Vec<_>>()
        );
        let mut rows = Vec::new();
        humanize_nodes(&result.root_nodes, 0, &mut rows);
        rows
    }

    fn humanize_nodes(nodes: &[Node], depth: usize, rows: &mut Vec<(String, String, usize)>) {
        for node in nodes {
            match node {
                Node::Element(el) => {
                    rows.push(("Element".to_string(), el.name.clone(), depth));
                    for attr in &el.attrs {
                        rows.push(("Attribute".to_string(), format!("{}={}", attr.name, attr.value), depth + 1));
                    }
                    humanize_nodes(&el.children, depth + 1, rows);
                }
                Node::Text(text) => rows.push(("Text".to_string(), text.value.clone(), depth)),
                Node::Comment(comment) => rows.push(("Comment".to_string(), comment.value.clone(), depth)),
            }
        }
    }

    fn row(kind: &str, value: &str, depth: usize) -> (String, String, usize) {
        (kind.to_string(), value.to_string(), depth)
    }

    mod text_nodes {
        use super::*;

        #[test]
        fn should_parse_root_level_text_nodes() {
            assert_eq!(humanize_dom(&parse("a")), vec![row("Text", "a", 0)]);
        }

        #[test]
        fn should_parse_text_nodes_inside_regular_elements() {
            assert_eq!(
                humanize_dom(&parse("<div>a</div>")),
                vec![row("Element", "div", 0), row("Text", "a", 1)]
            );
        }

        #[test]
        fn should_keep_binding_syntax_in_text_verbatim() {
            assert_eq!(
                humanize_dom(&parse("<p>${a} & ${b}</p>")),
                vec![row("Element", "p", 0), row("Text", "${a} & ${b}", 1)]
            );
        }

        #[test]
        fn should_decode_entities() {
            assert_eq!(
                humanize_dom(&parse("<span>&lt;a&gt; &#x41;</span>")),
                vec![row("Element", "span", 0), row("Text", "<a> A", 1)]
            );
        }

        #[test]
        fn should_drop_the_first_lf_of_textarea() {
            assert_eq!(
                humanize_dom(&parse("<textarea>\nvalue</textarea>")),
                vec![row("Element", "textarea", 0), row("Text", "value", 1)]
            );
        }
    }

    mod elements {
        use super::*;

        #[test]
        fn should_parse_nested_elements() {
            assert_eq!(
                humanize_dom(&parse("<template><div><span></span></div></template>")),
                vec![
                    row("Element", "template", 0),
                    row("Element", "div", 1),
                    row("Element", "span", 2),
                ]
            );
        }

        #[test]
        fn should_lowercase_tag_names() {
            assert_eq!(humanize_dom(&parse("<DIV></DIV>")), vec![row("Element", "div", 0)]);
        }

        #[test]
        fn should_parse_void_elements_without_end_tags() {
            assert_eq!(
                humanize_dom(&parse("<div><input><br>a</div>")),
                vec![
                    row("Element", "div", 0),
                    row("Element", "input", 1),
                    row("Element", "br", 1),
                    row("Text", "a", 1),
                ]
            );
        }

        #[test]
        fn should_self_close_custom_elements() {
            assert_eq!(
                humanize_dom(&parse("<my-el/><au-compose/>")),
                vec![row("Element", "my-el", 0), row("Element", "au-compose", 0)]
            );
        }

        #[test]
        fn should_close_list_items_implicitly() {
            assert_eq!(
                humanize_dom(&parse("<ul><li>a<li>b</ul>")),
                vec![
                    row("Element", "ul", 0),
                    row("Element", "li", 1),
                    row("Text", "a", 2),
                    row("Element", "li", 1),
                    row("Text", "b", 2),
                ]
            );
        }

        #[test]
        fn should_close_paragraphs_on_block_children() {
            assert_eq!(
                humanize_dom(&parse("<p>a<div>b</div>")),
                vec![
                    row("Element", "p", 0),
                    row("Text", "a", 1),
                    row("Element", "div", 0),
                    row("Text", "b", 1),
                ]
            );
        }

        #[test]
        fn should_keep_raw_text_content() {
            assert_eq!(
                humanize_dom(&parse("<script>if (a < b) {}</script>")),
                vec![row("Element", "script", 0), row("Text", "if (a < b) {}", 1)]
            );
        }
    }

    mod attributes {
        use super::*;

        #[test]
        fn should_parse_binding_attributes() {
            assert_eq!(
                humanize_dom(&parse("<div value.bind=\"a\" click.trigger='go()' ref=el></div>")),
                vec![
                    row("Element", "div", 0),
                    row("Attribute", "value.bind=a", 1),
                    row("Attribute", "click.trigger=go()", 1),
                    row("Attribute", "ref=el", 1),
                ]
            );
        }

        #[test]
        fn should_parse_attributes_without_values() {
            assert_eq!(
                humanize_dom(&parse("<let to-view-model></let>")),
                vec![row("Element", "let", 0), row("Attribute", "to-view-model=", 1)]
            );
        }

        #[test]
        fn should_lowercase_attribute_names() {
            assert_eq!(
                humanize_dom(&parse("<div fooBar.bind=\"x\"></div>")),
                vec![row("Element", "div", 0), row("Attribute", "foobar.bind=x", 1)]
            );
        }

        #[test]
        fn should_decode_entities_in_values() {
            assert_eq!(
                humanize_dom(&parse("<div title=\"a &amp; b &quot;c&quot;\"></div>")),
                vec![row("Element", "div", 0), row("Attribute", "title=a & b \"c\"", 1)]
            );
        }

        #[test]
        fn should_record_value_spans() {
            let source = "<div a=\"hello\"></div>";
            let result = parse(source);
            let attr = &result.root_nodes[0].as_element().unwrap().attrs[0];
            assert_eq!(attr.value_span.unwrap().text(source), "hello");
            assert_eq!(attr.source_span.text(source), "a=\"hello\"");
        }
    }

    mod comments {
        use super::*;

        #[test]
        fn should_keep_comments() {
            assert_eq!(
                humanize_dom(&parse("<div><!-- note --></div>")),
                vec![row("Element", "div", 0), row("Comment", " note ", 1)]
            );
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_unexpected_closing_tags() {
            let result = parse("<div></p></div>");
            assert_eq!(result.errors.len(), 1);
            assert!(result.errors[0].msg.starts_with("Unexpected closing tag \"p\""));
        }

        #[test]
        fn should_report_end_tags_for_void_elements() {
            let result = parse("<input></input>");
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].msg, "Void elements do not have end tags \"input\"");
        }

        #[test]
        fn should_report_self_closed_regular_elements() {
            let result = parse("<div/>");
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].msg, "Only void and custom elements can be self closed \"div\"");
        }

        #[test]
        fn should_report_unclosed_elements_closed_by_an_ancestor() {
            let result = parse("<div><span></div>");
            assert_eq!(result.errors.len(), 1);
            assert_eq!(result.errors[0].msg, "Unclosed element \"span\"");
        }

        #[test]
        fn should_report_error_locations() {
            let result = parse("<div>\n  </p>\n</div>");
            assert_eq!(result.errors[0].span.start.line, 1);
            assert_eq!(result.errors[0].span.start.col, 2);
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn should_write_trees_back_out() {
            let source = "<template><div class=\"a\" value.bind=\"b\">x</div><input></template>";
            assert_eq!(serialize_nodes(&parse(source).root_nodes), source);
        }

        #[test]
        fn should_escape_text_and_attribute_values() {
            let result = parse("<div title=\"&quot;\">&lt;</div>");
            assert_eq!(serialize_nodes(&result.root_nodes), "<div title=\"&quot;\">&lt;</div>");
        }
    }
}
