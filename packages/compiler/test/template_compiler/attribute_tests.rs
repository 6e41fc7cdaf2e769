/**
 * Attribute Tests
 *
 * Binding commands, interpolation and plain attributes on ordinary
 * elements, and how targets are tagged in the emitted markup.
 */

#[path = "util/mod.rs"]
mod util;

#[cfg(test)]
mod tests {
    use super::util::*;
    use view_compiler::CompilerError;

    mod binding_commands {
        use super::*;

        #[test]
        fn should_compile_binding_modes() {
            let cases = [
                ("value.bind", "propertyBinding value=a toView"),
                ("value.one-time", "propertyBinding value=a oneTime"),
                ("value.to-view", "propertyBinding value=a toView"),
                ("value.from-view", "propertyBinding value=a fromView"),
                ("value.two-way", "propertyBinding value=a twoWay"),
            ];
            for (attr, expected) in cases {
                let def = compile(&format!("<input {}=\"a\">", attr));
                assert_eq!(humanize_definition(&def), groups(&[&[expected]]), "attribute {}", attr);
            }
        }

        #[test]
        fn should_compile_listeners() {
            let cases = [
                ("click.trigger", "listenerBinding click=go($event) None true"),
                ("click.delegate", "listenerBinding click=go($event) Bubbling false"),
                ("click.capture", "listenerBinding click=go($event) Capturing false"),
            ];
            for (attr, expected) in cases {
                let def = compile(&format!("<button {}=\"go($event)\"></button>", attr));
                assert_eq!(humanize_definition(&def), groups(&[&[expected]]), "attribute {}", attr);
            }
        }

        #[test]
        fn should_compile_call_bindings() {
            let def = compile("<div handler.call=\"save(item)\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["callBinding handler=save(item)"]]));
        }

        #[test]
        fn should_keep_dashes_in_plain_targets() {
            let def = compile("<div aria-label.bind=\"label\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["propertyBinding aria-label=label toView"]]));
        }

        #[test]
        fn should_split_on_the_last_period() {
            let def = compile("<div style.color.bind=\"c\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["propertyBinding style.color=c toView"]]));
        }

        #[test]
        fn should_parse_expressions_with_converters() {
            let def = compile("<div text.bind=\"date | format:'short' & signal:'tick'\"></div>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["propertyBinding text=date | format:'short' & signal:'tick' toView"]])
            );
        }

        #[test]
        fn should_tolerate_unknown_commands_as_literals() {
            let def = compile("<div foo.qux=\"x\"></div>");
            assert!(def.instructions.is_empty());
            assert_eq!(def.template_html(), "<template><div foo.qux=\"x\"></div></template>");
        }

        #[test]
        fn should_accept_unicode_identifiers() {
            let def = compile("<div title.bind=\"café.名前\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["propertyBinding title=café.名前 toView"]]));
        }

        #[test]
        fn should_propagate_expression_errors() {
            let err = compile_err("<div value.bind=\"a b\"></div>");
            assert!(matches!(err, CompilerError::ParseError { .. }));
            assert!(err.to_string().contains("Unconsumed token b"));
        }
    }

    mod interpolation {
        use super::*;

        #[test]
        fn should_compile_interpolated_attributes() {
            let def = compile("<div title=\"Hello ${name}!\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["interpolation title=Hello ${name}!"]]));
        }

        #[test]
        fn should_prefer_commands_over_interpolation() {
            let def = compile("<div title.bind=\"'${x}'\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["propertyBinding title='${x}' toView"]]));
        }

        #[test]
        fn should_compile_interpolated_text() {
            let def = compile("<div>Hello ${name}!</div>");
            assert_eq!(humanize_definition(&def), groups(&[&["textBinding Hello ${name}!"]]));
            assert_eq!(def.template_html(), "<template><div><au-m class=\"au\"></au-m></div></template>");
        }

        #[test]
        fn should_leave_static_text_alone() {
            let def = compile("<div>Hello $name {x}</div>");
            assert!(def.instructions.is_empty());
        }

        #[test]
        fn should_treat_escaped_segments_as_literals() {
            let def = compile("<div title=\"\\${a}\">\\${b}</div>");
            assert!(def.instructions.is_empty());
            assert_eq!(
                def.template_html(),
                "<template><div title=\"\\${a}\">\\${b}</div></template>"
            );
        }

        #[test]
        fn should_keep_escaped_segments_next_to_real_ones() {
            let def = compile("<div title=\"\\${a} ${b}\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["interpolation title=${a} ${b}"]]));
        }
    }

    mod plain_attributes {
        use super::*;

        #[test]
        fn should_emit_nothing_for_literals() {
            let def = compile("<div title=\"hi\" class=\"x\"></div>");
            assert!(def.instructions.is_empty());
            assert_eq!(def.template_html(), "<template><div title=\"hi\" class=\"x\"></div></template>");
        }

        #[test]
        fn should_keep_literals_out_of_the_group() {
            let def = compile("<div title=\"hi\" value.bind=\"a\"></div>");
            assert_eq!(humanize_definition(&def), groups(&[&["propertyBinding value=a toView"]]));
        }
    }

    mod targets {
        use super::*;

        #[test]
        fn should_add_the_target_class() {
            let def = compile("<span text.bind=\"t\"></span>");
            assert_eq!(
                def.template_html(),
                "<template><span text.bind=\"t\" class=\"au\"></span></template>"
            );
        }

        #[test]
        fn should_extend_an_existing_class() {
            let def = compile("<div class=\"x\" value.bind=\"a\"></div>");
            assert_eq!(
                def.template_html(),
                "<template><div class=\"x au\" value.bind=\"a\"></div></template>"
            );
        }

        #[test]
        fn should_order_groups_by_document_position() {
            let def = compile("<div a.bind=\"x\"><span b.bind=\"y\"></span></div><p c.bind=\"z\"></p>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[
                    &["propertyBinding a=x toView"],
                    &["propertyBinding b=y toView"],
                    &["propertyBinding c=z toView"],
                ])
            );
        }

        #[test]
        fn should_keep_one_group_per_element() {
            let def = compile("<input value.two-way=\"v\" blur.trigger=\"done()\">");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["propertyBinding value=v twoWay", "listenerBinding blur=done() None true"]])
            );
        }
    }
}
