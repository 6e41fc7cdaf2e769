/**
 * Special Element Tests
 *
 * Surrogate attributes on the root `<template>`, `<slot>`, `<let>`, and the
 * compiler's top-level entry points.
 */

#[path = "util/mod.rs"]
mod util;

#[cfg(test)]
mod tests {
    use super::util::*;
    use view_compiler::expression_parser::Expression;
    use view_compiler::{CompilerConfig, CompilerError, Instruction, ResourceRegistry, TemplateCompiler};

    mod surrogates {
        use super::*;

        #[test]
        fn should_compile_root_attributes_as_surrogates() {
            let def = compile("<template class=\"foo\" role.bind=\"r\" title=\"${t}\"><div></div></template>");
            assert_eq!(
                def.surrogates.iter().map(humanize_instruction).collect::<Vec<_>>(),
                vec![
                    "setProperty class='foo'",
                    "propertyBinding role=r toView",
                    "interpolation title=${t}",
                ]
            );
            assert!(def.instructions.is_empty());
            assert_eq!(def.template_html(), "<template><div></div></template>");
        }

        #[test]
        fn should_allow_whitespace_around_the_root() {
            let def = compile("\n  <template class=\"a\"></template>\n");
            assert_eq!(
                def.surrogates.iter().map(humanize_instruction).collect::<Vec<_>>(),
                vec!["setProperty class='a'"]
            );
        }

        #[test]
        fn should_hydrate_custom_attributes_on_the_root() {
            let def = compile("<template c-a.bind=\"x\" ref=\"host\"></template>");
            assert_eq!(
                def.surrogates.iter().map(humanize_instruction).collect::<Vec<_>>(),
                vec![
                    "hydrateAttribute c-a [propertyBinding value=x toView]",
                    "refBinding host -> element",
                ]
            );
        }

        #[test]
        fn should_reject_reserved_attributes() {
            for name in ["id", "part", "replace-part"] {
                let err = compile_err(&format!("<template {}=\"x\"></template>", name));
                assert_eq!(
                    err,
                    CompilerError::InvalidSurrogateAttribute {
                        name: name.to_string()
                    }
                );
            }
        }

        #[test]
        fn should_reject_template_controllers() {
            let err = compile_err("<template if.bind=\"a\"></template>");
            assert_eq!(
                err.to_string(),
                "Template controller \"if\" is not allowed on the surrogate template"
            );
        }

        #[test]
        fn should_have_none_without_a_template_root() {
            let def = compile("<div class=\"x\"></div>");
            assert!(def.surrogates.is_empty());
            assert_eq!(def.template_html(), "<template><div class=\"x\"></div></template>");
        }

        #[test]
        fn should_wrap_several_roots() {
            let def = compile("<template class=\"a\"></template><div></div>");
            assert!(def.surrogates.is_empty());
            assert_eq!(
                def.template_html(),
                "<template><template class=\"a\"></template><div></div></template>"
            );
        }
    }

    mod slots {
        use super::*;

        #[test]
        fn should_detect_slots() {
            assert!(compile("<div><slot name=\"header\"></slot></div>").has_slots);
            assert!(!compile("<div></div>").has_slots);
        }
    }

    mod let_element {
        use super::*;

        #[test]
        fn should_hydrate_an_empty_let() {
            let def = compile("<let></let>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateLetElement [] toViewModel=false"]])
            );
            assert_eq!(def.template_html(), "<template><let class=\"au\"></let></template>");
        }

        #[test]
        fn should_compile_let_bindings() {
            let def = compile("<let foo.bind=\"bar\" full-name=\"${first} ${last}\" plain=\"text\"></let>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&[
                    "hydrateLetElement [letBinding foo=bar; letBinding fullName=${first} ${last}; letBinding plain='text'] toViewModel=false"
                ]])
            );
        }

        #[test]
        fn should_read_to_view_model_anywhere() {
            for markup in [
                "<let to-view-model a.bind=\"b\"></let>",
                "<let a.bind=\"b\" to-view-model></let>",
            ] {
                assert_eq!(
                    humanize_definition(&compile(markup)),
                    groups(&[&["hydrateLetElement [letBinding a=b] toViewModel=true"]]),
                    "markup {}",
                    markup
                );
            }
        }

        #[test]
        fn should_extract_controllers_before_compiling_the_let() {
            let def = compile("<let if.bind=\"show\" a.bind=\"b\" to-view-model></let>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateTemplateController if [propertyBinding value=show toView]"]])
            );
            let nested = controller_def(&def, 0);
            assert_eq!(
                humanize_definition(nested),
                groups(&[&["hydrateLetElement [letBinding a=b] toViewModel=true"]])
            );
            assert_eq!(
                nested.template_html(),
                "<template><let a.bind=\"b\" to-view-model=\"\" class=\"au\"></let></template>"
            );
        }

        #[test]
        fn should_bind_escaped_segments_as_strings() {
            let def = compile("<let price=\"\\${cost}\"></let>");
            let Instruction::HydrateLetElement { instructions, .. } = &def.instructions[0][0] else {
                panic!("expected hydrateLetElement");
            };
            assert_eq!(
                instructions,
                &vec![Instruction::LetBinding {
                    to: "price".to_string(),
                    from: Expression::string("\\${cost}"),
                }]
            );
        }

        #[test]
        fn should_ignore_a_custom_element_named_let() {
            let def = compile("<let foo.bind=\"x\"></let>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateLetElement [letBinding foo=x] toViewModel=false"]])
            );
        }
    }

    mod entry_points {
        use super::*;

        #[test]
        fn should_be_deterministic() {
            let markup = "<div if.bind=\"a\"><my-el value.bind=\"v\">${x}</my-el></div><let y.bind=\"z\"></let>";
            assert_eq!(compile(markup), compile(markup));
        }

        #[test]
        fn should_report_markup_errors() {
            let err = compile_err("<div></span></div>");
            match err {
                CompilerError::Markup { message } => assert!(message.contains("Unexpected closing tag \"span\"")),
                other => panic!("expected a markup error, got {:?}", other),
            }
        }

        #[test]
        fn should_compile_many_templates_independently() {
            let resources = registry();
            let compiler = TemplateCompiler::new(&resources);
            let results = compiler.compile_all(&["<div a.bind=\"b\"></div>", "<p></p>", "<div></span>"]);
            assert_eq!(results.len(), 3);
            assert_eq!(results[0].as_ref().map(|d| d.instructions.len()), Ok(1));
            assert_eq!(results[1].as_ref().map(|d| d.instructions.len()), Ok(0));
            assert!(matches!(results[2], Err(CompilerError::Markup { .. })));
        }

        #[test]
        fn should_compile_through_the_free_function() {
            let resources = ResourceRegistry::with_builtins();
            let def = view_compiler::compile("<div if.bind=\"a\"></div>", &resources).unwrap();
            assert_eq!(def.instructions.len(), 1);
        }

        #[test]
        fn should_serialize_definitions_to_json() {
            let def = compile("<input value.bind=\"a\">");
            let json: serde_json::Value = serde_json::from_str(&def.to_json().unwrap()).unwrap();
            assert_eq!(json["instructions"][0][0]["type"], "propertyBinding");
            assert_eq!(json["instructions"][0][0]["to"], "value");
            assert_eq!(json["hasSlots"], false);
            assert_eq!(json["template"]["name"], "template");
        }

        #[test]
        fn should_honor_the_configured_marker_and_class() {
            let config = CompilerConfig {
                target_class: "tgt".to_string(),
                marker_tag: "x-m".to_string(),
                ..CompilerConfig::default()
            };
            let def = compile_with_config("<div if.bind=\"a\"></div><span title.bind=\"t\"></span>", config);
            assert_eq!(
                def.template_html(),
                "<template><x-m class=\"tgt\"></x-m><span title.bind=\"t\" class=\"tgt\"></span></template>"
            );
        }

        #[test]
        fn should_strip_whitespace_text_when_configured() {
            let config = CompilerConfig {
                strip_whitespace_text: true,
                ..CompilerConfig::default()
            };
            let def = compile_with_config("<div>\n  <span></span>\n</div>", config);
            assert_eq!(def.template_html(), "<template><div><span></span></div></template>");

            let kept = compile("<div>\n  <span></span>\n</div>");
            assert_eq!(kept.template_html(), "<template><div>\n  <span></span>\n</div></template>");
        }
    }
}
