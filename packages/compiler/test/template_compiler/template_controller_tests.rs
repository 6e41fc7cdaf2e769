/**
 * Template Controller Tests
 *
 * Extraction of `if`, `else`, `repeat` and `with` into nested definitions,
 * controller ordering, and what moves into the nested body.
 */

#[path = "util/mod.rs"]
mod util;

#[cfg(test)]
mod tests {
    use super::util::*;

    mod single_controller {
        use super::*;

        #[test]
        fn should_extract_the_host_into_a_nested_definition() {
            let def = compile("<div if.bind=\"show\">x</div>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateTemplateController if [propertyBinding value=show toView]"]])
            );
            assert_eq!(def.template_html(), "<template><au-m class=\"au\"></au-m></template>");

            let nested = controller_def(&def, 0);
            assert_eq!(nested.template_html(), "<template><div>x</div></template>");
            assert!(nested.instructions.is_empty());
        }

        #[test]
        fn should_move_remaining_attributes_into_the_body() {
            let def = compile("<div if.bind=\"a\" class=\"c\" title.bind=\"t\"></div>");
            let nested = controller_def(&def, 0);
            assert_eq!(humanize_definition(nested), groups(&[&["propertyBinding title=t toView"]]));
            assert_eq!(
                nested.template_html(),
                "<template><div class=\"c au\" title.bind=\"t\"></div></template>"
            );
        }

        #[test]
        fn should_compile_repeat_as_an_iterator() {
            let def = compile("<li repeat.for=\"item of items\">${item}</li>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateTemplateController repeat [iteratorBinding items=item of items]"]])
            );
            let nested = controller_def(&def, 0);
            assert_eq!(humanize_definition(nested), groups(&[&["textBinding ${item}"]]));
            assert_eq!(nested.template_html(), "<template><li><au-m class=\"au\"></au-m></li></template>");
        }

        #[test]
        fn should_compile_literal_and_interpolated_values() {
            assert_eq!(
                humanize_definition(&compile("<div if=\"true\"></div>")),
                groups(&[&["hydrateTemplateController if [setProperty value='true']"]])
            );
            assert_eq!(
                humanize_definition(&compile("<div with=\"${a}\"></div>")),
                groups(&[&["hydrateTemplateController with [interpolation value=${a}]"]])
            );
        }

        #[test]
        fn should_use_a_template_host_as_the_body_root() {
            let def = compile("<template><template if.bind=\"a\"><span>x</span></template></template>");
            assert_eq!(def.template_html(), "<template><au-m class=\"au\"></au-m></template>");
            let nested = controller_def(&def, 0);
            assert_eq!(nested.template_html(), "<template><span>x</span></template>");
        }

        #[test]
        fn should_compile_the_other_attributes_of_a_template_host() {
            let def = compile("<template><template if.bind=\"a\" class.bind=\"c\">x</template></template>");
            let nested = controller_def(&def, 0);
            assert_eq!(humanize_definition(nested), groups(&[&["propertyBinding class=c toView"]]));
            assert_eq!(
                nested.template_html(),
                "<template><template class.bind=\"c\" class=\"au\">x</template></template>"
            );
        }

        #[test]
        fn should_extract_controllers_from_custom_elements() {
            let def = compile("<my-el if.bind=\"a\" value.bind=\"b\"></my-el>");
            let nested = controller_def(&def, 0);
            assert_eq!(
                humanize_definition(nested),
                groups(&[&["hydrateElement my-el [propertyBinding value=b toView]"]])
            );
        }

        #[test]
        fn should_leave_refs_to_the_body() {
            let def = compile("<div ref=\"el\" if.bind=\"a\"></div>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateTemplateController if [propertyBinding value=a toView]"]])
            );
            assert_eq!(
                humanize_definition(controller_def(&def, 0)),
                groups(&[&["refBinding el -> element"]])
            );
        }
    }

    mod multiple_controllers {
        use super::*;

        #[test]
        fn should_nest_in_declaration_order() {
            let def = compile("<div if.bind=\"a\" repeat.for=\"item of items\"></div>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateTemplateController if [propertyBinding value=a toView]"]])
            );

            let outer = controller_def(&def, 0);
            assert_eq!(outer.template_html(), "<template><au-m class=\"au\"></au-m></template>");
            assert_eq!(
                humanize_definition(outer),
                groups(&[&["hydrateTemplateController repeat [iteratorBinding items=item of items]"]])
            );

            let inner = controller_def(outer, 0);
            assert_eq!(inner.template_html(), "<template><div></div></template>");
        }

        #[test]
        fn should_follow_attribute_order_not_controller_kind() {
            let def = compile("<div repeat.for=\"i of items\" if.bind=\"i\"></div>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[&["hydrateTemplateController repeat [iteratorBinding items=i of items]"]])
            );
            assert_eq!(
                humanize_definition(controller_def(&def, 0)),
                groups(&[&["hydrateTemplateController if [propertyBinding value=i toView]"]])
            );
        }

        #[test]
        fn should_wrap_a_template_host_with_more_controllers() {
            let def = compile("<template><template if.bind=\"a\" with.bind=\"b\">x</template></template>");
            let outer = controller_def(&def, 0);
            assert_eq!(outer.template_html(), "<template><au-m class=\"au\"></au-m></template>");
            let inner = controller_def(outer, 0);
            assert_eq!(inner.template_html(), "<template>x</template>");
        }

        #[test]
        fn should_compile_nested_elements_with_controllers() {
            let def = compile("<div if.bind=\"a\"><span repeat.for=\"x of xs\">${x}</span></div>");
            let body = controller_def(&def, 0);
            assert_eq!(
                body.template_html(),
                "<template><div><au-m class=\"au\"></au-m></div></template>"
            );
            let item = controller_def(body, 0);
            assert_eq!(humanize_definition(item), groups(&[&["textBinding ${x}"]]));
        }
    }

    mod else_link {
        use super::*;

        #[test]
        fn should_link_else_to_the_previous_if() {
            let def = compile("<div if.bind=\"a\"></div><div else></div>");
            assert_eq!(
                humanize_definition(&def),
                groups(&[
                    &["hydrateTemplateController if [propertyBinding value=a toView]"],
                    &["hydrateTemplateController else [setProperty value=''] link"],
                ])
            );
        }
    }

    mod slots {
        use super::*;

        #[test]
        fn should_propagate_slots_from_nested_bodies() {
            let def = compile("<div if.bind=\"a\"><slot></slot></div>");
            assert!(def.has_slots);
            assert!(controller_def(&def, 0).has_slots);
        }

        #[test]
        fn should_not_report_slots_when_there_are_none() {
            let def = compile("<div if.bind=\"a\"><span></span></div>");
            assert!(!def.has_slots);
        }
    }
}
