//! Template controller extraction
//!
//! An element carrying controller attributes is moved into a nested
//! definition and replaced by a marker. The first declared controller is
//! outermost; each further one is extracted from inside the previous body.

use super::assembler::InstructionCollector;
use super::element_compiler::AS_ELEMENT;
use super::instructions::Instruction;
use super::ref_resolver::is_ref_syntax;
use super::TemplateCompiler;
use crate::error::{CompilerError, Result};
use crate::ml_parser::ast::{Element, Node};
use crate::resources::ResourceDescriptor;
use crate::util::split_at_last_period;

impl<'a> TemplateCompiler<'a> {
    /// Index and resource of the first controller attribute on `el`
    pub(crate) fn first_template_controller(&self, el: &Element) -> Option<(usize, &'a ResourceDescriptor)> {
        el.attrs.iter().enumerate().find_map(|(index, attr)| {
            if attr.name == AS_ELEMENT || is_ref_syntax(&attr.name) {
                return None;
            }
            let (prefix, _) = split_at_last_period(&attr.name);
            self.resources
                .find_attribute(prefix)
                .filter(|res| res.is_template_controller)
                .map(|res| (index, res))
        })
    }

    pub(crate) fn compile_template_controllers(
        &self,
        el: &mut Element,
        collector: &mut InstructionCollector<'_>,
    ) -> Result<()> {
        let host = std::mem::replace(el, collector.marker());
        let instruction = self.extract_template_controller(host)?;
        if let Instruction::HydrateTemplateController { def, .. } = &instruction {
            if def.has_slots {
                collector.mark_slots();
            }
        }
        collector.push_marker_group(vec![instruction]);
        Ok(())
    }

    fn extract_template_controller(&self, mut host: Element) -> Result<Instruction> {
        let Some((index, resource)) = self.first_template_controller(&host) else {
            return Err(CompilerError::compile(format!(
                "<{}> has no template controller to extract",
                host.name
            )));
        };
        let attr = host.attrs.remove(index);
        log::trace!("extracting template controller \"{}\" from <{}>", resource.name, host.name);

        let instructions = self.compile_custom_attribute(resource, &attr.name, &attr.value)?;

        // A <template> host with no attributes left becomes the body root.
        // Anything else is wrapped so its remaining attributes still compile.
        let def = if host.is_template() && host.attrs.is_empty() {
            self.compile_definition(host)?
        } else {
            let template = Element::synthetic("template").with_children(vec![Node::Element(host)]);
            self.compile_definition(template)?
        };

        Ok(Instruction::HydrateTemplateController {
            res: resource.name.clone(),
            def: Box::new(def),
            instructions,
            link: resource.name == "else",
        })
    }
}
