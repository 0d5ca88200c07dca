//! Template Compiler
//!
//! Drives the binding commands over an element tree. Every attribute is run
//! through the syntax parser; attributes carrying a command are resolved
//! against registered custom-element/custom-attribute metadata, built into
//! instructions, and stripped from the compiled output unless the command
//! keeps them. Instruction-bearing elements are annotated with a marker
//! attribute that the target-resolution pass later matches against the
//! instruction rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attribute_mapper::AttrMapper;
use crate::attribute_parser::{AttrSyntax, AttributeParser};
use crate::bindable::ResourceDefinition;
use crate::binding_command::{BindingCommandRegistry, CommandBuildInfo, CommandKind};
use crate::dom::Element;
use crate::error::{CompilerError, Result};
use crate::expression_parser::ExpressionParser;
use crate::instructions::Instruction;

/// Marker attribute stamped onto every instruction-bearing element of a
/// compiled template.
pub const TARGET_MARKER: &str = "osp";

/// Output of one template compilation: the marked element tree plus one
/// instruction row per marked element, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledTemplate {
    pub template: Element,
    pub rows: Vec<Vec<Instruction>>,
}

/// Compiles element trees into instruction rows.
///
/// Holds the registered resource metadata and borrows the command registry
/// and attribute parser; stateless across `compile` calls, so one instance
/// serves every template.
pub struct TemplateCompiler<'a> {
    registry: &'a BindingCommandRegistry,
    attr_parser: &'a AttributeParser,
    expression_parser: ExpressionParser,
    mapper: AttrMapper,
    elements: IndexMap<String, ResourceDefinition>,
    attributes: IndexMap<String, ResourceDefinition>,
}

impl<'a> TemplateCompiler<'a> {
    pub fn new(registry: &'a BindingCommandRegistry, attr_parser: &'a AttributeParser) -> Self {
        TemplateCompiler {
            registry,
            attr_parser,
            expression_parser: ExpressionParser::new(),
            mapper: AttrMapper::new(),
            elements: IndexMap::new(),
            attributes: IndexMap::new(),
        }
    }

    /// Make a custom-element definition visible to compilation, keyed by its
    /// tag name.
    pub fn register_element(&mut self, def: ResourceDefinition) {
        self.elements.insert(def.name.clone(), def);
    }

    /// Make a custom-attribute definition visible to compilation, keyed by
    /// its attribute name.
    pub fn register_attribute(&mut self, def: ResourceDefinition) {
        self.attributes.insert(def.name.clone(), def);
    }

    /// Compile an element tree. Fails on the first malformed binding
    /// expression, reporting the attribute it surfaced under.
    pub fn compile(&self, root: &Element) -> Result<CompiledTemplate> {
        let mut rows = Vec::new();
        let template = self.compile_node(root, &mut rows)?;
        debug!(targets = rows.len(), "compiled template '{}'", root.name);
        Ok(CompiledTemplate { template, rows })
    }

    fn compile_node(&self, node: &Element, rows: &mut Vec<Vec<Instruction>>) -> Result<Element> {
        let mut compiled = Element::new(&node.name);
        let mut row: Vec<Instruction> = Vec::new();

        for attr in &node.attributes {
            let syntax = self.attr_parser.parse(&attr.name, &attr.value);
            let Some(command_name) = syntax.command.as_deref() else {
                // Plain attribute; passes through untouched.
                compiled.set_attr(&attr.name, &attr.value);
                continue;
            };
            let Some(command) = self.registry.lookup(command_name) else {
                compiled.set_attr(&attr.name, &attr.value);
                continue;
            };

            let info = self.build_info(node, &syntax);
            let instruction = command
                .build(&info, &self.expression_parser, &self.mapper)
                .map_err(|err| err.with_attribute(&attr.name))?;
            row.push(instruction);

            if command.kind() == CommandKind::IgnoreAttr {
                compiled.set_attr(&attr.name, &attr.value);
            }
        }

        if !row.is_empty() {
            compiled.set_attr(TARGET_MARKER, "");
            rows.push(row);
        }

        for child in &node.children {
            let compiled_child = self.compile_node(child, rows)?;
            compiled.children.push(compiled_child);
        }
        Ok(compiled)
    }

    /// Resolve the bindable metadata for a parsed attribute. A custom
    /// attribute matching the target wins over an element bindable; with
    /// neither, the command sees a plain attribute.
    fn build_info<'b>(
        &'b self,
        node: &'b Element,
        syntax: &'b AttrSyntax,
    ) -> CommandBuildInfo<'b> {
        if let Some(def) = self.attributes.get(&syntax.target) {
            if let Some(bindable) = def.primary_bindable() {
                return CommandBuildInfo::Bindable {
                    node,
                    attr: syntax,
                    bindable,
                    def,
                };
            }
        }
        if let Some(def) = self.elements.get(&node.name) {
            if let Some(bindable) = def.bindable_for_attr(&syntax.target) {
                return CommandBuildInfo::Bindable {
                    node,
                    attr: syntax,
                    bindable,
                    def,
                };
            }
        }
        CommandBuildInfo::PlainAttr { node, attr: syntax }
    }
}

/// Collect the marked target elements of a compiled template in document
/// order, validating the count against the instruction rows the template
/// was compiled with.
pub fn find_targets<'t>(compiled: &'t CompiledTemplate) -> Result<Vec<&'t Element>> {
    let mut targets = Vec::new();
    collect_targets(&compiled.template, &mut targets);
    if targets.len() != compiled.rows.len() {
        return Err(CompilerError::MalformedMarker {
            expected: compiled.rows.len(),
            found: targets.len(),
        });
    }
    Ok(targets)
}

fn collect_targets<'t>(node: &'t Element, targets: &mut Vec<&'t Element>) {
    if node.has_attr(TARGET_MARKER) {
        targets.push(node);
    }
    for child in &node.children {
        collect_targets(child, targets);
    }
}
