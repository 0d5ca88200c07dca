//! Osprey Template Compiler
//!
//! Template compilation and binding-instruction pipeline for the Osprey
//! UI framework: attribute-syntax parsing, binding-command resolution,
//! bindable-metadata lookup, and emission of the instruction objects a
//! renderer executes against live DOM nodes.
//!
//! The pipeline, end to end: a raw attribute is split by the
//! [`attribute_parser`] into target/command/qualifiers, the command is
//! looked up in the [`binding_command::BindingCommandRegistry`], build info
//! (node, syntax, bindable metadata if any) is assembled by the
//! [`template_compiler::TemplateCompiler`], and the command's `build`
//! produces an [`instructions::Instruction`].

pub mod attribute_mapper;
pub mod attribute_parser;
pub mod bindable;
pub mod binding_command;
pub mod chars;
pub mod configuration;
pub mod dom;
pub mod error;
pub mod expression_parser;
pub mod instructions;
pub mod template_compiler;
pub mod util;

pub use attribute_mapper::AttrMapper;
pub use attribute_parser::{AttrSyntax, AttributeParser, SPREAD_COMMAND};
pub use bindable::{BindableDefinition, BindingMode, ResourceDefinition, ResourceKind};
pub use binding_command::{
    BindingCommand, BindingCommandDefinition, BindingCommandRegistry, CommandBuildInfo, CommandKind,
};
pub use configuration::StandardConfiguration;
pub use dom::{Attribute, Element};
pub use error::{CompilerError, Result};
pub use expression_parser::{ExpressionParser, Lexer};
pub use instructions::{Instruction, MultiAttrInstruction};
pub use template_compiler::{find_targets, CompiledTemplate, TemplateCompiler, TARGET_MARKER};
