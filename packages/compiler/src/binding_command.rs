//! Binding Commands
//!
//! The decision logic that turns a parsed attribute (`value.bind="x"`,
//! `click.trigger="fn()"`, `items.for="i of list"`) into a structured,
//! replayable binding instruction. One command per binding mode/behavior;
//! each inspects whether the target is a declared bindable or a plain
//! attribute, maps attribute names to property names, resolves binding-mode
//! defaults, and emits the matching instruction variant.

use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::attribute_mapper::AttrMapper;
use crate::attribute_parser::{AttrSyntax, AttributeParser, SPREAD_COMMAND};
use crate::bindable::{BindableDefinition, BindingMode, ResourceDefinition, ResourceKind};
use crate::dom::Element;
use crate::error::{CompilerError, Result};
use crate::expression_parser::ast::ExpressionKind;
use crate::expression_parser::ExpressionParser;
use crate::instructions::{Instruction, MultiAttrInstruction};
use crate::chars;
use crate::util::{camel_case, merge_aliases, split_at_first};

/// Characteristics of a binding command.
///
/// - `None`: the normal compilation process applies and the source
///   attribute is stripped from the compiled node.
/// - `IgnoreAttr`: the command takes over processing of the attribute; the
///   template compiler keeps the attribute as-is on the DOM node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    None,
    IgnoreAttr,
}

/// Build-time info handed to a command. Exactly one of the two shapes is
/// produced per build call.
#[derive(Debug, Clone, Copy)]
pub enum CommandBuildInfo<'a> {
    /// The target is not a declared bindable; resolution falls back to
    /// attribute-to-property mapping.
    PlainAttr {
        node: &'a Element,
        attr: &'a AttrSyntax,
    },
    /// The target matches a declared bindable on a custom element or custom
    /// attribute; `def.kind` affects default-value inference.
    Bindable {
        node: &'a Element,
        attr: &'a AttrSyntax,
        bindable: &'a BindableDefinition,
        def: &'a ResourceDefinition,
    },
}

impl<'a> CommandBuildInfo<'a> {
    pub fn node(&self) -> &'a Element {
        match self {
            CommandBuildInfo::PlainAttr { node, .. } => node,
            CommandBuildInfo::Bindable { node, .. } => node,
        }
    }

    pub fn attr(&self) -> &'a AttrSyntax {
        match self {
            CommandBuildInfo::PlainAttr { attr, .. } => attr,
            CommandBuildInfo::Bindable { attr, .. } => attr,
        }
    }
}

/// A binding command: a strategy that builds one instruction from
/// build-time info. Commands never invent error kinds; they propagate
/// whatever the expression parser raised, unmodified.
pub trait BindingCommand {
    fn kind(&self) -> CommandKind;

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        mapper: &AttrMapper,
    ) -> Result<Instruction>;
}

/// Registered metadata for a command: unique name, alternate names, the
/// derived lookup key and the command kind. Created once at registration
/// time, immutable afterward, owned by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingCommandDefinition {
    pub name: String,
    pub aliases: Vec<String>,
    pub key: String,
    pub kind: CommandKind,
}

impl BindingCommandDefinition {
    pub fn new(name: &str, kind: CommandKind) -> Self {
        BindingCommandDefinition {
            name: name.to_string(),
            aliases: Vec::new(),
            key: key_from(name),
            kind,
        }
    }

    /// Merge alias lists into the definition; duplicates and the command's
    /// own name are dropped, first occurrence wins.
    pub fn with_aliases(mut self, aliases: &[String]) -> Self {
        self.aliases = merge_aliases(&self.name, &[&self.aliases, aliases]);
        self
    }
}

/// Deterministic lookup key derivation; collision-free for distinct names.
pub fn key_from(name: &str) -> String {
    format!("binding-command:{}", name)
}

struct RegisteredCommand {
    definition: BindingCommandDefinition,
    instance: Box<dyn BindingCommand>,
}

/// Name-keyed catalog of binding commands. Append-only: registration is
/// idempotent and first-writer-wins, so overlapping default registrations
/// from multiple packages are tolerated without error.
#[derive(Default)]
pub struct BindingCommandRegistry {
    commands: IndexMap<String, RegisteredCommand>,
    aliases: IndexMap<String, String>,
}

impl BindingCommandRegistry {
    pub fn new() -> Self {
        BindingCommandRegistry {
            commands: IndexMap::new(),
            aliases: IndexMap::new(),
        }
    }

    /// Register a command under its definition. A no-op when the derived
    /// key is already taken, by a command or by an alias (logs a developer
    /// warning; the first registration wins). Never fails.
    pub fn register(&mut self, definition: BindingCommandDefinition, instance: Box<dyn BindingCommand>) {
        if self.commands.contains_key(&definition.key) || self.aliases.contains_key(&definition.key)
        {
            let err = CompilerError::DuplicateCommandRegistration {
                name: definition.name.clone(),
            };
            warn!(code = err.code(), "{}", err);
            return;
        }
        for alias in &definition.aliases {
            let alias_key = key_from(alias);
            if self.commands.contains_key(&alias_key) || self.aliases.contains_key(&alias_key) {
                warn!(
                    "Binding command alias '{}' is already taken; keeping the existing registration",
                    alias
                );
                continue;
            }
            self.aliases.insert(alias_key, definition.key.clone());
        }
        self.commands.insert(
            definition.key.clone(),
            RegisteredCommand { definition, instance },
        );
    }

    /// Resolve a command name or alias to its implementation.
    pub fn lookup(&self, name: &str) -> Option<&dyn BindingCommand> {
        self.entry(name).map(|cmd| cmd.instance.as_ref())
    }

    /// Resolve a command name or alias to its registered definition.
    pub fn definition(&self, name: &str) -> Option<&BindingCommandDefinition> {
        self.entry(name).map(|cmd| &cmd.definition)
    }

    /// Registered definitions, in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &BindingCommandDefinition> {
        self.commands.values().map(|cmd| &cmd.definition)
    }

    /// All registered names and aliases; seeds the attribute parser's
    /// reserved-word set.
    pub fn command_names(&self) -> HashSet<String> {
        let mut names: HashSet<String> = self
            .commands
            .values()
            .map(|cmd| cmd.definition.name.clone())
            .collect();
        for cmd in self.commands.values() {
            names.extend(cmd.definition.aliases.iter().cloned());
        }
        names
    }

    fn entry(&self, name: &str) -> Option<&RegisteredCommand> {
        let key = key_from(name);
        let key = self.aliases.get(&key).unwrap_or(&key);
        self.commands.get(key)
    }
}

/// Shared target/value resolution for the property-binding commands.
///
/// Plain attributes resolve through the mapper, falling back to
/// camel-casing. Declared bindables take the bindable's canonical property
/// name; an empty value on an element bindable is shorthand for binding the
/// camel-cased attribute name (`<my-el value.bind>` reads as
/// `<my-el value.bind="value">`).
fn resolve_target_and_value(info: &CommandBuildInfo<'_>, mapper: &AttrMapper) -> (String, String) {
    match info {
        CommandBuildInfo::PlainAttr { node, attr } => {
            let target = mapper
                .map(node, &attr.target)
                .map(str::to_string)
                .unwrap_or_else(|| camel_case(&attr.target));
            (target, attr.raw_value.clone())
        }
        CommandBuildInfo::Bindable { attr, bindable, def, .. } => {
            let value = if attr.raw_value.is_empty() && def.kind == ResourceKind::Element {
                camel_case(&attr.target)
            } else {
                attr.raw_value.clone()
            };
            (bindable.name.clone(), value)
        }
    }
}

fn build_property_binding(
    info: &CommandBuildInfo<'_>,
    parser: &ExpressionParser,
    mapper: &AttrMapper,
    mode: BindingMode,
) -> Result<Instruction> {
    let (target, value) = resolve_target_and_value(info, mapper);
    let expression = parser.parse(&value, ExpressionKind::IsProperty)?;
    Ok(Instruction::property(expression, &target, mode))
}

/// `one-time`: bind once, never observe.
pub struct OneTimeBindingCommand;

impl BindingCommand for OneTimeBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_property_binding(info, parser, mapper, BindingMode::OneTime)
    }
}

/// `to-view`: source to view only.
pub struct ToViewBindingCommand;

impl BindingCommand for ToViewBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_property_binding(info, parser, mapper, BindingMode::ToView)
    }
}

/// `from-view`: view to source only.
pub struct FromViewBindingCommand;

impl BindingCommand for FromViewBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_property_binding(info, parser, mapper, BindingMode::FromView)
    }
}

/// `two-way`: both directions.
pub struct TwoWayBindingCommand;

impl BindingCommand for TwoWayBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_property_binding(info, parser, mapper, BindingMode::TwoWay)
    }
}

/// `bind`: mode resolved dynamically.
///
/// Without a bindable, the mode is two-way when the attribute mapper
/// reports the node/target pair two-way-capable, else to-view. With a
/// bindable, resolution is bindable mode, then the owning custom
/// attribute's default binding mode, then to-view — the `Default` sentinel
/// at either level falls through to the next.
pub struct DefaultBindingCommand;

impl BindingCommand for DefaultBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        mapper: &AttrMapper,
    ) -> Result<Instruction> {
        let mode = match info {
            CommandBuildInfo::PlainAttr { node, attr } => {
                if mapper.is_two_way(node, &attr.target) {
                    BindingMode::TwoWay
                } else {
                    BindingMode::ToView
                }
            }
            CommandBuildInfo::Bindable { bindable, def, .. } => {
                if bindable.mode == BindingMode::Default {
                    match def.default_binding_mode {
                        None | Some(BindingMode::Default) => BindingMode::ToView,
                        Some(mode) => mode,
                    }
                } else {
                    bindable.mode
                }
            }
        };
        build_property_binding(info, parser, mapper, mode)
    }
}

/// `for`: iteration binding. The value parses under iterator grammar; a
/// clause after the first semicolon becomes a single auxiliary property
/// row, split on its first colon and re-parsed through the attribute
/// parser to discover a nested command.
///
/// Holds a handle to the shared attribute parser so auxiliary clauses see
/// the same reserved command names as top-level attributes.
pub struct ForBindingCommand {
    attr_parser: Rc<AttributeParser>,
}

impl ForBindingCommand {
    pub fn new(attr_parser: Rc<AttributeParser>) -> Self {
        ForBindingCommand { attr_parser }
    }
}

impl BindingCommand for ForBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        let attr = info.attr();
        let target = match info {
            CommandBuildInfo::PlainAttr { .. } => camel_case(&attr.target),
            CommandBuildInfo::Bindable { bindable, .. } => bindable.name.clone(),
        };
        let for_of = parser.parse_for_of(&attr.raw_value)?;
        let mut props: Vec<MultiAttrInstruction> = Vec::new();
        if for_of.semi_idx > -1 {
            let clause = &attr.raw_value[(for_of.semi_idx + 1) as usize..];
            if let Some((attr_name, attr_value)) = split_at_first(clause, chars::COLON) {
                let syntax = self.attr_parser.parse(&attr_name, &attr_value);
                props.push(MultiAttrInstruction {
                    value: attr_value,
                    to: syntax.target,
                    command: syntax.command,
                });
            }
        }
        Ok(Instruction::iterator(for_of, &target, props))
    }
}

fn build_listener_binding(
    info: &CommandBuildInfo<'_>,
    parser: &ExpressionParser,
    capture: bool,
) -> Result<Instruction> {
    let attr = info.attr();
    let expression = parser.parse(&attr.raw_value, ExpressionKind::IsFunction)?;
    Ok(Instruction::listener(
        expression,
        &attr.target,
        capture,
        attr.event_modifier().map(str::to_string),
    ))
}

/// `trigger`: bubble-phase event listener. The attribute stays on the DOM
/// node (`IgnoreAttr`) so native tooling can still inspect it.
pub struct TriggerBindingCommand;

impl BindingCommand for TriggerBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_listener_binding(info, parser, false)
    }
}

/// `capture`: capture-phase event listener.
pub struct CaptureBindingCommand;

impl BindingCommand for CaptureBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_listener_binding(info, parser, true)
    }
}

fn build_attribute_binding(
    info: &CommandBuildInfo<'_>,
    parser: &ExpressionParser,
    attr_name: Option<&str>,
) -> Result<Instruction> {
    let attr = info.attr();
    let expression = parser.parse(&attr.raw_value, ExpressionKind::IsProperty)?;
    Ok(Instruction::attribute(
        attr_name.unwrap_or(&attr.target),
        expression,
        &attr.target,
    ))
}

/// `attr`: bind the raw DOM attribute named by the target, bypassing
/// bindable resolution.
pub struct AttrBindingCommand;

impl BindingCommand for AttrBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_attribute_binding(info, parser, None)
    }
}

/// `style`: bind a style property through the `style` attribute.
pub struct StyleBindingCommand;

impl BindingCommand for StyleBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_attribute_binding(info, parser, Some("style"))
    }
}

/// `class`: bind a class toggle through the `class` attribute.
pub struct ClassBindingCommand;

impl BindingCommand for ClassBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        build_attribute_binding(info, parser, Some("class"))
    }
}

/// `ref`: fill a reference slot (element, view-model, controller) with the
/// bound target. The value is an assignment target, not a read.
pub struct RefBindingCommand;

impl BindingCommand for RefBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        info: &CommandBuildInfo<'_>,
        parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        let attr = info.attr();
        let expression = parser.parse(&attr.raw_value, ExpressionKind::IsProperty)?;
        Ok(Instruction::ref_binding(expression, &attr.target))
    }
}

/// `...$attrs`: forward all otherwise-unmatched ambient attributes and
/// bindings to an inner element. Takes no parsed value.
pub struct SpreadBindingCommand;

impl BindingCommand for SpreadBindingCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::IgnoreAttr
    }

    fn build(
        &self,
        _info: &CommandBuildInfo<'_>,
        _parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        Ok(Instruction::SpreadBinding)
    }
}

/// The canonical command names of the standard command set, in
/// registration order.
pub const STANDARD_COMMAND_NAMES: &[&str] = &[
    "one-time", "to-view", "from-view", "two-way", "bind", "for", "trigger", "capture", "attr",
    "style", "class", "ref", SPREAD_COMMAND,
];
