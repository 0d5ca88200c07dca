//! Standard Configuration
//!
//! Default wiring: registers the standard binding-command set into a
//! registry and builds the shared attribute parser, seeded with the
//! registered command names. The `for` command holds a handle to the same
//! parser, so its auxiliary clauses recognize the same command set as
//! top-level attributes. Registration is idempotent, so applying the
//! configuration to an already-configured registry only produces developer
//! warnings.

use std::rc::Rc;

use crate::attribute_parser::{AttributeParser, SPREAD_COMMAND};
use crate::binding_command::{
    AttrBindingCommand, BindingCommandDefinition, BindingCommandRegistry, CaptureBindingCommand,
    ClassBindingCommand, CommandKind, DefaultBindingCommand, ForBindingCommand,
    FromViewBindingCommand, OneTimeBindingCommand, RefBindingCommand, SpreadBindingCommand,
    StyleBindingCommand, ToViewBindingCommand, TriggerBindingCommand, TwoWayBindingCommand,
    STANDARD_COMMAND_NAMES,
};

/// The framework's default command set.
pub struct StandardConfiguration;

impl StandardConfiguration {
    /// Register every standard command under its canonical name and return
    /// the shared attribute parser. Its reserved-word set covers the
    /// standard commands plus everything already in the registry, so
    /// commands registered before applying the configuration stay
    /// recognizable in `for` auxiliary clauses. Safe to call more than
    /// once; repeated names are skipped with a warning.
    pub fn register(registry: &mut BindingCommandRegistry) -> Rc<AttributeParser> {
        let mut names = registry.command_names();
        names.extend(STANDARD_COMMAND_NAMES.iter().map(|name| (*name).to_string()));
        let attr_parser = Rc::new(AttributeParser::new(names));

        registry.register(
            BindingCommandDefinition::new("one-time", CommandKind::None),
            Box::new(OneTimeBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("to-view", CommandKind::None),
            Box::new(ToViewBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("from-view", CommandKind::None),
            Box::new(FromViewBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("two-way", CommandKind::None),
            Box::new(TwoWayBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("bind", CommandKind::None),
            Box::new(DefaultBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("for", CommandKind::None),
            Box::new(ForBindingCommand::new(Rc::clone(&attr_parser))),
        );
        registry.register(
            BindingCommandDefinition::new("trigger", CommandKind::IgnoreAttr),
            Box::new(TriggerBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("capture", CommandKind::IgnoreAttr),
            Box::new(CaptureBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("attr", CommandKind::IgnoreAttr),
            Box::new(AttrBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("style", CommandKind::IgnoreAttr),
            Box::new(StyleBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("class", CommandKind::IgnoreAttr),
            Box::new(ClassBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new("ref", CommandKind::IgnoreAttr),
            Box::new(RefBindingCommand),
        );
        registry.register(
            BindingCommandDefinition::new(SPREAD_COMMAND, CommandKind::IgnoreAttr),
            Box::new(SpreadBindingCommand),
        );

        attr_parser
    }

    /// Build a fresh attribute parser whose reserved-word set is everything
    /// the registry currently knows, names and aliases alike.
    pub fn attribute_parser(registry: &BindingCommandRegistry) -> AttributeParser {
        AttributeParser::new(registry.command_names())
    }

    /// Fully wired registry and shared attribute parser with the standard
    /// command set.
    pub fn setup() -> (BindingCommandRegistry, Rc<AttributeParser>) {
        let mut registry = BindingCommandRegistry::new();
        let attr_parser = Self::register(&mut registry);
        (registry, attr_parser)
    }
}
