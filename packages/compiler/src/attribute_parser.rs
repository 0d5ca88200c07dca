//! Attribute Syntax Parser
//!
//! Splits a raw attribute name/value pair into target, binding-command name
//! and optional colon-delimited qualifiers. Command names are reserved
//! words: a dot suffix that is not a registered command leaves the whole
//! name as the target.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::chars;

/// The attribute-spread command keyword. It is a whole-name match rather
/// than a dot suffix, so the parser special-cases it.
pub const SPREAD_COMMAND: &str = "...$attrs";

/// A parsed attribute. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttrSyntax {
    /// Canonical attribute/property name the binding targets.
    pub target: String,
    /// Unparsed expression text.
    pub raw_value: String,
    /// Binding-command name extracted from the attribute, if any.
    pub command: Option<String>,
    /// Full ordered token list `[target, command, qualifier...]`; only
    /// present when colon qualifiers were written.
    pub parts: Option<Vec<String>>,
}

impl AttrSyntax {
    pub fn new(target: &str, raw_value: &str, command: Option<&str>, parts: Option<Vec<String>>) -> Self {
        AttrSyntax {
            target: target.to_string(),
            raw_value: raw_value.to_string(),
            command: command.map(str::to_string),
            parts,
        }
    }

    /// The event-options qualifier consumed by trigger/capture commands:
    /// the third syntax part, when present.
    pub fn event_modifier(&self) -> Option<&str> {
        self.parts
            .as_ref()
            .and_then(|parts| parts.get(2))
            .map(String::as_str)
    }
}

/// Parser for attribute syntax. Holds the reserved command-name set it was
/// constructed with; stateless otherwise, safe to share by reference.
#[derive(Debug, Clone, Default)]
pub struct AttributeParser {
    commands: HashSet<String>,
}

impl AttributeParser {
    pub fn new(commands: HashSet<String>) -> Self {
        AttributeParser { commands }
    }

    /// Parse a raw attribute name/value pair.
    ///
    /// The command is the **last** dot-delimited segment of the name (before
    /// any colon qualifiers). Qualifiers after the command are exposed in
    /// order through `parts`.
    pub fn parse(&self, name: &str, value: &str) -> AttrSyntax {
        if name == SPREAD_COMMAND {
            return AttrSyntax::new("", value, Some(SPREAD_COMMAND), None);
        }

        let (head, qualifiers) = match name.find(chars::COLON) {
            Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
            None => (name, None),
        };

        let Some(dot_idx) = head.rfind(chars::PERIOD) else {
            return AttrSyntax::new(name, value, None, None);
        };

        let target = &head[..dot_idx];
        let command = &head[dot_idx + 1..];
        if target.is_empty() || !self.commands.contains(command) {
            return AttrSyntax::new(name, value, None, None);
        }

        let parts = qualifiers.map(|rest| {
            let mut parts = vec![target.to_string(), command.to_string()];
            parts.extend(rest.split(chars::COLON).map(str::to_string));
            parts
        });
        AttrSyntax::new(target, value, Some(command), parts)
    }
}
