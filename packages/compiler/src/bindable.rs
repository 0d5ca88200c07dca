//! Bindable Metadata
//!
//! Declared-bindable definitions for custom elements and custom attributes,
//! and the binding-mode enumeration the commands resolve against.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::util::camel_case;

/// Direction of data flow for a property binding.
///
/// `Default` is an unresolved sentinel meaning "inherit from the bindable or
/// the owning resource"; commands always resolve it to a concrete mode
/// before emitting an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BindingMode {
    OneTime,
    ToView,
    FromView,
    TwoWay,
    #[default]
    Default,
}

/// A declared bindable property on a custom element or custom attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindableDefinition {
    /// Canonical property name; may differ from the attribute name.
    pub name: String,
    /// Attribute form of the name as written in markup.
    pub attribute: String,
    /// Declared mode, `BindingMode::Default` when the declaration left it
    /// open.
    pub mode: BindingMode,
}

impl BindableDefinition {
    pub fn new(name: &str) -> Self {
        BindableDefinition {
            name: camel_case(name),
            attribute: kebab_case(name),
            mode: BindingMode::Default,
        }
    }

    pub fn with_mode(mut self, mode: BindingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_attribute(mut self, attribute: &str) -> Self {
        self.attribute = attribute.to_string();
        self
    }
}

/// Owner kind of a bindable: custom element or custom attribute. Affects
/// default-value inference and default-mode resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Element,
    Attribute,
}

/// Definition of a custom element or custom attribute resource: its name,
/// kind, declared bindables, and (custom attributes only) the default
/// binding mode its bindables inherit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub name: String,
    pub kind: ResourceKind,
    pub bindables: IndexMap<String, BindableDefinition>,
    /// Custom attributes only; elements have none.
    pub default_binding_mode: Option<BindingMode>,
}

impl ResourceDefinition {
    pub fn element(name: &str) -> Self {
        ResourceDefinition {
            name: name.to_string(),
            kind: ResourceKind::Element,
            bindables: IndexMap::new(),
            default_binding_mode: None,
        }
    }

    pub fn attribute(name: &str) -> Self {
        ResourceDefinition {
            name: name.to_string(),
            kind: ResourceKind::Attribute,
            bindables: IndexMap::new(),
            default_binding_mode: None,
        }
    }

    pub fn with_bindable(mut self, bindable: BindableDefinition) -> Self {
        self.bindables.insert(bindable.name.clone(), bindable);
        self
    }

    pub fn with_default_binding_mode(mut self, mode: BindingMode) -> Self {
        self.default_binding_mode = Some(mode);
        self
    }

    /// Find a bindable by the attribute name written in markup, falling back
    /// to the camel-cased property name.
    pub fn bindable_for_attr(&self, attr: &str) -> Option<&BindableDefinition> {
        self.bindables
            .values()
            .find(|b| b.attribute == attr)
            .or_else(|| self.bindables.get(&camel_case(attr)))
    }

    /// The primary bindable of a custom attribute (its first declared one).
    pub fn primary_bindable(&self) -> Option<&BindableDefinition> {
        self.bindables.values().next()
    }
}

fn kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
