//! Instruction Model
//!
//! The declarative records a template compilation emits and the renderer
//! interprets when activating a component instance. Instructions are plain
//! immutable values with structural equality only; each is consumed exactly
//! once by the renderer.

use serde::{Deserialize, Serialize};

use crate::bindable::BindingMode;
use crate::expression_parser::ast::{Expression, ForOfStatement};

/// Auxiliary property row attached to an iterator binding, produced from
/// the clause after the semicolon (`repeat.for="i of list; key: k"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiAttrInstruction {
    pub value: String,
    pub to: String,
    pub command: Option<String>,
}

/// The renderer contract: every binding a compiled template can ask for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Instruction {
    PropertyBinding(PropertyBindingInstruction),
    IteratorBinding(IteratorBindingInstruction),
    ListenerBinding(ListenerBindingInstruction),
    AttributeBinding(AttributeBindingInstruction),
    RefBinding(RefBindingInstruction),
    /// No payload: forwards all otherwise-unmatched ambient attributes and
    /// bindings to an inner element.
    SpreadBinding,
}

/// Bind an expression to a target property with a resolved mode. The mode
/// is always concrete; `BindingMode::Default` never appears here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyBindingInstruction {
    pub from: Expression,
    pub to: String,
    pub mode: BindingMode,
}

/// Bind an iterable expression to a repeating target, with at most one
/// auxiliary property row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IteratorBindingInstruction {
    pub for_of: ForOfStatement,
    pub to: String,
    pub props: Vec<MultiAttrInstruction>,
}

/// Attach an event listener. `capture` selects the capture phase;
/// `modifier` carries the qualifier written after the command
/// (`keydown.trigger:prevent`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerBindingInstruction {
    pub from: Expression,
    pub to: String,
    pub capture: bool,
    pub modifier: Option<String>,
}

/// Bind an expression to a raw DOM attribute, bypassing bindable
/// resolution. `attr` is the DOM attribute written to; `to` mirrors the
/// parsed target for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeBindingInstruction {
    pub attr: String,
    pub from: Expression,
    pub to: String,
}

/// Fill a reference slot (element, view-model, controller) named by `to`
/// with the bound target; `from` is the assignment target expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefBindingInstruction {
    pub from: Expression,
    pub to: String,
}

impl Instruction {
    pub fn property(from: Expression, to: &str, mode: BindingMode) -> Self {
        Instruction::PropertyBinding(PropertyBindingInstruction {
            from,
            to: to.to_string(),
            mode,
        })
    }

    pub fn iterator(for_of: ForOfStatement, to: &str, props: Vec<MultiAttrInstruction>) -> Self {
        Instruction::IteratorBinding(IteratorBindingInstruction {
            for_of,
            to: to.to_string(),
            props,
        })
    }

    pub fn listener(from: Expression, to: &str, capture: bool, modifier: Option<String>) -> Self {
        Instruction::ListenerBinding(ListenerBindingInstruction {
            from,
            to: to.to_string(),
            capture,
            modifier,
        })
    }

    pub fn attribute(attr: &str, from: Expression, to: &str) -> Self {
        Instruction::AttributeBinding(AttributeBindingInstruction {
            attr: attr.to_string(),
            from,
            to: to.to_string(),
        })
    }

    pub fn ref_binding(from: Expression, to: &str) -> Self {
        Instruction::RefBinding(RefBindingInstruction {
            from,
            to: to.to_string(),
        })
    }
}
