//! Expression AST
//!
//! AST node types for binding expressions. Nodes are plain owned values with
//! structural equality; instructions embed them directly and the renderer
//! evaluates them against a scope at runtime.

use serde::{Deserialize, Serialize};

/// Grammar entry point used when parsing a raw value string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpressionKind {
    /// A plain property expression (`value.bind`, `attr`, `ref`, ...).
    IsProperty,
    /// An iterator expression with an optional auxiliary clause
    /// (`item of items; key: k`).
    IsIterator,
    /// A function-call expression used by event listener bindings.
    IsFunction,
}

/// Main AST enum containing all node types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Expression {
    /// The binding scope itself; receiver of unqualified property reads.
    ImplicitReceiver,
    /// Explicit `this`.
    AccessThis,
    PropertyRead(PropertyRead),
    KeyedRead(KeyedRead),
    Call(Call),
    LiteralPrimitive(LiteralPrimitive),
    LiteralArray(LiteralArray),
    LiteralMap(LiteralMap),
    Unary(Unary),
    Binary(Binary),
    Conditional(Conditional),
    Assignment(Assignment),
}

/// Property read (e.g. `obj.property`, or `property` on the implicit scope)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRead {
    pub receiver: Box<Expression>,
    pub name: String,
}

/// Keyed read (e.g. `obj[key]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedRead {
    pub receiver: Box<Expression>,
    pub key: Box<Expression>,
}

/// Function call (e.g. `fn(a, b)`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub receiver: Box<Expression>,
    pub args: Vec<Expression>,
}

/// Literal primitive (string, number, boolean, null, undefined)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "literalType")]
pub enum LiteralPrimitive {
    String { value: String },
    Number { value: f64 },
    Boolean { value: bool },
    Null,
    Undefined,
}

/// Array literal (e.g. `[1, 2, 3]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralArray {
    pub elements: Vec<Expression>,
}

/// Object literal key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralMapKey {
    pub key: String,
    pub quoted: bool,
}

/// Object literal (e.g. `{a: 1, b: 2}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteralMap {
    pub keys: Vec<LiteralMapKey>,
    pub values: Vec<Expression>,
}

/// Prefix unary operator (`!expr`, `-expr`, `+expr`, `typeof expr`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unary {
    pub operator: String,
    pub expr: Box<Expression>,
}

/// Binary operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binary {
    pub operation: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// Ternary conditional (`condition ? yes : no`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditional {
    pub condition: Box<Expression>,
    pub yes: Box<Expression>,
    pub no: Box<Expression>,
}

/// Assignment (`target = value`). The target must be a property or keyed
/// read; the parser rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub target: Box<Expression>,
    pub value: Box<Expression>,
}

/// Declaration side of an iterator expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ForDeclaration {
    /// `item of items`
    Identifier(String),
    /// `[key, value] of entries`
    ArrayDestructuring(Vec<String>),
    /// `{id, name} of rows`
    ObjectDestructuring(Vec<String>),
}

/// Parsed iterator expression (`<declaration> of <iterable>`).
///
/// `semi_idx` is the byte offset of the first top-level semicolon in the raw
/// value, or `-1` when absent. Text after the semicolon is not part of the
/// iterable; the `for` binding command re-parses it as an auxiliary
/// attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForOfStatement {
    pub declaration: ForDeclaration,
    pub iterable: Box<Expression>,
    pub semi_idx: i32,
}

impl Expression {
    /// Shorthand for a property read on the implicit scope.
    pub fn scope_read(name: &str) -> Expression {
        Expression::PropertyRead(PropertyRead {
            receiver: Box::new(Expression::ImplicitReceiver),
            name: name.to_string(),
        })
    }
}
