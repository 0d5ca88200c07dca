//! Compiler Errors
//!
//! Error taxonomy for the template compilation pipeline. Compilation errors
//! are deterministic functions of template source: the same input fails with
//! the same error on every attempt, so there is no retry surface here.

use thiserror::Error;

/// Errors raised by the compilation pipeline.
///
/// Binding commands never construct new error kinds of their own; they
/// propagate whatever the expression parser raised, unmodified. The template
/// compiler attaches the offending attribute for diagnostics via
/// [`CompilerError::with_attribute`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompilerError {
    /// A malformed binding expression. Fatal to the enclosing template
    /// compilation.
    #[error("Unable to parse expression '{expr}': {message}{}", attribute_suffix(.attribute))]
    ExpressionParse {
        expr: String,
        message: String,
        attribute: Option<String>,
    },

    /// A second registration arrived for an already-registered binding
    /// command. Never fatal: the registry logs this and keeps the first
    /// registration. The variant exists for the warning text only.
    #[error("Binding command '{name}' has already been registered; the first registration wins")]
    DuplicateCommandRegistration { name: String },

    /// The marker structure of a compiled template does not line up with
    /// the instruction rows it was compiled with.
    #[error("Malformed compilation marker: expected {expected} target(s), found {found}")]
    MalformedMarker { expected: usize, found: usize },
}

impl CompilerError {
    /// Stable error code, usable for diagnostics tooling and docs links.
    pub fn code(&self) -> &'static str {
        match self {
            CompilerError::ExpressionParse { .. } => "OSP0151",
            CompilerError::DuplicateCommandRegistration { .. } => "OSP0157",
            CompilerError::MalformedMarker { .. } => "OSP0754",
        }
    }

    /// Attach the attribute the error surfaced under. Only meaningful for
    /// expression parse failures; other variants pass through untouched.
    pub fn with_attribute(self, attribute: &str) -> Self {
        match self {
            CompilerError::ExpressionParse { expr, message, .. } => {
                CompilerError::ExpressionParse {
                    expr,
                    message,
                    attribute: Some(attribute.to_string()),
                }
            }
            other => other,
        }
    }
}

fn attribute_suffix(attribute: &Option<String>) -> String {
    match attribute {
        Some(attr) => format!(" (in attribute '{}')", attr),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, CompilerError>;
