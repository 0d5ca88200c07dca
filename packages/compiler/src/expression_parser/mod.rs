//! Expression Parser Module
//!
//! Tokenizes and parses binding expression text. Three grammar entry points
//! exist, selected by [`ast::ExpressionKind`]: plain property expressions,
//! iterator (`for`) expressions and function-call (listener) expressions.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use lexer::Lexer;
pub use parser::ExpressionParser;
