//! Expression Parser
//!
//! Recursive descent parser for binding expressions. Property and
//! function-call grammars share one entry point ([`ExpressionParser::parse`]);
//! iterator grammar has its own ([`ExpressionParser::parse_for_of`]) because
//! its result carries a declaration and the auxiliary-clause semicolon index
//! in addition to the iterable expression.

use super::ast::*;
use super::lexer::{Lexer, Token, TokenType};
use crate::error::{CompilerError, Result};

/// Parser for binding expressions. Stateless across calls; one instance is
/// shared by every template compilation.
#[derive(Debug, Default)]
pub struct ExpressionParser {
    lexer: Lexer,
}

impl ExpressionParser {
    pub fn new() -> Self {
        ExpressionParser { lexer: Lexer::new() }
    }

    /// Parse a property or function-call expression.
    ///
    /// The two kinds currently share one grammar; the parameter records the
    /// caller's intent and keeps room for the grammars to diverge.
    pub fn parse(&self, input: &str, _kind: ExpressionKind) -> Result<Expression> {
        let tokens = self.lexer.tokenize(input);
        let mut state = ParseState::new(input, tokens);
        let ast = state.parse_expression()?;
        state.expect_end()?;
        Ok(ast)
    }

    /// Parse an iterator expression (`ExpressionKind::IsIterator`).
    ///
    /// Parsing stops at the first top-level semicolon; the remainder is the
    /// auxiliary clause, left to the `for` binding command to interpret.
    pub fn parse_for_of(&self, input: &str) -> Result<ForOfStatement> {
        let tokens = self.lexer.tokenize(input);
        let mut state = ParseState::new(input, tokens);
        let declaration = state.parse_for_declaration()?;
        if !state.consume_keyword("of") {
            return Err(state.error("Expected 'of' in iterator expression"));
        }
        let iterable = state.parse_expression()?;
        let mut semi_idx = -1;
        if let Some(token) = state.peek() {
            if token.is_character(';') {
                semi_idx = token.index as i32;
            } else {
                return Err(state.error(&format!("Unexpected token '{}'", token.str_value)));
            }
        }
        Ok(ForOfStatement {
            declaration,
            iterable: Box::new(iterable),
            semi_idx,
        })
    }
}

struct ParseState<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    index: usize,
}

impl<'a> ParseState<'a> {
    fn new(input: &'a str, tokens: Vec<Token>) -> Self {
        ParseState {
            input,
            tokens,
            index: 0,
        }
    }

    fn error(&self, message: &str) -> CompilerError {
        CompilerError::ExpressionParse {
            expr: self.input.to_string(),
            message: message.to_string(),
            attribute: None,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn consume_character(&mut self, ch: char) -> bool {
        if self.peek().map(|t| t.is_character(ch)).unwrap_or(false) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn consume_operator(&mut self, op: &str) -> bool {
        if self.peek().map(|t| t.is_operator(op)).unwrap_or(false) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn consume_keyword(&mut self, keyword: &str) -> bool {
        if self.peek().map(|t| t.is_keyword(keyword)).unwrap_or(false) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    fn expect_character(&mut self, ch: char) -> Result<()> {
        if self.consume_character(ch) {
            Ok(())
        } else {
            Err(self.error(&format!("Expected '{}'", ch)))
        }
    }

    fn expect_end(&self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(self.error(&format!("Unexpected token '{}'", token.str_value))),
        }
    }

    fn check_error_token(&self) -> Result<()> {
        if let Some(token) = self.peek() {
            if token.is_error() {
                return Err(self.error(&token.str_value));
            }
        }
        Ok(())
    }

    // expression := conditional ('=' expression)?
    fn parse_expression(&mut self) -> Result<Expression> {
        let left = self.parse_conditional()?;
        if self.consume_character('=') {
            if !matches!(left, Expression::PropertyRead(_) | Expression::KeyedRead(_)) {
                return Err(self.error("Left-hand side of assignment is not assignable"));
            }
            let value = self.parse_expression()?;
            return Ok(Expression::Assignment(Assignment {
                target: Box::new(left),
                value: Box::new(value),
            }));
        }
        Ok(left)
    }

    fn parse_conditional(&mut self) -> Result<Expression> {
        let condition = self.parse_binary(0)?;
        if self.consume_character('?') {
            let yes = self.parse_expression()?;
            self.expect_character(':')?;
            let no = self.parse_expression()?;
            return Ok(Expression::Conditional(Conditional {
                condition: Box::new(condition),
                yes: Box::new(yes),
                no: Box::new(no),
            }));
        }
        Ok(condition)
    }

    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let Some(token) = self.peek() else {
                break;
            };
            if token.token_type != TokenType::Operator {
                break;
            }
            let operation = token.str_value.clone();
            let Some(precedence) = binary_precedence(&operation) else {
                break;
            };
            if precedence < min_precedence {
                break;
            }
            self.index += 1;
            let right = self.parse_binary(precedence + 1)?;
            left = Expression::Binary(Binary {
                operation,
                left: Box::new(left),
                right: Box::new(right),
            });
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        self.check_error_token()?;
        let operator = match self.peek() {
            Some(t) if t.is_operator("!") || t.is_operator("-") || t.is_operator("+") => {
                Some(t.str_value.clone())
            }
            Some(t) if t.is_keyword("typeof") => Some(t.str_value.clone()),
            _ => None,
        };
        if let Some(operator) = operator {
            self.index += 1;
            let expr = self.parse_unary()?;
            return Ok(Expression::Unary(Unary {
                operator,
                expr: Box::new(expr),
            }));
        }
        self.parse_postfix()
    }

    // postfix := primary ('.' identifier | '[' expression ']' | '(' args ')')*
    fn parse_postfix(&mut self) -> Result<Expression> {
        let mut result = self.parse_primary()?;
        loop {
            if self.consume_character('.') {
                let name = self.expect_identifier()?;
                result = Expression::PropertyRead(PropertyRead {
                    receiver: Box::new(result),
                    name,
                });
            } else if self.consume_character('[') {
                let key = self.parse_expression()?;
                self.expect_character(']')?;
                result = Expression::KeyedRead(KeyedRead {
                    receiver: Box::new(result),
                    key: Box::new(key),
                });
            } else if self.consume_character('(') {
                let args = self.parse_arguments()?;
                result = Expression::Call(Call {
                    receiver: Box::new(result),
                    args,
                });
            } else {
                break;
            }
        }
        Ok(result)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.consume_character(')') {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.consume_character(',') {
                break;
            }
        }
        self.expect_character(')')?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        self.check_error_token()?;
        let Some(token) = self.advance() else {
            return Err(self.error("Unexpected end of expression"));
        };
        match token.token_type {
            TokenType::Number => Ok(Expression::LiteralPrimitive(LiteralPrimitive::Number {
                value: token.num_value,
            })),
            TokenType::String => Ok(Expression::LiteralPrimitive(LiteralPrimitive::String {
                value: token.str_value,
            })),
            TokenType::Identifier => Ok(Expression::scope_read(&token.str_value)),
            TokenType::Keyword => match token.str_value.as_str() {
                "this" => Ok(Expression::AccessThis),
                "true" => Ok(Expression::LiteralPrimitive(LiteralPrimitive::Boolean { value: true })),
                "false" => Ok(Expression::LiteralPrimitive(LiteralPrimitive::Boolean { value: false })),
                "null" => Ok(Expression::LiteralPrimitive(LiteralPrimitive::Null)),
                "undefined" => Ok(Expression::LiteralPrimitive(LiteralPrimitive::Undefined)),
                other => Err(self.error(&format!("Unexpected keyword '{}'", other))),
            },
            TokenType::Character => match token.str_value.chars().next() {
                Some('(') => {
                    let expr = self.parse_expression()?;
                    self.expect_character(')')?;
                    Ok(expr)
                }
                Some('[') => self.parse_array_literal(),
                Some('{') => self.parse_object_literal(),
                _ => Err(self.error(&format!("Unexpected token '{}'", token.str_value))),
            },
            _ => Err(self.error(&format!("Unexpected token '{}'", token.str_value))),
        }
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let mut elements = Vec::new();
        if !self.consume_character(']') {
            loop {
                elements.push(self.parse_expression()?);
                if !self.consume_character(',') {
                    break;
                }
            }
            self.expect_character(']')?;
        }
        Ok(Expression::LiteralArray(LiteralArray { elements }))
    }

    fn parse_object_literal(&mut self) -> Result<Expression> {
        let mut keys = Vec::new();
        let mut values = Vec::new();
        if !self.consume_character('}') {
            loop {
                let (key, quoted) = self.expect_map_key()?;
                if self.consume_character(':') {
                    values.push(self.parse_expression()?);
                } else {
                    // {foo} shorthand reads foo off the scope
                    values.push(Expression::scope_read(&key));
                }
                keys.push(LiteralMapKey { key, quoted });
                if !self.consume_character(',') {
                    break;
                }
            }
            self.expect_character('}')?;
        }
        Ok(Expression::LiteralMap(LiteralMap { keys, values }))
    }

    fn expect_map_key(&mut self) -> Result<(String, bool)> {
        let Some(token) = self.advance() else {
            return Err(self.error("Unexpected end of expression"));
        };
        match token.token_type {
            TokenType::Identifier | TokenType::Keyword => Ok((token.str_value, false)),
            TokenType::String => Ok((token.str_value, true)),
            TokenType::Number => Ok((token.str_value, false)),
            _ => Err(self.error(&format!("Invalid object literal key '{}'", token.str_value))),
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.peek() {
            Some(t) if t.is_identifier() => {
                let name = t.str_value.clone();
                self.index += 1;
                Ok(name)
            }
            Some(t) => Err(self.error(&format!("Expected identifier, found '{}'", t.str_value))),
            None => Err(self.error("Expected identifier")),
        }
    }

    // declaration := identifier | '[' identifiers ']' | '{' identifiers '}'
    fn parse_for_declaration(&mut self) -> Result<ForDeclaration> {
        self.check_error_token()?;
        if self.consume_character('[') {
            let names = self.parse_destructuring_names(']')?;
            return Ok(ForDeclaration::ArrayDestructuring(names));
        }
        if self.consume_character('{') {
            let names = self.parse_destructuring_names('}')?;
            return Ok(ForDeclaration::ObjectDestructuring(names));
        }
        let name = self.expect_identifier()?;
        Ok(ForDeclaration::Identifier(name))
    }

    fn parse_destructuring_names(&mut self, close: char) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if !self.consume_character(close) {
            loop {
                names.push(self.expect_identifier()?);
                if !self.consume_character(',') {
                    break;
                }
            }
            self.expect_character(close)?;
        }
        Ok(names)
    }
}

fn binary_precedence(operation: &str) -> Option<u8> {
    match operation {
        "||" => Some(1),
        "&&" => Some(2),
        "==" | "!=" | "===" | "!==" => Some(3),
        "<" | ">" | "<=" | ">=" => Some(4),
        "+" | "-" => Some(5),
        "*" | "/" | "%" => Some(6),
        _ => None,
    }
}
