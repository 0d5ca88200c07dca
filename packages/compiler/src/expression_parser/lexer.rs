//! Expression Lexer
//!
//! Tokenizes binding expression text into tokens for the recursive descent
//! parser.

use serde::{Deserialize, Serialize};

use crate::chars;

/// Token types in binding expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    Character = 0,
    Identifier = 1,
    Keyword = 2,
    String = 3,
    Operator = 4,
    Number = 5,
    Error = 6,
}

const KEYWORDS: &[&str] = &["this", "true", "false", "null", "undefined", "of", "in", "typeof"];

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub index: usize,
    pub end: usize,
    pub token_type: TokenType,
    pub num_value: f64,
    pub str_value: String,
}

impl Token {
    pub fn new(index: usize, end: usize, token_type: TokenType, num_value: f64, str_value: String) -> Self {
        Token {
            index,
            end,
            token_type,
            num_value,
            str_value,
        }
    }

    fn character(index: usize, ch: char) -> Self {
        Token::new(index, index + ch.len_utf8(), TokenType::Character, 0.0, ch.to_string())
    }

    fn operator(index: usize, end: usize, str_value: &str) -> Self {
        Token::new(index, end, TokenType::Operator, 0.0, str_value.to_string())
    }

    pub fn is_character(&self, code: char) -> bool {
        self.token_type == TokenType::Character && self.str_value.chars().next() == Some(code)
    }

    pub fn is_identifier(&self) -> bool {
        self.token_type == TokenType::Identifier
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.token_type == TokenType::Keyword && self.str_value == keyword
    }

    pub fn is_operator(&self, operator: &str) -> bool {
        self.token_type == TokenType::Operator && self.str_value == operator
    }

    pub fn is_error(&self) -> bool {
        self.token_type == TokenType::Error
    }
}

/// Lexer for binding expressions
#[derive(Debug, Default)]
pub struct Lexer;

impl Lexer {
    pub fn new() -> Self {
        Lexer
    }

    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        Scanner::new(text).scan()
    }
}

struct Scanner<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            input,
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    fn scan(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(&(index, ch)) = self.chars.get(self.pos) else {
                break;
            };
            let token = if chars::is_identifier_start(ch) {
                self.scan_identifier(index)
            } else if ch.is_ascii_digit() {
                self.scan_number(index)
            } else if ch == chars::SQ || ch == chars::DQ {
                self.scan_string(index, ch)
            } else {
                self.scan_operator_or_character(index, ch)
            };
            let is_error = token.is_error();
            tokens.push(token);
            if is_error {
                break;
            }
        }
        tokens
    }

    fn skip_whitespace(&mut self) {
        while let Some(&(_, ch)) = self.chars.get(self.pos) {
            if chars::is_whitespace(ch) {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, start: usize) -> Token {
        while let Some(&(_, ch)) = self.chars.get(self.pos) {
            if chars::is_identifier_part(ch) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let end = self.offset();
        let text = &self.input[start..end];
        let token_type = if KEYWORDS.contains(&text) {
            TokenType::Keyword
        } else {
            TokenType::Identifier
        };
        Token::new(start, end, token_type, 0.0, text.to_string())
    }

    fn scan_number(&mut self, start: usize) -> Token {
        let mut seen_period = false;
        while let Some(&(_, ch)) = self.chars.get(self.pos) {
            if ch.is_ascii_digit() {
                self.pos += 1;
            } else if ch == chars::PERIOD && !seen_period && self.peek_digit_after() {
                seen_period = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let end = self.offset();
        let text = &self.input[start..end];
        match text.parse::<f64>() {
            Ok(value) => Token::new(start, end, TokenType::Number, value, text.to_string()),
            Err(_) => Token::new(
                start,
                end,
                TokenType::Error,
                0.0,
                format!("Invalid number '{}'", text),
            ),
        }
    }

    fn peek_digit_after(&self) -> bool {
        self.chars
            .get(self.pos + 1)
            .map(|&(_, ch)| ch.is_ascii_digit())
            .unwrap_or(false)
    }

    fn scan_string(&mut self, start: usize, quote: char) -> Token {
        self.pos += 1; // opening quote
        let mut buffer = String::new();
        while let Some(&(_, ch)) = self.chars.get(self.pos) {
            if ch == quote {
                self.pos += 1;
                let end = self.offset();
                return Token::new(start, end, TokenType::String, 0.0, buffer);
            }
            if ch == chars::BACKSLASH {
                self.pos += 1;
                let Some(&(_, escaped)) = self.chars.get(self.pos) else {
                    break;
                };
                buffer.push(unescape(escaped));
                self.pos += 1;
            } else {
                buffer.push(ch);
                self.pos += 1;
            }
        }
        Token::new(
            start,
            self.offset(),
            TokenType::Error,
            0.0,
            "Unterminated string".to_string(),
        )
    }

    fn scan_operator_or_character(&mut self, start: usize, ch: char) -> Token {
        match ch {
            chars::LPAREN | chars::RPAREN | chars::LBRACKET | chars::RBRACKET | chars::LBRACE
            | chars::RBRACE | chars::COMMA | chars::COLON | chars::SEMICOLON | chars::PERIOD
            | chars::QUESTION => {
                self.pos += 1;
                Token::character(start, ch)
            }
            chars::PLUS | chars::MINUS | chars::STAR | chars::SLASH | chars::PERCENT => {
                self.pos += 1;
                Token::operator(start, self.offset(), &ch.to_string())
            }
            chars::EQ | chars::BANG | chars::LT | chars::GT => self.scan_comparison(start, ch),
            chars::AMPERSAND | chars::BAR => self.scan_logical(start, ch),
            _ => {
                self.pos += 1;
                Token::new(
                    start,
                    self.offset(),
                    TokenType::Error,
                    0.0,
                    format!("Unexpected character '{}'", ch),
                )
            }
        }
    }

    // =, ==, ===, !, !=, !==, <, <=, >, >=
    fn scan_comparison(&mut self, start: usize, first: char) -> Token {
        self.pos += 1;
        let mut text = first.to_string();
        while text.len() < 3 {
            match self.chars.get(self.pos) {
                Some(&(_, chars::EQ)) => {
                    text.push(chars::EQ);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if text == "=" {
            return Token::character(start, chars::EQ);
        }
        Token::operator(start, self.offset(), &text)
    }

    // && and ||
    fn scan_logical(&mut self, start: usize, first: char) -> Token {
        self.pos += 1;
        match self.chars.get(self.pos) {
            Some(&(_, second)) if second == first => {
                self.pos += 1;
                Token::operator(start, self.offset(), &format!("{}{}", first, second))
            }
            _ => Token::new(
                start,
                self.offset(),
                TokenType::Error,
                0.0,
                format!("Unexpected character '{}'", first),
            ),
        }
    }

    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map(|&(index, _)| index)
            .unwrap_or(self.input.len())
    }
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => chars::LF,
        'r' => chars::CR,
        't' => chars::TAB,
        '0' => chars::EOF,
        other => other,
    }
}
