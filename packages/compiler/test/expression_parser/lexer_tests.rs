use osprey_compiler::expression_parser::lexer::{Lexer, TokenType};

#[test]
fn test_tokenize_identifiers_and_dots() {
    let tokens = Lexer::new().tokenize("foo.bar");
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].token_type, TokenType::Identifier);
    assert_eq!(tokens[0].str_value, "foo");
    assert!(tokens[1].is_character('.'));
    assert_eq!(tokens[2].str_value, "bar");
}

#[test]
fn test_tokenize_keywords() {
    let tokens = Lexer::new().tokenize("item of items");
    assert_eq!(tokens[0].token_type, TokenType::Identifier);
    assert!(tokens[1].is_keyword("of"));
    assert_eq!(tokens[2].token_type, TokenType::Identifier);
}

#[test]
fn test_tokenize_numbers() {
    let tokens = Lexer::new().tokenize("42 3.25");
    assert_eq!(tokens[0].token_type, TokenType::Number);
    assert_eq!(tokens[0].num_value, 42.0);
    assert_eq!(tokens[1].num_value, 3.25);
}

#[test]
fn test_number_then_member_access() {
    // the dot is a member access, not a decimal point, without a digit after
    let tokens = Lexer::new().tokenize("42.toString");
    assert_eq!(tokens[0].token_type, TokenType::Number);
    assert!(tokens[1].is_character('.'));
    assert_eq!(tokens[2].str_value, "toString");
}

#[test]
fn test_tokenize_strings_with_escapes() {
    let tokens = Lexer::new().tokenize(r#"'a\'b' "c\nd""#);
    assert_eq!(tokens[0].token_type, TokenType::String);
    assert_eq!(tokens[0].str_value, "a'b");
    assert_eq!(tokens[1].str_value, "c\nd");
}

#[test]
fn test_unterminated_string_is_error() {
    let tokens = Lexer::new().tokenize("'oops");
    assert!(tokens.last().unwrap().is_error());
}

#[test]
fn test_tokenize_operators() {
    let tokens = Lexer::new().tokenize("a === b && c <= d");
    assert!(tokens[1].is_operator("==="));
    assert!(tokens[3].is_operator("&&"));
    assert!(tokens[5].is_operator("<="));
}

#[test]
fn test_lone_equals_is_character() {
    // assignment: '=' is punctuation, '==' is an operator
    let tokens = Lexer::new().tokenize("a = b");
    assert!(tokens[1].is_character('='));
}

#[test]
fn test_token_indices_track_input_offsets() {
    let tokens = Lexer::new().tokenize("item of items; key");
    let semi = tokens.iter().find(|t| t.is_character(';')).unwrap();
    assert_eq!(semi.index, 13);
}

#[test]
fn test_error_token_terminates_scan() {
    let tokens = Lexer::new().tokenize("a # b");
    assert!(tokens[1].is_error());
    assert_eq!(tokens.len(), 2);
}
