use osprey_compiler::expression_parser::ast::{
    Expression, ExpressionKind, ForDeclaration, LiteralPrimitive,
};
use osprey_compiler::expression_parser::ExpressionParser;

#[test]
fn test_parse_scope_property_read() {
    let parser = ExpressionParser::new();
    let ast = parser.parse("message", ExpressionKind::IsProperty).unwrap();
    assert_eq!(ast, Expression::scope_read("message"));
}

#[test]
fn test_parse_nested_property_read() {
    let parser = ExpressionParser::new();
    let ast = parser.parse("user.name", ExpressionKind::IsProperty).unwrap();
    let Expression::PropertyRead(read) = ast else {
        panic!("expected a property read");
    };
    assert_eq!(read.name, "name");
    assert_eq!(*read.receiver, Expression::scope_read("user"));
}

#[test]
fn test_parse_keyed_read() {
    let parser = ExpressionParser::new();
    let ast = parser.parse("items[0]", ExpressionKind::IsProperty).unwrap();
    let Expression::KeyedRead(read) = ast else {
        panic!("expected a keyed read");
    };
    assert_eq!(
        *read.key,
        Expression::LiteralPrimitive(LiteralPrimitive::Number { value: 0.0 })
    );
}

#[test]
fn test_parse_call_with_args() {
    let parser = ExpressionParser::new();
    let ast = parser
        .parse("save(item, true)", ExpressionKind::IsFunction)
        .unwrap();
    let Expression::Call(call) = ast else {
        panic!("expected a call");
    };
    assert_eq!(*call.receiver, Expression::scope_read("save"));
    assert_eq!(call.args.len(), 2);
    assert_eq!(
        call.args[1],
        Expression::LiteralPrimitive(LiteralPrimitive::Boolean { value: true })
    );
}

#[test]
fn test_parse_binary_precedence() {
    let parser = ExpressionParser::new();
    let ast = parser.parse("a + b * c", ExpressionKind::IsProperty).unwrap();
    let Expression::Binary(add) = ast else {
        panic!("expected a binary node");
    };
    assert_eq!(add.operation, "+");
    let Expression::Binary(mul) = *add.right else {
        panic!("multiplication should bind tighter");
    };
    assert_eq!(mul.operation, "*");
}

#[test]
fn test_parse_conditional() {
    let parser = ExpressionParser::new();
    let ast = parser
        .parse("ok ? 'yes' : 'no'", ExpressionKind::IsProperty)
        .unwrap();
    assert!(matches!(ast, Expression::Conditional(_)));
}

#[test]
fn test_parse_assignment_requires_assignable_target() {
    let parser = ExpressionParser::new();
    assert!(parser.parse("a.b = c", ExpressionKind::IsProperty).is_ok());
    assert!(parser.parse("1 = c", ExpressionKind::IsProperty).is_err());
}

#[test]
fn test_parse_object_literal_shorthand() {
    let parser = ExpressionParser::new();
    let ast = parser
        .parse("{foo, bar: 1}", ExpressionKind::IsProperty)
        .unwrap();
    let Expression::LiteralMap(map) = ast else {
        panic!("expected a map literal");
    };
    assert_eq!(map.keys.len(), 2);
    assert_eq!(map.values[0], Expression::scope_read("foo"));
}

#[test]
fn test_parse_trailing_garbage_fails() {
    let parser = ExpressionParser::new();
    let err = parser.parse("a b", ExpressionKind::IsProperty).unwrap_err();
    assert_eq!(err.code(), "OSP0151");
}

#[test]
fn test_parse_for_of_simple() {
    let parser = ExpressionParser::new();
    let stmt = parser.parse_for_of("item of items").unwrap();
    assert_eq!(stmt.declaration, ForDeclaration::Identifier("item".to_string()));
    assert_eq!(*stmt.iterable, Expression::scope_read("items"));
    assert_eq!(stmt.semi_idx, -1);
}

#[test]
fn test_parse_for_of_semi_idx_is_byte_offset() {
    let parser = ExpressionParser::new();
    let stmt = parser.parse_for_of("item of items; key: id").unwrap();
    assert_eq!(stmt.semi_idx, 13);
}

#[test]
fn test_parse_for_of_array_destructuring() {
    let parser = ExpressionParser::new();
    let stmt = parser.parse_for_of("[key, value] of entries").unwrap();
    assert_eq!(
        stmt.declaration,
        ForDeclaration::ArrayDestructuring(vec!["key".to_string(), "value".to_string()])
    );
}

#[test]
fn test_parse_for_of_object_destructuring() {
    let parser = ExpressionParser::new();
    let stmt = parser.parse_for_of("{id, name} of rows").unwrap();
    assert_eq!(
        stmt.declaration,
        ForDeclaration::ObjectDestructuring(vec!["id".to_string(), "name".to_string()])
    );
}

#[test]
fn test_parse_for_of_missing_of_fails() {
    let parser = ExpressionParser::new();
    assert!(parser.parse_for_of("item in items").is_err());
    assert!(parser.parse_for_of("items").is_err());
}

#[test]
fn test_parse_same_input_same_result() {
    let parser = ExpressionParser::new();
    let first = parser.parse("a.b + c", ExpressionKind::IsProperty).unwrap();
    let second = parser.parse("a.b + c", ExpressionKind::IsProperty).unwrap();
    assert_eq!(first, second);
}
