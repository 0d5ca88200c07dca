use osprey_compiler::attribute_parser::AttrSyntax;
use osprey_compiler::attribute_mapper::AttrMapper;
use osprey_compiler::bindable::{BindableDefinition, BindingMode, ResourceDefinition};
use osprey_compiler::binding_command::{
    BindingCommand, BindingCommandDefinition, CommandBuildInfo, CommandKind,
};
use osprey_compiler::configuration::StandardConfiguration;
use osprey_compiler::dom::Element;
use osprey_compiler::error::Result;
use osprey_compiler::expression_parser::ast::Expression;
use osprey_compiler::expression_parser::ExpressionParser;
use osprey_compiler::instructions::Instruction;

fn build(command_name: &str, node: &Element, syntax: &AttrSyntax) -> Instruction {
    let (registry, _) = StandardConfiguration::setup();
    let command = registry.lookup(command_name).expect("command registered");
    let info = CommandBuildInfo::PlainAttr { node, attr: syntax };
    command
        .build(&info, &ExpressionParser::new(), &AttrMapper::new())
        .expect("build succeeds")
}

fn build_bindable(
    command_name: &str,
    node: &Element,
    syntax: &AttrSyntax,
    bindable: &BindableDefinition,
    def: &ResourceDefinition,
) -> Instruction {
    let (registry, _) = StandardConfiguration::setup();
    let command = registry.lookup(command_name).expect("command registered");
    let info = CommandBuildInfo::Bindable {
        node,
        attr: syntax,
        bindable,
        def,
    };
    command
        .build(&info, &ExpressionParser::new(), &AttrMapper::new())
        .expect("build succeeds")
}

#[test]
fn test_fixed_mode_commands() {
    let node = Element::new("div");
    let syntax = AttrSyntax::new("value", "message", Some("to-view"), None);
    for (name, mode) in [
        ("one-time", BindingMode::OneTime),
        ("to-view", BindingMode::ToView),
        ("from-view", BindingMode::FromView),
        ("two-way", BindingMode::TwoWay),
    ] {
        let Instruction::PropertyBinding(prop) = build(name, &node, &syntax) else {
            panic!("{} should emit a property binding", name);
        };
        assert_eq!(prop.mode, mode);
        assert_eq!(prop.to, "value");
        assert_eq!(prop.from, Expression::scope_read("message"));
    }
}

#[test]
fn test_plain_target_maps_through_schema_then_camel_case() {
    let node = Element::new("div");

    let mapped = AttrSyntax::new("innerhtml", "html", Some("to-view"), None);
    let Instruction::PropertyBinding(prop) = build("to-view", &node, &mapped) else {
        panic!();
    };
    assert_eq!(prop.to, "innerHTML");

    let unmapped = AttrSyntax::new("my-prop", "x", Some("to-view"), None);
    let Instruction::PropertyBinding(prop) = build("to-view", &node, &unmapped) else {
        panic!();
    };
    assert_eq!(prop.to, "myProp");
}

#[test]
fn test_default_bind_two_way_capable_plain_attr() {
    let input = Element::new("input");
    let syntax = AttrSyntax::new("value", "message", Some("bind"), None);
    let Instruction::PropertyBinding(prop) = build("bind", &input, &syntax) else {
        panic!();
    };
    assert_eq!(prop.mode, BindingMode::TwoWay);
}

#[test]
fn test_default_bind_plain_attr_falls_back_to_view() {
    let div = Element::new("div");
    let syntax = AttrSyntax::new("title", "message", Some("bind"), None);
    let Instruction::PropertyBinding(prop) = build("bind", &div, &syntax) else {
        panic!();
    };
    assert_eq!(prop.mode, BindingMode::ToView);
}

#[test]
fn test_default_bind_uses_bindable_mode() {
    let node = Element::new("my-el");
    let syntax = AttrSyntax::new("value", "message", Some("bind"), None);
    let bindable = BindableDefinition::new("value").with_mode(BindingMode::FromView);
    let def = ResourceDefinition::element("my-el").with_bindable(bindable.clone());
    let Instruction::PropertyBinding(prop) = build_bindable("bind", &node, &syntax, &bindable, &def)
    else {
        panic!();
    };
    assert_eq!(prop.mode, BindingMode::FromView);
    assert_eq!(prop.to, "value");
}

#[test]
fn test_default_bind_falls_back_to_attribute_default_mode() {
    let node = Element::new("div");
    let syntax = AttrSyntax::new("tooltip", "message", Some("bind"), None);
    let bindable = BindableDefinition::new("value");
    let def = ResourceDefinition::attribute("tooltip")
        .with_bindable(bindable.clone())
        .with_default_binding_mode(BindingMode::TwoWay);
    let Instruction::PropertyBinding(prop) = build_bindable("bind", &node, &syntax, &bindable, &def)
    else {
        panic!();
    };
    assert_eq!(prop.mode, BindingMode::TwoWay);
}

#[test]
fn test_default_bind_unresolved_everywhere_is_to_view() {
    let node = Element::new("my-el");
    let syntax = AttrSyntax::new("value", "message", Some("bind"), None);
    let bindable = BindableDefinition::new("value");
    let def = ResourceDefinition::element("my-el").with_bindable(bindable.clone());
    let Instruction::PropertyBinding(prop) = build_bindable("bind", &node, &syntax, &bindable, &def)
    else {
        panic!();
    };
    assert_eq!(prop.mode, BindingMode::ToView);
}

#[test]
fn test_empty_value_shorthand_on_element_bindable() {
    // <my-el first-name.bind> reads as first-name.bind="firstName"
    let node = Element::new("my-el");
    let syntax = AttrSyntax::new("first-name", "", Some("bind"), None);
    let bindable = BindableDefinition::new("first-name");
    let def = ResourceDefinition::element("my-el").with_bindable(bindable.clone());
    let Instruction::PropertyBinding(prop) = build_bindable("bind", &node, &syntax, &bindable, &def)
    else {
        panic!();
    };
    assert_eq!(prop.to, "firstName");
    assert_eq!(prop.from, Expression::scope_read("firstName"));
}

#[test]
fn test_for_without_semicolon_has_no_props() {
    let node = Element::new("template");
    let syntax = AttrSyntax::new("repeat", "item of items", Some("for"), None);
    let Instruction::IteratorBinding(iter) = build("for", &node, &syntax) else {
        panic!();
    };
    assert_eq!(iter.to, "repeat");
    assert_eq!(iter.for_of.semi_idx, -1);
    assert!(iter.props.is_empty());
}

#[test]
fn test_for_auxiliary_clause_becomes_multi_attr_prop() {
    let node = Element::new("template");
    let syntax = AttrSyntax::new("repeat", "item of items; key: item.id", Some("for"), None);
    let Instruction::IteratorBinding(iter) = build("for", &node, &syntax) else {
        panic!();
    };
    assert_eq!(iter.props.len(), 1);
    assert_eq!(iter.props[0].to, "key");
    assert_eq!(iter.props[0].value, "item.id");
    assert_eq!(iter.props[0].command, None);
}

#[test]
fn test_for_auxiliary_clause_with_nested_command() {
    let node = Element::new("template");
    let syntax = AttrSyntax::new("repeat", "item of items; key.bind: k", Some("for"), None);
    let Instruction::IteratorBinding(iter) = build("for", &node, &syntax) else {
        panic!();
    };
    assert_eq!(iter.props[0].to, "key");
    assert_eq!(iter.props[0].command.as_deref(), Some("bind"));
    assert_eq!(iter.props[0].value, "k");
}

#[test]
fn test_for_clause_without_colon_is_ignored() {
    let node = Element::new("template");
    let syntax = AttrSyntax::new("repeat", "item of items; whatever", Some("for"), None);
    let Instruction::IteratorBinding(iter) = build("for", &node, &syntax) else {
        panic!();
    };
    assert!(iter.props.is_empty());
}

#[test]
fn test_trigger_listener_shape() {
    let node = Element::new("button");
    let syntax = AttrSyntax::new(
        "click",
        "save()",
        Some("trigger"),
        Some(vec![
            "click".to_string(),
            "trigger".to_string(),
            "prevent".to_string(),
        ]),
    );
    let Instruction::ListenerBinding(listener) = build("trigger", &node, &syntax) else {
        panic!();
    };
    assert_eq!(listener.to, "click");
    assert!(!listener.capture);
    assert_eq!(listener.modifier.as_deref(), Some("prevent"));
}

#[test]
fn test_capture_sets_capture_flag() {
    let node = Element::new("button");
    let syntax = AttrSyntax::new("click", "save()", Some("capture"), None);
    let Instruction::ListenerBinding(listener) = build("capture", &node, &syntax) else {
        panic!();
    };
    assert!(listener.capture);
    assert_eq!(listener.modifier, None);
}

#[test]
fn test_attr_style_class_targets() {
    let node = Element::new("div");

    let syntax = AttrSyntax::new("aria-label", "label", Some("attr"), None);
    let Instruction::AttributeBinding(binding) = build("attr", &node, &syntax) else {
        panic!();
    };
    assert_eq!(binding.attr, "aria-label");
    assert_eq!(binding.to, "aria-label");

    let syntax = AttrSyntax::new("background-color", "color", Some("style"), None);
    let Instruction::AttributeBinding(binding) = build("style", &node, &syntax) else {
        panic!();
    };
    assert_eq!(binding.attr, "style");
    assert_eq!(binding.to, "background-color");

    let syntax = AttrSyntax::new("active", "isActive", Some("class"), None);
    let Instruction::AttributeBinding(binding) = build("class", &node, &syntax) else {
        panic!();
    };
    assert_eq!(binding.attr, "class");
    assert_eq!(binding.to, "active");
}

#[test]
fn test_ref_binding_shape() {
    let node = Element::new("div");
    let syntax = AttrSyntax::new("element", "el", Some("ref"), None);
    let Instruction::RefBinding(binding) = build("ref", &node, &syntax) else {
        panic!();
    };
    assert_eq!(binding.to, "element");
    assert_eq!(binding.from, Expression::scope_read("el"));
}

#[test]
fn test_spread_emits_marker_instruction() {
    let node = Element::new("div");
    let syntax = AttrSyntax::new("", "", Some("...$attrs"), None);
    assert_eq!(build("...$attrs", &node, &syntax), Instruction::SpreadBinding);
}

#[test]
fn test_instruction_serialization_shape() {
    let node = Element::new("div");
    let syntax = AttrSyntax::new("title", "message", Some("to-view"), None);
    let json = serde_json::to_value(build("to-view", &node, &syntax)).unwrap();
    assert_eq!(json["type"], "PropertyBinding");
    assert_eq!(json["data"]["to"], "title");
    assert_eq!(json["data"]["mode"], "ToView");
    assert_eq!(json["data"]["from"]["type"], "PropertyRead");
}

#[test]
fn test_build_is_deterministic() {
    let node = Element::new("input");
    let syntax = AttrSyntax::new("value", "message", Some("bind"), None);
    assert_eq!(build("bind", &node, &syntax), build("bind", &node, &syntax));
}

struct MarkerCommand;

impl BindingCommand for MarkerCommand {
    fn kind(&self) -> CommandKind {
        CommandKind::None
    }

    fn build(
        &self,
        _info: &CommandBuildInfo<'_>,
        _parser: &ExpressionParser,
        _mapper: &AttrMapper,
    ) -> Result<Instruction> {
        Ok(Instruction::SpreadBinding)
    }
}

#[test]
fn test_duplicate_registration_keeps_first() {
    let (mut registry, _) = StandardConfiguration::setup();
    registry.register(
        BindingCommandDefinition::new("bind", CommandKind::None),
        Box::new(MarkerCommand),
    );

    // still the original: builds a property binding, not the marker
    let node = Element::new("div");
    let syntax = AttrSyntax::new("title", "x", Some("bind"), None);
    let info = CommandBuildInfo::PlainAttr {
        node: &node,
        attr: &syntax,
    };
    let command = registry.lookup("bind").unwrap();
    let instruction = command
        .build(&info, &ExpressionParser::new(), &AttrMapper::new())
        .unwrap();
    assert!(matches!(instruction, Instruction::PropertyBinding(_)));
}

#[test]
fn test_name_colliding_with_alias_is_skipped() {
    let mut registry = osprey_compiler::BindingCommandRegistry::new();
    registry.register(
        BindingCommandDefinition::new("mark", CommandKind::None).with_aliases(&["m".to_string()]),
        Box::new(MarkerCommand),
    );
    // "m" is taken as an alias; a command named "m" must not register
    registry.register(
        BindingCommandDefinition::new("m", CommandKind::None),
        Box::new(MarkerCommand),
    );

    let names: Vec<&str> = registry.definitions().map(|def| def.name.as_str()).collect();
    assert_eq!(names, vec!["mark"]);
    assert_eq!(registry.definition("m").unwrap().name, "mark");
}

#[test]
fn test_for_auxiliary_clause_sees_previously_registered_commands() {
    let mut registry = osprey_compiler::BindingCommandRegistry::new();
    registry.register(
        BindingCommandDefinition::new("mark", CommandKind::None),
        Box::new(MarkerCommand),
    );
    StandardConfiguration::register(&mut registry);

    let node = Element::new("template");
    let syntax = AttrSyntax::new("repeat", "item of items; key.mark: k", Some("for"), None);
    let info = CommandBuildInfo::PlainAttr {
        node: &node,
        attr: &syntax,
    };
    let instruction = registry
        .lookup("for")
        .unwrap()
        .build(&info, &ExpressionParser::new(), &AttrMapper::new())
        .unwrap();
    let Instruction::IteratorBinding(iter) = instruction else {
        panic!("expected an iterator binding");
    };
    assert_eq!(iter.props[0].to, "key");
    assert_eq!(iter.props[0].command.as_deref(), Some("mark"));
}

#[test]
fn test_lookup_by_alias() {
    let mut registry = osprey_compiler::BindingCommandRegistry::new();
    registry.register(
        BindingCommandDefinition::new("mark", CommandKind::None).with_aliases(&["m".to_string()]),
        Box::new(MarkerCommand),
    );
    assert!(registry.lookup("m").is_some());
    assert!(registry.lookup("mark").is_some());
    assert!(registry.lookup("other").is_none());

    let def = registry.definition("m").unwrap();
    assert_eq!(def.name, "mark");
    assert_eq!(def.key, "binding-command:mark");
}

#[test]
fn test_definition_aliases_never_duplicate_name() {
    let def = BindingCommandDefinition::new("bind", CommandKind::None)
        .with_aliases(&["bind".to_string(), "b".to_string()]);
    assert_eq!(def.aliases, vec!["b".to_string()]);
}

#[test]
fn test_expression_error_propagates_with_code() {
    let (registry, _) = StandardConfiguration::setup();
    let node = Element::new("div");
    let syntax = AttrSyntax::new("title", "a ++", Some("bind"), None);
    let info = CommandBuildInfo::PlainAttr {
        node: &node,
        attr: &syntax,
    };
    let err = registry
        .lookup("bind")
        .unwrap()
        .build(&info, &ExpressionParser::new(), &AttrMapper::new())
        .unwrap_err();
    assert_eq!(err.code(), "OSP0151");
}
