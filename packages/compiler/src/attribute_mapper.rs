//! Attribute Mapper
//!
//! Answers two questions for the binding commands: what is the canonical
//! property name for a node's attribute, and does the node/attribute pair
//! support two-way binding. Backed by static schema tables.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::dom::Element;

/// Attribute → property mappings that apply to every element.
static GLOBAL_ATTR_TO_PROP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("accesskey", "accessKey"),
        ("contenteditable", "contentEditable"),
        ("tabindex", "tabIndex"),
        ("textcontent", "textContent"),
        ("innerhtml", "innerHTML"),
        ("scrolltop", "scrollTop"),
        ("scrollleft", "scrollLeft"),
        ("readonly", "readOnly"),
    ])
});

/// Per-element attribute → property mappings, keyed by tag name.
static TAG_ATTR_TO_PROP: Lazy<HashMap<&'static str, HashMap<&'static str, &'static str>>> =
    Lazy::new(|| {
        HashMap::from([
            ("label", HashMap::from([("for", "htmlFor")])),
            ("img", HashMap::from([("usemap", "useMap")])),
            (
                "input",
                HashMap::from([
                    ("maxlength", "maxLength"),
                    ("minlength", "minLength"),
                    ("formaction", "formAction"),
                    ("formenctype", "formEncType"),
                    ("formmethod", "formMethod"),
                    ("formnovalidate", "formNoValidate"),
                    ("formtarget", "formTarget"),
                    ("inputmode", "inputMode"),
                ]),
            ),
            ("textarea", HashMap::from([("maxlength", "maxLength")])),
            (
                "td",
                HashMap::from([("rowspan", "rowSpan"), ("colspan", "colSpan")]),
            ),
            (
                "th",
                HashMap::from([("rowspan", "rowSpan"), ("colspan", "colSpan")]),
            ),
        ])
    });

/// Maps attribute names to property names against the DOM schema.
///
/// Stateless after construction; one instance serves every template
/// compilation. Mapping is a pure function of (tag name, attribute name).
#[derive(Debug, Default)]
pub struct AttrMapper;

impl AttrMapper {
    pub fn new() -> Self {
        AttrMapper
    }

    /// Canonical property name for `attr` on the given node, or `None` when
    /// the schema has no entry and the caller should fall back to
    /// camel-casing.
    pub fn map(&self, node: &Element, attr: &str) -> Option<&'static str> {
        TAG_ATTR_TO_PROP
            .get(node.name.as_str())
            .and_then(|table| table.get(attr).copied())
            .or_else(|| GLOBAL_ATTR_TO_PROP.get(attr).copied())
    }

    /// Whether the node/attribute pair supports two-way binding. Drives the
    /// default `bind` command's mode choice for plain attributes.
    pub fn is_two_way(&self, node: &Element, attr: &str) -> bool {
        match attr {
            "scrolltop" | "scrollleft" => true,
            "value" => matches!(node.name.as_str(), "input" | "textarea" | "select"),
            "files" | "checked" => node.name == "input",
            "textcontent" | "innerhtml" => is_content_editable(node),
            _ => false,
        }
    }
}

fn is_content_editable(node: &Element) -> bool {
    matches!(node.get_attr("contenteditable"), Some("") | Some("true"))
}
