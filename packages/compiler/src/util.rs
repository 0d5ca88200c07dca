//! Utility Functions
//!
//! Common string helpers shared by the attribute parser, the binding
//! commands and the attribute mapper.

use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for dash-case to camelCase conversion
static DASH_CASE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+([a-z0-9])").unwrap());

/// Convert a dash-case attribute name to its camelCase property form.
///
/// Camel-casing is idempotent: a name without dashes is returned unchanged,
/// so `camel_case(camel_case(x)) == camel_case(x)`.
pub fn camel_case(input: &str) -> String {
    DASH_CASE_REGEXP
        .replace_all(input, |caps: &regex::Captures| {
            caps.get(1).unwrap().as_str().to_uppercase()
        })
        .to_string()
}

/// Split a string at the first occurrence of `character`, trimming both
/// halves. Returns `None` when the character is absent.
pub fn split_at_first(input: &str, character: char) -> Option<(String, String)> {
    input.find(character).map(|idx| {
        (
            input[..idx].trim().to_string(),
            input[idx + 1..].trim().to_string(),
        )
    })
}

/// Merge alias lists into one deduplicated vector, preserving first-seen
/// order. The command `name` itself is never admitted as an alias.
pub fn merge_aliases(name: &str, lists: &[&[String]]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for list in lists {
        for alias in *list {
            if alias != name && !merged.iter().any(|a| a == alias) {
                merged.push(alias.clone());
            }
        }
    }
    merged
}
