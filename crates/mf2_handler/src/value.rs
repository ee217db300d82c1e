use serde_json::{Map, Value};

use crate::predicate::{is_embedded_html, is_microformat};

/// Borrowed view over a single MF2 property value.
///
/// Classification order matters: a nested `e-*` microformat carries both
/// `value` and `html`, and is treated as embedded HTML.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue<'a> {
    Text(&'a str),
    EmbeddedHtml { value: &'a Value, html: &'a Value },
    Microformat(&'a Map<String, Value>),
    /// A mapping carrying a `text` key; holds that key's value.
    TextObject(&'a Value),
    Opaque(&'a Value),
}

impl<'a> PropertyValue<'a> {
    /// Picks the variant for `value`; any JSON value has exactly one.
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::String(text) => PropertyValue::Text(text),
            Value::Object(map) if is_embedded_html(value) => PropertyValue::EmbeddedHtml {
                value: &map["value"],
                html: &map["html"],
            },
            Value::Object(map) if is_microformat(value) => PropertyValue::Microformat(map),
            Value::Object(map) => match map.get("text") {
                Some(text) => PropertyValue::TextObject(text),
                None => PropertyValue::Opaque(value),
            },
            _ => PropertyValue::Opaque(value),
        }
    }
}
