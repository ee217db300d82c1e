use std::borrow::Cow;

use serde_json::Value;

use crate::value::PropertyValue;

static NULL: Value = Value::Null;

/// Plaintext form of a property value.
///
/// Microformats and embedded HTML yield their `value`, `{text: ..}` objects
/// their `text`; anything else comes back untouched.
pub fn to_plaintext(v: &Value) -> &Value {
    match PropertyValue::classify(v) {
        PropertyValue::EmbeddedHtml { value, .. } => value,
        PropertyValue::Microformat(map) => map.get("value").unwrap_or(&NULL),
        PropertyValue::TextObject(text) => text,
        PropertyValue::Text(_) | PropertyValue::Opaque(_) => v,
    }
}

/// HTML form of a property value.
///
/// Only embedded HTML is returned as-is; every other shape is treated as
/// untrusted text and escaped. Shapes with no textual form yield `""`.
pub fn to_html(v: &Value) -> Cow<'_, str> {
    match PropertyValue::classify(v) {
        PropertyValue::EmbeddedHtml { html, .. } => scalar_text(html).unwrap_or_default(),
        PropertyValue::Microformat(map) => map
            .get("value")
            .and_then(scalar_text)
            .map(escape_html)
            .unwrap_or_default(),
        PropertyValue::Text(text) => escape_html(Cow::Borrowed(text)),
        PropertyValue::TextObject(_) | PropertyValue::Opaque(_) => {
            scalar_text(v).map(escape_html).unwrap_or_default()
        }
    }
}

fn scalar_text(v: &Value) -> Option<Cow<'_, str>> {
    match v {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Escapes `& < > " '` the way HTML attribute and text contexts expect.
pub fn escape_html(text: Cow<'_, str>) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return text;
    }
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
