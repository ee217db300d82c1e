use mention_logging::{mention_debug, mention_trace};
use serde_json::{Map, Value};

use crate::authorship::get_representative_author;
use crate::predicate::{has_property, has_rel, is_microformat_collection, is_type};
use crate::property::property_values;
use crate::settings::UrlValidation;
use crate::urls::urls_match;

/// Top-level items of a parsed document.
///
/// When the first item is an `h-feed` with `children`, those children are
/// returned instead. Only one level is flattened.
pub fn get_items(doc: &Value) -> &[Value] {
    if !is_microformat_collection(doc) {
        return &[];
    }
    let items = doc["items"].as_array().map(Vec::as_slice).unwrap_or_default();
    match items.first() {
        Some(first) if is_type(first, "h-feed") => match first.get("children") {
            Some(children) => {
                mention_trace!("Flattening h-feed into its children");
                children.as_array().map(Vec::as_slice).unwrap_or_default()
            }
            None => items,
        },
        _ => items,
    }
}

/// Picks the item that represents `url`.
///
/// A page with a single item is represented by it regardless of its `url`;
/// otherwise the first item whose `url` property matches wins.
pub fn find_representative_item<'a>(
    doc: &'a Value,
    url: &str,
    validation: UrlValidation,
) -> Option<&'a Value> {
    let items = get_items(doc);
    match items {
        [] => {
            mention_debug!("No items found for {}", url);
            None
        }
        [only] => Some(only),
        _ => {
            let found = items.iter().find(|item| {
                property_values(item, "url")
                    .is_some_and(|urls| urls_match(url, urls, true, validation))
            });
            if found.is_none() {
                mention_debug!("None of {} items matches {}", items.len(), url);
            }
            found
        }
    }
}

/// The representative item with its author and syndication filled in.
///
/// Returns an empty map when no item represents `url`. The document is not
/// modified; the item is copied.
pub fn get_representative_item(
    doc: &Value,
    url: &str,
    validation: UrlValidation,
) -> Map<String, Value> {
    let Some(Value::Object(found)) = find_representative_item(doc, url, validation) else {
        return Map::new();
    };
    let mut item = Value::Object(found.clone());

    if !has_property(&item, "author") {
        if let Some(author) = get_representative_author(&item, doc, validation) {
            insert_property(&mut item, "author", vec![author]);
        }
    }

    if has_rel(doc, "syndication") && !has_property(&item, "syndication") {
        let syndication = doc["rels"]["syndication"].as_array().cloned().unwrap_or_default();
        insert_property(&mut item, "syndication", syndication);
    }

    match item {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn insert_property(item: &mut Value, name: &str, values: Vec<Value>) {
    let Value::Object(map) = item else {
        return;
    };
    let properties = map
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));
    if !properties.is_object() {
        *properties = Value::Object(Map::new());
    }
    if let Value::Object(properties) = properties {
        properties.insert(name.to_string(), Value::Array(values));
    }
}
