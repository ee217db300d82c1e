use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use mention_logging::mention_debug;
use serde_json::Value;

use crate::predicate::{is_microformat, non_empty_list};
use crate::scalar::{to_html, to_plaintext};

/// Formats that carry an explicit offset, tried after RFC 3339.
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%d %H:%M%:z",
];

/// Formats without an offset; these are read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The values of `mf.properties[name]`, if it is a non-empty sequence.
pub fn property_values<'a>(mf: &'a Value, name: &str) -> Option<&'a [Value]> {
    non_empty_list(mf.get("properties"), name)
}

/// Plaintext of the first value of `name`, or `fallback`.
pub fn get_plaintext<'a>(mf: &'a Value, name: &str, fallback: Option<&'a Value>) -> Option<&'a Value> {
    match property_values(mf, name) {
        Some(values) => Some(to_plaintext(&values[0])),
        None => fallback,
    }
}

/// Plaintext of every value of `name`, in document order, or `fallback`.
pub fn get_plaintext_array<'a>(
    mf: &'a Value,
    name: &str,
    fallback: Option<Vec<&'a Value>>,
) -> Option<Vec<&'a Value>> {
    match property_values(mf, name) {
        Some(values) => Some(values.iter().map(to_plaintext).collect()),
        None => fallback,
    }
}

/// HTML of the first value of `name`, or `fallback`.
pub fn get_html<'a>(mf: &'a Value, name: &str, fallback: Option<&'a str>) -> Option<Cow<'a, str>> {
    match property_values(mf, name) {
        Some(values) => Some(to_html(&values[0])),
        None => fallback.map(Cow::Borrowed),
    }
}

/// Raw values for each of `names` present on `mf`.
///
/// Names that are absent, or not a non-empty sequence, are left out.
pub fn get_property_array<'a>(mf: &'a Value, names: &[&str]) -> BTreeMap<String, Vec<&'a Value>> {
    let mut data = BTreeMap::new();
    if !is_microformat(mf) {
        return data;
    }
    for name in names {
        if let Some(values) = property_values(mf, name) {
            data.insert((*name).to_string(), values.iter().collect());
        }
    }
    data
}

/// Parses the first plaintext value of `name` as a datetime.
///
/// Absent properties and unparseable values both yield `fallback`.
pub fn get_datetime_property(
    name: &str,
    mf: &Value,
    fallback: Option<DateTime<FixedOffset>>,
) -> Option<DateTime<FixedOffset>> {
    let Some(raw) = get_plaintext(mf, name, None) else {
        return fallback;
    };
    match raw.as_str().and_then(parse_datetime) {
        Some(parsed) => Some(parsed),
        None => {
            mention_debug!("Unparseable {} datetime {}", name, raw);
            fallback
        }
    }
}

/// Lenient ISO-8601 parsing; values without an offset are taken as UTC.
pub fn parse_datetime(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed);
    }
    if let Some(parsed) = OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(text, format).ok())
    {
        return Some(parsed);
    }
    let naive_text = text.strip_suffix(['Z', 'z']).unwrap_or(text);
    let naive = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive_text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(naive_text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(naive.and_utc().fixed_offset())
}
