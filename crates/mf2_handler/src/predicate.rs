//! Shape checks over untyped MF2 JSON.
//!
//! Every function here is total: any `Value`, including `null`, gets a
//! plain `true`/`false` answer.

use std::net::Ipv4Addr;

use serde_json::Value;
use url::{Host, Url};

use crate::settings::UrlValidation;

const ALLOWED_HTTP_PORTS: &[u16] = &[80, 443, 8080];

/// Schemes a syntax-valid URL may use without an authority.
const HOSTLESS_SCHEMES: &[&str] = &["mailto", "news", "file"];

/// Schemes whose URLs must spell out `://` after the scheme.
const AUTHORITY_SCHEMES: &[&str] = &["http", "https", "ftp", "ws", "wss", "file"];

/// True if `value` is a string accepted by [`is_url_str`].
pub fn is_url(value: &Value, validation: UrlValidation) -> bool {
    value
        .as_str()
        .is_some_and(|candidate| is_url_str(candidate, validation))
}

/// Checks `candidate` as a URL under `validation`.
///
/// Scheme-relative spellings such as `http:example.com` are rejected in both
/// modes even though the URL parser would repair them.
pub fn is_url_str(candidate: &str, validation: UrlValidation) -> bool {
    if candidate.is_empty()
        || !candidate.is_ascii()
        || candidate
            .chars()
            .any(|c| c.is_ascii_whitespace() || c.is_ascii_control())
    {
        return false;
    }
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };
    if AUTHORITY_SCHEMES.contains(&url.scheme())
        && !candidate[url.scheme().len()..].starts_with("://")
    {
        return false;
    }
    match validation {
        UrlValidation::Syntax => {
            url.host().is_some() || HOSTLESS_SCHEMES.contains(&url.scheme())
        }
        UrlValidation::Http => is_public_http_url(&url),
    }
}

fn is_public_http_url(url: &Url) -> bool {
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    if !url.username().is_empty() || url.password().is_some() {
        return false;
    }
    let host_ok = match url.host() {
        Some(Host::Domain(domain)) => {
            !domain.is_empty() && !domain.eq_ignore_ascii_case("localhost")
        }
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => !(ip.is_loopback() || ip.is_unspecified()),
        None => false,
    };
    host_ok && url.port().is_none_or(|port| ALLOWED_HTTP_PORTS.contains(&port))
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_loopback() || ip.is_private() || ip.is_link_local() || ip.is_unspecified())
}

/// True if `mf` has a non-empty `type` list containing `ty`.
pub fn is_type(mf: &Value, ty: &str) -> bool {
    mf.get("type")
        .and_then(Value::as_array)
        .is_some_and(|types| types.iter().any(|t| t.as_str() == Some(ty)))
}

/// A microformat is a mapping with a non-empty `type` and a `properties` key.
///
/// Sequences never qualify, whatever they contain.
pub fn is_microformat(mf: &Value) -> bool {
    let Value::Object(map) = mf else {
        return false;
    };
    !is_empty_value(map.get("type")) && map.contains_key("properties")
}

/// True if `mf` is parser output with an `items` sequence.
pub fn is_microformat_collection(mf: &Value) -> bool {
    mf.get("items").is_some_and(Value::is_array)
}

/// True if `mf.properties[name]` is a non-empty sequence.
pub fn has_property(mf: &Value, name: &str) -> bool {
    non_empty_list(mf.get("properties"), name).is_some()
}

/// True if `mf.rels[name]` is a non-empty sequence of links.
pub fn has_rel(mf: &Value, name: &str) -> bool {
    non_empty_list(mf.get("rels"), name).is_some()
}

/// A `{value, html}` pair as produced for `e-*` properties.
pub fn is_embedded_html(p: &Value) -> bool {
    let Value::Object(map) = p else {
        return false;
    };
    map.contains_key("value") && map.contains_key("html")
}

pub(crate) fn non_empty_list<'a>(container: Option<&'a Value>, name: &str) -> Option<&'a [Value]> {
    container
        .and_then(Value::as_object)
        .and_then(|map| map.get(name))
        .and_then(Value::as_array)
        .filter(|values| !values.is_empty())
        .map(Vec::as_slice)
}

fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty() || s == "0",
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(map)) => map.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_type_values_do_not_count() {
        assert!(is_empty_value(None));
        assert!(is_empty_value(Some(&json!([]))));
        assert!(is_empty_value(Some(&json!(""))));
        assert!(is_empty_value(Some(&json!("0"))));
        assert!(!is_empty_value(Some(&json!(["h-entry"]))));
    }

    #[test]
    fn private_addresses_are_not_public() {
        assert!(!is_public_ipv4(Ipv4Addr::new(127, 0, 0, 1)));
        assert!(!is_public_ipv4(Ipv4Addr::new(10, 1, 2, 3)));
        assert!(!is_public_ipv4(Ipv4Addr::new(192, 168, 0, 1)));
        assert!(is_public_ipv4(Ipv4Addr::new(93, 184, 216, 34)));
    }
}
