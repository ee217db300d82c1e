use serde_json::Value;

use crate::predicate::is_url_str;
use crate::settings::UrlValidation;

/// Compares `needle` against a list of URLs.
///
/// With `schemeless`, both the `http://` and `https://` spellings of the
/// needle are tried. Returns the spellings found in `haystack`; an empty
/// result means no match.
pub fn compare_urls(
    needle: &str,
    haystack: &[Value],
    schemeless: bool,
    validation: UrlValidation,
) -> Vec<String> {
    if !is_url_str(needle, validation) {
        return Vec::new();
    }
    // A list of nested structures is not a list of URLs.
    if haystack
        .first()
        .is_some_and(|first| first.is_array() || first.is_object())
    {
        return Vec::new();
    }

    let candidates = if schemeless {
        let bare = strip_http_scheme(needle);
        vec![format!("http://{bare}"), format!("https://{bare}")]
    } else {
        vec![needle.to_string()]
    };

    candidates
        .into_iter()
        .filter(|candidate| {
            haystack
                .iter()
                .any(|url| url.as_str() == Some(candidate.as_str()))
        })
        .collect()
}

/// Convenience wrapper for callers that only need a yes/no answer.
pub fn urls_match(
    needle: &str,
    haystack: &[Value],
    schemeless: bool,
    validation: UrlValidation,
) -> bool {
    !compare_urls(needle, haystack, schemeless, validation).is_empty()
}

fn strip_http_scheme(url: &str) -> &str {
    for scheme in ["https://", "http://"] {
        if url.len() >= scheme.len() && url[..scheme.len()].eq_ignore_ascii_case(scheme) {
            return &url[scheme.len()..];
        }
    }
    url
}
