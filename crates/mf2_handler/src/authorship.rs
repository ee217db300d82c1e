//! Authorship discovery for a representative entry.
//!
//! Follows <https://indieweb.org/authorship>. Candidate sources are ranked:
//! an embedded h-card, then an author-page URL from the `author` property,
//! then a literal author name, then the document's `rel=author` link.

use mention_logging::{mention_debug, mention_trace};
use serde_json::{json, Value};

use crate::predicate::{is_type, is_url_str, non_empty_list};
use crate::property::property_values;
use crate::scalar::to_plaintext;
use crate::settings::UrlValidation;
use crate::urls::urls_match;

/// Resolves the author of `item`, using `doc` for `rel=author`.
///
/// Returns an h-card value, or `None` when nothing identifies an author.
pub fn get_representative_author(
    item: &Value,
    doc: &Value,
    validation: UrlValidation,
) -> Option<Value> {
    let mut author_page: Option<&str> = None;
    let mut author_name: Option<&str> = None;

    for author in property_values(item, "author").unwrap_or_default() {
        if is_type(author, "h-card") {
            mention_trace!("Using embedded author h-card");
            return Some(author.clone());
        }
        match author {
            Value::String(text) if is_url_str(text, validation) => {
                author_page.get_or_insert(text);
            }
            Value::String(text) => {
                author_name.get_or_insert(text);
            }
            nested => {
                if let Some(name) = to_plaintext(nested).as_str() {
                    author_name.get_or_insert(name);
                }
            }
        }
    }

    let own_urls = property_values(item, "url").unwrap_or_default();
    let is_own_url = |page: &str| urls_match(page, own_urls, true, validation);

    if let Some(page) = author_page {
        if !is_own_url(page) {
            mention_trace!("Using author page {} from author property", page);
            return Some(author_page_card(page));
        }
        mention_debug!("Author page {} is the entry itself", page);
    }

    if let Some(name) = author_name {
        mention_trace!("Using literal author name");
        return Some(json!({
            "type": ["h-card"],
            "properties": { "name": [name] },
        }));
    }

    if author_page.is_none() {
        let rel_author = non_empty_list(doc.get("rels"), "author")
            .and_then(|urls| urls[0].as_str())
            .filter(|page| !is_own_url(*page));
        if let Some(page) = rel_author {
            mention_trace!("Using rel=author {}", page);
            return Some(author_page_card(page));
        }
    }

    mention_debug!("No author found");
    None
}

fn author_page_card(page: &str) -> Value {
    json!({
        "type": ["h-card"],
        "properties": { "url": [page] },
    })
}
