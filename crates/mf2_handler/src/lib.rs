//! MF2 handler: interprets parsed microformats2 JSON for received webmentions.
//!
//! The layers build on each other: shape predicates, scalar and property
//! extraction, representative-item selection, then authorship discovery.
//! [`Mf2Handler`] ties them together into a [`MentionItem`].
mod authorship;
mod document;
mod handler;
mod items;
mod mention;
mod predicate;
mod property;
mod scalar;
mod settings;
mod urls;
mod value;

pub use authorship::get_representative_author;
pub use document::{parse_document, parse_document_slice, DocumentError};
pub use handler::Mf2Handler;
pub use items::{find_representative_item, get_items, get_representative_item};
pub use mention::{MentionAuthor, MentionItem, MentionType};
pub use predicate::{
    has_property, has_rel, is_embedded_html, is_microformat, is_microformat_collection, is_type,
    is_url, is_url_str,
};
pub use property::{
    get_datetime_property, get_html, get_plaintext, get_plaintext_array, get_property_array,
    parse_datetime, property_values,
};
pub use scalar::{escape_html, to_html, to_plaintext};
pub use settings::{HandlerSettings, SettingsError, UrlValidation};
pub use urls::{compare_urls, urls_match};
pub use value::PropertyValue;
