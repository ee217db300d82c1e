use mention_logging::{mention_debug, mention_info};
use serde_json::Value;

use crate::authorship::get_representative_author;
use crate::document::{parse_document, DocumentError};
use crate::items::get_representative_item;
use crate::mention::{plain_string, value_text, MentionAuthor, MentionItem, MentionType};
use crate::predicate::has_property;
use crate::property::{get_datetime_property, get_html, get_plaintext_array, property_values};
use crate::settings::HandlerSettings;
use crate::urls::urls_match;

/// Response properties and the mention type each one implies, in precedence order.
const RESPONSE_PROPERTIES: &[(&str, MentionType)] = &[
    ("in-reply-to", MentionType::Reply),
    ("like-of", MentionType::Like),
    ("repost-of", MentionType::Repost),
    ("bookmark-of", MentionType::Bookmark),
];

/// Turns a parsed MF2 document into a [`MentionItem`].
#[derive(Debug, Clone, Default)]
pub struct Mf2Handler {
    settings: HandlerSettings,
}

impl Mf2Handler {
    pub fn new(settings: HandlerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Maps the entry representing `source` into a mention of `target`.
    ///
    /// Returns `None` when the document has no representative entry.
    pub fn parse(&self, doc: &Value, source: &str, target: &str) -> Option<MentionItem> {
        let validation = self.settings.url_validation;
        let item = get_representative_item(doc, source, validation);
        if item.is_empty() {
            mention_debug!("No representative entry in {}", source);
            return None;
        }
        let item = Value::Object(item);

        let content_text = plain_string(&item, "content");
        // An implied name is the whole text content; only keep an explicit one.
        let name = plain_string(&item, "name").filter(|name| {
            content_text.as_deref().map(collapse_whitespace) != Some(collapse_whitespace(name))
        });
        let mention_type = self.mention_type(&item, target);
        let rsvp = (mention_type == MentionType::Rsvp)
            .then(|| plain_string(&item, "rsvp"))
            .flatten();

        let mention = MentionItem {
            source: source.to_string(),
            target: target.to_string(),
            url: plain_string(&item, "url").unwrap_or_else(|| source.to_string()),
            mention_type,
            name,
            summary: plain_string(&item, "summary"),
            content_html: get_html(&item, "content", None).map(|html| html.into_owned()),
            content_text,
            published: get_datetime_property("published", &item, None),
            updated: get_datetime_property("updated", &item, None),
            author: get_representative_author(&item, doc, validation)
                .and_then(|card| MentionAuthor::from_value(&card, validation)),
            syndication: string_list(&item, "syndication"),
            category: string_list(&item, "category"),
            rsvp,
        };
        mention_info!("Parsed {:?} from {} for {}", mention.mention_type, source, target);
        Some(mention)
    }

    /// Like [`Mf2Handler::parse`], starting from the parser's JSON text.
    pub fn parse_json(
        &self,
        json: &str,
        source: &str,
        target: &str,
    ) -> Result<Option<MentionItem>, DocumentError> {
        let doc = parse_document(json)?;
        Ok(self.parse(&doc, source, target))
    }

    fn mention_type(&self, item: &Value, target: &str) -> MentionType {
        let responds_to_target = |property: &str| {
            property_values(item, property).is_some_and(|values| {
                let urls: Vec<Value> = values
                    .iter()
                    .filter_map(value_text)
                    .map(|url| Value::String(url.to_string()))
                    .collect();
                urls_match(target, &urls, true, self.settings.url_validation)
            })
        };

        if has_property(item, "rsvp") && responds_to_target("in-reply-to") {
            return MentionType::Rsvp;
        }
        RESPONSE_PROPERTIES
            .iter()
            .find(|&&(property, _)| responds_to_target(property))
            .map_or(MentionType::Mention, |&(_, mention_type)| mention_type)
    }
}

fn string_list(item: &Value, name: &str) -> Vec<String> {
    get_plaintext_array(item, name, None)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
