use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use serde_json::Value;

use crate::predicate::{is_microformat, is_url_str};
use crate::property::get_plaintext;
use crate::scalar::to_plaintext;
use crate::settings::UrlValidation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionType {
    Mention,
    Reply,
    Like,
    Repost,
    Bookmark,
    Rsvp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MentionAuthor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl MentionAuthor {
    /// Builds an author from one `author` property value.
    ///
    /// A bare string is a URL or a name depending on whether it validates;
    /// an h-card contributes its `name`, `url`, `photo` and `email`.
    pub fn from_value(author: &Value, validation: UrlValidation) -> Option<Self> {
        let author = match author {
            Value::String(text) if is_url_str(text, validation) => MentionAuthor {
                url: Some(text.clone()),
                ..Default::default()
            },
            Value::String(text) => MentionAuthor {
                name: non_blank(text),
                ..Default::default()
            },
            card if is_microformat(card) || card.get("properties").is_some() => MentionAuthor {
                name: plain_string(card, "name"),
                url: plain_string(card, "url"),
                photo: plain_string(card, "photo"),
                email: plain_string(card, "email")
                    .map(|email| email.trim_start_matches("mailto:").to_string()),
            },
            _ => return None,
        };
        (!author.is_empty()).then_some(author)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.photo.is_none() && self.email.is_none()
    }
}

/// A received mention, mapped from the representative entry of its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MentionItem {
    pub source: String,
    pub target: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mention_type: MentionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<MentionAuthor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub syndication: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsvp: Option<String>,
}

impl MentionItem {
    /// JSON form handed to whatever stores the mention.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Trimmed plaintext of the first value of `name`, if it is a non-blank string.
///
/// `{value, alt}` photo objects count as their `value`.
pub(crate) fn plain_string(mf: &Value, name: &str) -> Option<String> {
    let value = get_plaintext(mf, name, None)?;
    let text = value
        .as_str()
        .or_else(|| value.get("value").and_then(Value::as_str))?;
    non_blank(text)
}

pub(crate) fn value_text(value: &Value) -> Option<&str> {
    if is_microformat(value) {
        if let Some(url) = get_plaintext(value, "url", None).and_then(Value::as_str) {
            return Some(url);
        }
    }
    to_plaintext(value).as_str()
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
