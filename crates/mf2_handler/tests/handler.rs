use std::sync::Once;

use chrono::DateTime;
use mf2_handler::{HandlerSettings, MentionAuthor, MentionType, Mf2Handler, UrlValidation};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const SOURCE: &str = "https://jo.example/notes/2";
const TARGET: &str = "https://example.com/posts/hello";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(mention_logging::initialize_for_tests);
}

fn handler() -> Mf2Handler {
    Mf2Handler::new(HandlerSettings::default())
}

fn reply_document() -> Value {
    json!({
        "items": [{
            "type": ["h-entry"],
            "properties": {
                "url": [SOURCE],
                "name": ["Nice post"],
                "content": [{"value": "Nice post", "html": "<p>Nice <em>post</em></p>"}],
                "published": ["2013-06-22T17:00:00-07:00"],
                "in-reply-to": [TARGET],
                "category": ["rust", "mf2"],
                "author": [{
                    "type": ["h-card"],
                    "properties": {
                        "name": ["Jo"],
                        "url": ["https://jo.example/"],
                        "photo": [{"value": "https://jo.example/jo.jpg", "alt": "Jo"}],
                        "email": ["mailto:jo@jo.example"],
                    },
                    "value": "Jo",
                }],
            },
        }],
        "rels": {"syndication": ["https://social.example/@jo/2"]},
    })
}

#[test]
fn reply_is_mapped() {
    init_logging();
    let mention = handler().parse(&reply_document(), SOURCE, TARGET).unwrap();

    assert_eq!(mention.mention_type, MentionType::Reply);
    assert_eq!(mention.url, SOURCE);
    assert_eq!(mention.name, None);
    assert_eq!(mention.content_text.as_deref(), Some("Nice post"));
    assert_eq!(
        mention.content_html.as_deref(),
        Some("<p>Nice <em>post</em></p>")
    );
    assert_eq!(
        mention.published,
        Some(DateTime::parse_from_rfc3339("2013-06-22T17:00:00-07:00").unwrap())
    );
    assert_eq!(mention.updated, None);
    assert_eq!(
        mention.author,
        Some(MentionAuthor {
            name: Some("Jo".to_string()),
            url: Some("https://jo.example/".to_string()),
            photo: Some("https://jo.example/jo.jpg".to_string()),
            email: Some("jo@jo.example".to_string()),
        })
    );
    assert_eq!(mention.syndication, vec!["https://social.example/@jo/2"]);
    assert_eq!(mention.category, vec!["rust", "mf2"]);
    assert_eq!(mention.rsvp, None);
}

#[test]
fn mention_serializes_for_storage() {
    init_logging();
    let mention = handler().parse(&reply_document(), SOURCE, TARGET).unwrap();
    let value = mention.to_json().unwrap();

    assert_eq!(value["type"], json!("reply"));
    assert_eq!(value["published"], json!("2013-06-22T17:00:00-07:00"));
    assert_eq!(value["author"]["name"], json!("Jo"));
    assert_eq!(value["source"], json!(SOURCE));
    assert_eq!(value["target"], json!(TARGET));
    assert!(value.get("name").is_none());
    assert!(value.get("rsvp").is_none());
}

#[test]
fn like_of_citation_is_a_like() {
    init_logging();
    let doc = json!({"items": [{
        "type": ["h-entry"],
        "properties": {
            "like-of": [{
                "type": ["h-cite"],
                "properties": {"url": ["http://example.com/posts/hello"]},
                "value": "http://example.com/posts/hello",
            }],
            "author": ["https://jo.example/"],
        },
    }]});
    let mention = handler().parse(&doc, SOURCE, TARGET).unwrap();

    assert_eq!(mention.mention_type, MentionType::Like);
    assert_eq!(mention.url, SOURCE);
    assert_eq!(
        mention.author,
        Some(MentionAuthor {
            url: Some("https://jo.example/".to_string()),
            ..Default::default()
        })
    );
}

#[test]
fn rsvp_replying_to_target() {
    init_logging();
    let doc = json!({"items": [{
        "type": ["h-entry"],
        "properties": {
            "in-reply-to": [TARGET],
            "rsvp": ["yes"],
            "author": ["Jo"],
        },
    }]});
    let mention = handler().parse(&doc, SOURCE, TARGET).unwrap();

    assert_eq!(mention.mention_type, MentionType::Rsvp);
    assert_eq!(mention.rsvp.as_deref(), Some("yes"));
    assert_eq!(mention.author.and_then(|a| a.name).as_deref(), Some("Jo"));
}

#[test]
fn responses_to_other_pages_are_plain_mentions() {
    init_logging();
    let doc = json!({"items": [{
        "type": ["h-entry"],
        "properties": {
            "name": ["Roundup"],
            "content": [{"value": "Links of the week", "html": "Links of the week"}],
            "in-reply-to": ["https://elsewhere.example/post"],
        },
    }]});
    let mention = handler().parse(&doc, SOURCE, TARGET).unwrap();

    assert_eq!(mention.mention_type, MentionType::Mention);
    assert_eq!(mention.name.as_deref(), Some("Roundup"));
    assert_eq!(mention.author, None);
}

#[test]
fn author_falls_back_to_rel_author() {
    init_logging();
    let doc = json!({
        "items": [
            {"type": ["h-entry"], "properties": {"url": ["https://jo.example/notes/1"]}},
            {"type": ["h-entry"], "properties": {"url": [SOURCE], "like-of": [TARGET]}},
        ],
        "rels": {"author": ["https://jo.example/"]},
    });
    let mention = handler().parse(&doc, SOURCE, TARGET).unwrap();

    assert_eq!(mention.mention_type, MentionType::Like);
    assert_eq!(
        mention.author.and_then(|a| a.url).as_deref(),
        Some("https://jo.example/")
    );
}

#[test]
fn embedded_author_card_beats_earlier_name() {
    init_logging();
    let doc = json!({
        "items": [{
            "type": ["h-entry"],
            "properties": {
                "url": [SOURCE],
                "in-reply-to": [TARGET],
                "author": [
                    "Someone",
                    {
                        "type": ["h-card"],
                        "properties": {"name": ["Jo"], "url": ["https://jo.example/"]},
                    },
                ],
            },
        }],
    });
    let mention = handler().parse(&doc, SOURCE, TARGET).unwrap();

    assert_eq!(
        mention.author,
        Some(MentionAuthor {
            name: Some("Jo".to_string()),
            url: Some("https://jo.example/".to_string()),
            ..Default::default()
        })
    );
}

#[test]
fn author_page_equal_to_entry_url_is_ignored() {
    init_logging();
    let doc = json!({
        "items": [{
            "type": ["h-entry"],
            "properties": {
                "url": [SOURCE],
                "in-reply-to": [TARGET],
                "author": [SOURCE],
            },
        }],
    });
    let mention = handler().parse(&doc, SOURCE, TARGET).unwrap();

    assert_eq!(mention.author, None);
}

#[test]
fn documents_without_a_representative_entry_yield_nothing() {
    init_logging();
    let doc = json!({"items": [
        {"type": ["h-entry"], "properties": {"url": ["https://jo.example/notes/1"]}},
        {"type": ["h-entry"], "properties": {"url": ["https://jo.example/notes/3"]}},
    ]});
    assert_eq!(handler().parse(&doc, SOURCE, TARGET), None);
    assert_eq!(handler().parse(&json!({"items": []}), SOURCE, TARGET), None);
}

#[test]
fn parse_json_reports_malformed_documents() {
    init_logging();
    let handler = handler();
    assert!(handler.parse_json("{", SOURCE, TARGET).is_err());

    let mention = handler
        .parse_json(&reply_document().to_string(), SOURCE, TARGET)
        .unwrap();
    assert_eq!(mention.map(|m| m.mention_type), Some(MentionType::Reply));
}

#[test]
fn debug_settings_accept_local_sources() {
    init_logging();
    let source = "http://localhost:8080/notes/1";
    let doc = json!({"items": [
        {"type": ["h-entry"], "properties": {"url": ["http://localhost:8080/notes/0"]}},
        {"type": ["h-entry"], "properties": {"url": [source], "in-reply-to": [TARGET]}},
    ]});

    let strict = Mf2Handler::new(HandlerSettings {
        url_validation: UrlValidation::Http,
    });
    assert_eq!(strict.parse(&doc, source, TARGET), None);

    let debug = Mf2Handler::new(HandlerSettings {
        url_validation: UrlValidation::from_debug_flag(true),
    });
    let mention = debug.parse(&doc, source, TARGET).unwrap();
    assert_eq!(mention.url, source);
    assert_eq!(mention.mention_type, MentionType::Reply);
}
