use serde_json::Value;
use thiserror::Error;

use crate::predicate::is_microformat_collection;

/// Why parser output could not be used as an MF2 document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed mf2 json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mf2 json has no items list")]
    NotACollection,
}

/// Decodes parser output and checks it has an `items` list.
pub fn parse_document(json: &str) -> Result<Value, DocumentError> {
    check_collection(serde_json::from_str(json)?)
}

/// Same as [`parse_document`] for raw response bytes.
pub fn parse_document_slice(bytes: &[u8]) -> Result<Value, DocumentError> {
    check_collection(serde_json::from_slice(bytes)?)
}

fn check_collection(doc: Value) -> Result<Value, DocumentError> {
    if is_microformat_collection(&doc) {
        Ok(doc)
    } else {
        Err(DocumentError::NotACollection)
    }
}
