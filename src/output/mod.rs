//! Response normalization and persistence

pub mod writer;

pub use writer::{format_payload, write_payload, DEFAULT_OUTPUT_FILE};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::client::HttpResponse;

/// What gets saved for a successful response
///
/// Serialized untagged: a JSON response as-is, anything else as
/// `{"content": ..., "status_code": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Structured(JsonValue),
    Fallback { content: String, status_code: u16 },
}

impl ResultPayload {
    /// Decode the body as JSON, or wrap the raw text with its status code
    pub fn from_response(response: HttpResponse) -> Self {
        match serde_json::from_str::<JsonValue>(&response.body) {
            Ok(value) => ResultPayload::Structured(value),
            Err(_) => ResultPayload::Fallback {
                content: response.body,
                status_code: response.status,
            },
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ResultPayload::Structured(_))
    }

    /// The payload as a JSON value, exactly as it is written to disk
    pub fn to_value(&self) -> JsonValue {
        match self {
            ResultPayload::Structured(value) => value.clone(),
            ResultPayload::Fallback { content, status_code } => serde_json::json!({
                "content": content,
                "status_code": status_code,
            }),
        }
    }
}
