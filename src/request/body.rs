//! Request body classification

use serde_json::Value as JsonValue;

/// Payload sent with a request
///
/// A body that is valid JSON is sent as JSON; anything else is sent verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    None,
    /// Decoded JSON, re-serialized by the transport
    Json(JsonValue),
    /// Raw text (usually `application/x-www-form-urlencoded`)
    Raw(String),
}

impl RequestBody {
    /// Classify a raw body string
    ///
    /// An empty string counts as no body.
    pub fn classify(body: Option<&str>) -> Self {
        match body {
            None => RequestBody::None,
            Some("") => RequestBody::None,
            Some(raw) => match serde_json::from_str::<JsonValue>(raw) {
                Ok(value) => RequestBody::Json(value),
                Err(_) => RequestBody::Raw(raw.to_string()),
            },
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, RequestBody::None)
    }

    /// Short label for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::None => "none",
            RequestBody::Json(_) => "json",
            RequestBody::Raw(_) => "raw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_body() {
        assert_eq!(RequestBody::classify(None), RequestBody::None);
        assert_eq!(RequestBody::classify(Some("")), RequestBody::None);
    }

    #[test]
    fn test_json_object() {
        assert_eq!(
            RequestBody::classify(Some(r#"{"a":1}"#)),
            RequestBody::Json(json!({"a": 1}))
        );
    }

    #[test]
    fn test_json_scalars_and_arrays() {
        assert_eq!(RequestBody::classify(Some("[1,2]")), RequestBody::Json(json!([1, 2])));
        assert_eq!(RequestBody::classify(Some("42")), RequestBody::Json(json!(42)));
    }

    #[test]
    fn test_form_body_is_raw() {
        assert_eq!(
            RequestBody::classify(Some("a=1&b=2")),
            RequestBody::Raw("a=1&b=2".to_string())
        );
    }

    #[test]
    fn test_malformed_json_is_raw() {
        let body = r#"{"a":1"#;
        assert_eq!(RequestBody::classify(Some(body)), RequestBody::Raw(body.to_string()));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(RequestBody::None.kind(), "none");
        assert_eq!(RequestBody::classify(Some("{}")).kind(), "json");
        assert_eq!(RequestBody::classify(Some("x")).kind(), "raw");
    }
}
