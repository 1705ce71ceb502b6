use serde::Deserialize;
use serde_json::Value;

use super::TransportError;
use crate::domain::{ErrorCode, ServiceError};

#[derive(Debug, Clone, Deserialize)]
struct JsonEnvelope {
    success: bool,
    #[serde(default)]
    response: Value,
    #[serde(default)]
    code: Option<TransportCode>,
    #[serde(default)]
    additional: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCode {
    Int(i32),
    String(String),
}

impl TransportCode {
    fn into_error_code(self) -> Result<ErrorCode, TransportError> {
        match self {
            Self::Int(value) => Ok(ErrorCode::new(value)),
            Self::String(value) => value
                .trim()
                .parse::<i32>()
                .map(ErrorCode::new)
                .map_err(|_| TransportError::InvalidErrorCode { raw: value }),
        }
    }
}

fn additional_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Decode the uniform `{success, response | code + additional}` envelope.
///
/// The outer `Result` fails on malformed bodies; the inner one carries the remote verdict.
/// A successful envelope without `response` yields `null`.
pub fn decode_envelope(json: &str) -> Result<Result<Value, ServiceError>, TransportError> {
    let parsed: JsonEnvelope = serde_json::from_str(json)?;
    if parsed.success {
        return Ok(Ok(parsed.response));
    }

    let code = parsed
        .code
        .ok_or(TransportError::MissingErrorCode)?
        .into_error_code()?;
    let additional = parsed.additional.and_then(additional_text);
    Ok(Err(ServiceError::new(code, additional)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_returns_response_verbatim() {
        let payloads = [
            json!({"status": 1}),
            json!([1, "two", {"three": [3.5, null]}]),
            json!("plain"),
            json!(17),
            json!(null),
        ];
        for payload in payloads {
            let body = json!({"success": true, "response": payload.clone()}).to_string();
            let decoded = decode_envelope(&body).unwrap().unwrap();
            assert_eq!(decoded, payload);
        }
    }

    #[test]
    fn success_without_response_is_null() {
        let decoded = decode_envelope(r#"{"success": true}"#).unwrap().unwrap();
        assert_eq!(decoded, Value::Null);
    }

    #[test]
    fn failure_maps_code_message_and_additional() {
        let json = r#"{"success": false, "code": 12, "additional": "expired"}"#;
        let err = decode_envelope(json).unwrap().unwrap_err();
        assert_eq!(err.code(), ErrorCode::new(12));
        assert_eq!(err.message(), "invalid or expired token");
        assert_eq!(err.additional(), Some("expired"));
    }

    #[test]
    fn failure_with_unknown_code_uses_placeholder() {
        let json = r#"{"success": false, "code": 99, "additional": null}"#;
        let err = decode_envelope(json).unwrap().unwrap_err();
        assert_eq!(err.code().as_i32(), 99);
        assert_eq!(err.message(), ErrorCode::UNKNOWN_MESSAGE);
        assert_eq!(err.additional(), None);
    }

    #[test]
    fn failure_accepts_string_codes_and_structured_additional() {
        let json = r#"{"success": false, "code": " 7 ", "additional": {"order_id": 5}}"#;
        let err = decode_envelope(json).unwrap().unwrap_err();
        assert_eq!(err.code().as_i32(), 7);
        assert_eq!(err.additional(), Some(r#"{"order_id":5}"#));
    }

    #[test]
    fn failure_without_code_is_a_transport_error() {
        let err = decode_envelope(r#"{"success": false}"#).unwrap_err();
        assert!(matches!(err, TransportError::MissingErrorCode));

        let err = decode_envelope(r#"{"success": false, "code": "twelve"}"#).unwrap_err();
        match err {
            TransportError::InvalidErrorCode { raw } => assert_eq!(raw, "twelve"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_bodies_are_rejected() {
        assert!(matches!(
            decode_envelope("<html>Bad Gateway</html>"),
            Err(TransportError::Json(_))
        ));
        assert!(matches!(
            decode_envelope(r#"{"response": {}}"#),
            Err(TransportError::Json(_))
        ));
    }
}
