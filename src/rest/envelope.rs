//! The uniform `{error, result}` response shape.

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ExchangeMessage};

/// Every REST response decodes into this envelope.
///
/// Exactly one side is meaningful: either `error` is non-empty, or `result`
/// carries the payload. Exchange-level errors are normal data, not faults;
/// callers branch on [`is_success`](Self::is_success) or inspect
/// [`errors`](Self::errors). [`into_result`](Self::into_result) is the
/// opt-in conversion for `?`-style call sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    /// Raw error strings as returned by the exchange
    #[serde(default)]
    pub error: Vec<String>,
    /// The decoded payload, absent when the call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// Whether the exchange reported no errors.
    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }

    /// The error list in parsed severity/category form.
    pub fn errors(&self) -> Vec<ExchangeMessage> {
        self.error.iter().map(|raw| ExchangeMessage::parse(raw)).collect()
    }

    /// Convert the envelope into a `Result`.
    ///
    /// The first error entry wins; an error-free envelope without a result
    /// payload is treated as a malformed response.
    pub fn into_result(self) -> Result<T, ClientError> {
        if let Some(raw) = self.error.first() {
            return Err(ClientError::Exchange(ExchangeMessage::parse(raw)));
        }
        self.result.ok_or_else(|| {
            ClientError::InvalidResponse("response missing 'result' field".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let envelope: ResponseEnvelope<serde_json::Value> = ResponseEnvelope {
            error: vec![],
            result: Some(json!({"a": 1})),
        };
        let encoded = serde_json::to_string(&envelope).unwrap();
        let decoded: ResponseEnvelope<serde_json::Value> = serde_json::from_str(&encoded).unwrap();
        assert!(decoded.is_success());
        assert_eq!(decoded.result.unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_error_entries_parse() {
        let decoded: ResponseEnvelope<serde_json::Value> =
            serde_json::from_value(json!({"error": ["EAPI:Rate limit exceeded"], "result": {}}))
                .unwrap();
        assert!(!decoded.is_success());
        let errors = decoded.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].category, "EAPI");
        assert_eq!(errors[0].severity, crate::error::Severity::Error);
    }

    #[test]
    fn test_into_result_success() {
        let envelope: ResponseEnvelope<i32> = ResponseEnvelope {
            error: vec![],
            result: Some(7),
        };
        assert_eq!(envelope.into_result().unwrap(), 7);
    }

    #[test]
    fn test_into_result_surfaces_first_error() {
        let envelope: ResponseEnvelope<i32> = ResponseEnvelope {
            error: vec!["EService:Busy".to_string(), "EAPI:Invalid nonce".to_string()],
            result: None,
        };
        match envelope.into_result().unwrap_err() {
            ClientError::Exchange(msg) => assert_eq!(msg.category, "EService"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_result_is_invalid_response() {
        let envelope: ResponseEnvelope<i32> = ResponseEnvelope {
            error: vec![],
            result: None,
        };
        assert!(matches!(
            envelope.into_result().unwrap_err(),
            ClientError::InvalidResponse(_)
        ));
    }
}
