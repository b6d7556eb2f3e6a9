//! Error types for the Kraken REST client.

use thiserror::Error;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// The server answered with a non-success status code
    #[error("HTTP status {code}: {body}")]
    Status {
        /// Status code returned by the server
        code: reqwest::StatusCode,
        /// Raw response body, for diagnostics
        body: String,
    },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Response body could not be decoded into the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request parameters could not be form-encoded
    #[error("Could not encode request parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// Base URL rejected at construction time
    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    /// Credentials missing or unusable for the attempted operation.
    ///
    /// Raised before any network I/O takes place.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller omitted parameters the endpoint requires.
    ///
    /// Lists every missing key, not just the first. Raised before any
    /// network I/O takes place.
    #[error("{endpoint} is missing required arguments: {}", keys.join(", "))]
    MissingArguments {
        /// Endpoint method name, e.g. `AddOrder`
        endpoint: &'static str,
        /// Wire names of all omitted required parameters
        keys: Vec<&'static str>,
    },

    /// An exchange-level error converted from a response envelope.
    ///
    /// Only produced by [`ResponseEnvelope::into_result`]; the envelope
    /// itself keeps the error list as inspectable data.
    ///
    /// [`ResponseEnvelope::into_result`]: crate::rest::ResponseEnvelope::into_result
    #[error("Kraken API error: {0}")]
    Exchange(ExchangeMessage),
}

/// Severity of an exchange error entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// `E` prefix
    Error,
    /// `W` prefix
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// One entry of Kraken's `error` array, in parsed form.
///
/// The wire format is `<severity><category>:<type>[:<extra>]`, where the
/// severity character is `E` (error) or `W` (warning). For example
/// `"EAPI:Rate limit exceeded"` or `"WDatabase:Lockout:60s"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeMessage {
    /// Severity derived from the first character of the category token
    pub severity: Severity,
    /// The full leading token including the severity character, e.g. `EAPI`
    pub category: String,
    /// Error type, e.g. `Rate limit exceeded`
    pub reason: String,
    /// Optional trailing segment with extra info
    pub extra: Option<String>,
}

impl ExchangeMessage {
    /// Parse a raw error string from the response envelope.
    ///
    /// Entries that do not follow the documented shape are kept whole in
    /// `category` with an empty `reason`, so nothing is silently dropped.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(3, ':');
        let category = parts.next().unwrap_or_default().to_string();
        let reason = parts.next().unwrap_or_default().to_string();
        let extra = parts.next().map(str::to_string);
        let severity = match category.chars().next() {
            Some('W') => Severity::Warning,
            _ => Severity::Error,
        };
        Self {
            severity,
            category,
            reason,
            extra,
        }
    }

    /// Check whether this entry is a rate limit rejection.
    pub fn is_rate_limited(&self) -> bool {
        (self.category == "EAPI" || self.category == "EOrder")
            && self.reason.contains("Rate limit")
    }

    /// Check whether this entry is an invalid nonce rejection.
    pub fn is_invalid_nonce(&self) -> bool {
        self.category == "EAPI" && self.reason.contains("Invalid nonce")
    }
}

impl std::fmt::Display for ExchangeMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.category, self.reason)?;
        if let Some(extra) = &self.extra {
            write!(f, ":{extra}")?;
        }
        Ok(())
    }
}

/// Known error strings for pattern matching.
pub mod error_codes {
    /// General errors
    pub const INVALID_ARGUMENTS: &str = "EGeneral:Invalid arguments";
    pub const PERMISSION_DENIED: &str = "EGeneral:Permission denied";
    pub const UNKNOWN_METHOD: &str = "EGeneral:Unknown method";

    /// API errors
    pub const INVALID_KEY: &str = "EAPI:Invalid key";
    pub const INVALID_SIGNATURE: &str = "EAPI:Invalid signature";
    pub const INVALID_NONCE: &str = "EAPI:Invalid nonce";
    pub const RATE_LIMIT_EXCEEDED: &str = "EAPI:Rate limit exceeded";

    /// Order errors
    pub const INSUFFICIENT_FUNDS: &str = "EOrder:Insufficient funds";
    pub const ORDER_NOT_FOUND: &str = "EOrder:Unknown order";

    /// Service errors
    pub const SERVICE_UNAVAILABLE: &str = "EService:Unavailable";
    pub const SERVICE_BUSY: &str = "EService:Busy";

    /// Query errors
    pub const UNKNOWN_ASSET_PAIR: &str = "EQuery:Unknown asset pair";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_entry() {
        let msg = ExchangeMessage::parse("EAPI:Rate limit exceeded");
        assert_eq!(msg.severity, Severity::Error);
        assert_eq!(msg.category, "EAPI");
        assert_eq!(msg.reason, "Rate limit exceeded");
        assert_eq!(msg.extra, None);
        assert!(msg.is_rate_limited());
    }

    #[test]
    fn test_parse_warning_with_extra() {
        let msg = ExchangeMessage::parse("WDatabase:Lockout:60s");
        assert_eq!(msg.severity, Severity::Warning);
        assert_eq!(msg.category, "WDatabase");
        assert_eq!(msg.reason, "Lockout");
        assert_eq!(msg.extra.as_deref(), Some("60s"));
    }

    #[test]
    fn test_parse_malformed_entry_kept_whole() {
        let msg = ExchangeMessage::parse("nonsense");
        assert_eq!(msg.category, "nonsense");
        assert_eq!(msg.reason, "");
        assert_eq!(msg.severity, Severity::Error);
    }

    #[test]
    fn test_display_round_trips_raw_form() {
        for raw in ["EAPI:Invalid nonce", "WDatabase:Lockout:60s"] {
            assert_eq!(ExchangeMessage::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_missing_arguments_lists_every_key() {
        let err = ClientError::MissingArguments {
            endpoint: "AddOrder",
            keys: vec!["volume", "ordertype"],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("AddOrder"));
        assert!(rendered.contains("volume"));
        assert!(rendered.contains("ordertype"));
    }
}
