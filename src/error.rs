use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad category of a translation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidInput,
    NetworkError,
    RemoteError,
    ParseError,
}

/// Errors surfaced by the translation client.
///
/// `Display` yields the message shown to the user, so callers can forward
/// `err.to_string()` into an error banner or a `{success: false}` envelope.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslatorError {
    /// Empty or over-length text, caught before any network call
    #[error("{0}")]
    InvalidInput(String),

    /// No response reached the client (DNS, refused connection, timeout)
    #[error("Connection error: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// A success response whose body could not be decoded
    #[error("Invalid response from translation service: {0}")]
    Parse(String),
}

impl TranslatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Network(_) => ErrorKind::NetworkError,
            Self::Remote { .. } => ErrorKind::RemoteError,
            Self::Parse(_) => ErrorKind::ParseError,
        }
    }
}

/// The `{success, data | error}` shape returned by the proxy and consumed by
/// the proxied transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl<T> From<TranslatorError> for ApiResponse<T> {
    fn from(err: TranslatorError) -> Self {
        Self::err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_user_facing() {
        let err = TranslatorError::Remote {
            status: 500,
            message: "model unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "model unavailable");
        assert_eq!(err.kind(), ErrorKind::RemoteError);

        let err = TranslatorError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Connection error: connection refused");
    }

    #[test]
    fn test_error_envelope_omits_data() {
        let envelope: ApiResponse<()> = TranslatorError::InvalidInput("Text is required".into()).into();
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "Text is required"}));
    }

    #[test]
    fn test_envelope_decodes_without_optional_fields() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Payload {
            value: u32,
        }

        let ok: ApiResponse<Payload> = serde_json::from_str(r#"{"success": true, "data": {"value": 7}}"#).unwrap();
        assert_eq!(ok.data, Some(Payload { value: 7 }));
        assert_eq!(ok.error, None);

        let failed: ApiResponse<Payload> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.data, None);
        assert_eq!(failed.error, None);
    }
}
