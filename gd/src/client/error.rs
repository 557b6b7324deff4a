//! Analysis client error types

use thiserror::Error;

/// Shown for any failure where no response came back
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Shown when the backend reports a failure without a usable message
pub const GENERIC_SERVER_MESSAGE: &str = "An error occurred";

/// Shown when an unexpected failure carries no message of its own
pub const GENERIC_UNKNOWN_MESSAGE: &str = "Something went wrong. Please try again.";

/// Classified failures of a backend call
///
/// Every variant is recoverable by re-issuing the call; the `Display` text is
/// the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A response arrived with a failure status
    #[error("{message}")]
    Server { status: u16, message: String },

    /// The request went out but nothing came back (connection failure, timeout)
    #[error("Network error. Please check your connection.")]
    Network { detail: String },

    /// Anything else: request construction, malformed or unparseable responses
    #[error("{0}")]
    Unknown(String),
}

/// Failure class, for logging and display styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Server,
    Network,
    Unknown,
}

impl AnalysisError {
    pub fn network(detail: impl Into<String>) -> Self {
        AnalysisError::Network { detail: detail.into() }
    }

    /// Unknown failure, falling back to a generic message when `message` is blank
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            AnalysisError::Unknown(GENERIC_UNKNOWN_MESSAGE.to_string())
        } else {
            AnalysisError::Unknown(message)
        }
    }

    /// Server failure from a status code and the raw response body
    ///
    /// The message comes from the body's `detail` field, then `message`, then
    /// a generic fallback.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                ["detail", "message"]
                    .iter()
                    .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
            })
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());
        AnalysisError::Server { status, message }
    }

    /// Classify a transport-level failure from reqwest
    pub fn from_transport(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            AnalysisError::unknown(err.to_string())
        } else if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            AnalysisError::network(err.to_string())
        } else {
            AnalysisError::unknown(err.to_string())
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Server { .. } => ErrorKind::Server,
            AnalysisError::Network { .. } => ErrorKind::Network,
            AnalysisError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// User-facing message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether re-issuing the same call may succeed; true for every class
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AnalysisError::Server { .. } | AnalysisError::Network { .. } | AnalysisError::Unknown(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_prefers_detail() {
        let err = AnalysisError::from_response(400, r#"{"detail": "Unknown destination", "message": "other"}"#);
        assert_eq!(
            err,
            AnalysisError::Server {
                status: 400,
                message: "Unknown destination".to_string()
            }
        );
        assert_eq!(err.message(), "Unknown destination");
    }

    #[test]
    fn test_server_message_falls_back_to_message_then_generic() {
        let err = AnalysisError::from_response(500, r#"{"message": "Upstream weather API down"}"#);
        assert_eq!(err.message(), "Upstream weather API down");

        // FastAPI validation errors carry a list in `detail`
        let err = AnalysisError::from_response(422, r#"{"detail": [{"loc": ["body"], "msg": "bad"}]}"#);
        assert_eq!(err.message(), GENERIC_SERVER_MESSAGE);

        let err = AnalysisError::from_response(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message(), GENERIC_SERVER_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_network_message_is_fixed() {
        let err = AnalysisError::network("operation timed out");
        assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
        assert_eq!(err.kind(), ErrorKind::Network);
    }

    #[test]
    fn test_unknown_passes_message_through() {
        assert_eq!(AnalysisError::unknown("invalid URL").message(), "invalid URL");
        assert_eq!(AnalysisError::unknown("  ").message(), GENERIC_UNKNOWN_MESSAGE);
    }

    #[test]
    fn test_every_class_is_retryable() {
        assert!(AnalysisError::network("refused").is_retryable());
        assert!(AnalysisError::from_response(500, "").is_retryable());
        assert!(AnalysisError::unknown("bad body").is_retryable());
    }
}
