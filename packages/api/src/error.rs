//! Error taxonomy for backend calls.

use thiserror::Error;

/// Failure below HTTP semantics: nothing usable came back.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The server could not be reached (DNS, refused connection, CORS, offline).
    #[error("cannot connect to server: {0}")]
    Unreachable(String),
    /// The request could not be built or its body not read.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() || e.is_body() || e.is_decode() {
            TransportError::Request(e.to_string())
        } else {
            TransportError::Unreachable(e.to_string())
        }
    }
}

/// A failed API call, classified the way the pages react to it.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("cannot connect to server")]
    Unreachable,
    /// 401: the session is missing or no longer valid.
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },
    /// 403: signed in, but not allowed.
    #[error("forbidden")]
    Forbidden { message: Option<String> },
    /// Any other non-2xx status, or a 2xx body carrying `"success": false`.
    #[error("rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("request failed: {0}")]
    Request(String),
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        match e {
            TransportError::Unreachable(_) => ApiError::Unreachable,
            TransportError::Request(msg) => ApiError::Request(msg),
        }
    }
}

impl ApiError {
    /// The `message` field of the backend's error body, when there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message }
            | ApiError::Forbidden { message }
            | ApiError::Rejected { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Server message verbatim, else the given fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, ApiError::Forbidden { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_or_prefers_server_text() {
        let err = ApiError::Rejected {
            status: 400,
            message: Some("Username taken".into()),
        };
        assert_eq!(err.message_or("Failed to update"), "Username taken");
    }

    #[test]
    fn message_or_falls_back_on_missing_or_empty() {
        let missing = ApiError::Rejected {
            status: 500,
            message: None,
        };
        let empty = ApiError::Forbidden {
            message: Some(String::new()),
        };
        assert_eq!(missing.message_or("Error deleting user"), "Error deleting user");
        assert_eq!(empty.message_or("Nope"), "Nope");
        assert_eq!(ApiError::Unreachable.message_or("Offline"), "Offline");
    }

    #[test]
    fn transport_errors_map_to_api_errors() {
        assert_eq!(
            ApiError::from(TransportError::Unreachable("refused".into())),
            ApiError::Unreachable
        );
        assert_eq!(
            ApiError::from(TransportError::Request("bad".into())),
            ApiError::Request("bad".into())
        );
    }
}
