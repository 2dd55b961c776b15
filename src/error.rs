//! Error Types
//!
//! Transport errors from the backend API.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request never produced a response (offline, CORS, aborted)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Request body could not be built
    #[error("Failed to encode request: {0}")]
    Encode(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            format!("Request failed with status {}", status)
        } else {
            message
        };
        ApiError::Status { status, message }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_fallback() {
        let err = ApiError::status(502, "  ");
        assert_eq!(err.to_string(), "Request failed with status 502");
    }

    #[test]
    fn test_status_keeps_server_message() {
        let err = ApiError::status(400, "Unknown product A1");
        assert_eq!(err.to_string(), "Unknown product A1");
        assert!(!err.is_network());
    }
}
