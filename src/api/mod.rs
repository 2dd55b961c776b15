//! Backend API Wrappers
//!
//! Thin request/response bindings to the warehouse backend, organized by domain.
//! No caching; every call is a fresh request.

mod catalog;
mod workflow;
mod project;
mod report;

use gloo_net::http::Response;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::ApiError;

// Re-export all public items
pub use catalog::*;
pub use workflow::*;
pub use project::*;
pub use report::*;

fn endpoint(path: &str) -> String {
    ApiConfig::default().url(path)
}

/// Pass 2xx responses through; turn anything else into `ApiError::Status`
async fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    Err(ApiError::status(status, error_message(&text)))
}

/// Pull a readable message out of an error body (`{error}`, `{message}` or plain text)
fn error_message(body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(msg)) = map.get(key) {
                return msg.clone();
            }
        }
    }
    body.trim().chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_json() {
        assert_eq!(error_message(r#"{"error": "Project not found"}"#), "Project not found");
        assert_eq!(error_message(r#"{"success": false, "message": "Duplicate"}"#), "Duplicate");
    }

    #[test]
    fn test_error_message_plain_text() {
        assert_eq!(error_message("Unknown product A1\n"), "Unknown product A1");
        assert_eq!(error_message(""), "");
    }
}
