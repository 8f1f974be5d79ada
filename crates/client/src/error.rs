//! Error types for remote store and auth service calls.
//!
//! Every variant is sourced from the remote service; the client generates no
//! errors of its own beyond response parsing. Mutation errors propagate to
//! the caller unchanged; list-fetch errors are logged and suppressed at the
//! resource layer (stale data is kept).

use thiserror::Error;

/// Errors that can occur when talking to the remote store or auth service.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// PostgREST error code, when the body carried one (e.g. `PGRST116`).
        code: Option<String>,
        /// Human-readable message from the error body.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Row or procedure not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Auth service rejected the request (bad credentials, expired token).
    #[error("Auth error: {0}")]
    Auth(String),
}

impl StoreError {
    /// Build an [`StoreError::Api`] from a PostgREST error body, falling back
    /// to the raw text when the body is not the expected JSON shape.
    #[must_use]
    pub fn from_error_body(status: u16, body: &str) -> Self {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            code: Option<String>,
            details: Option<String>,
            hint: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => {
                let mut message = parsed.message.unwrap_or_else(|| "(no message)".to_string());
                if let Some(details) = parsed.details {
                    message.push_str(": ");
                    message.push_str(&details);
                }
                if let Some(hint) = parsed.hint {
                    message.push_str(" (hint: ");
                    message.push_str(&hint);
                    message.push(')');
                }
                Self::Api {
                    status,
                    code: parsed.code,
                    message,
                }
            }
            Err(_) => Self::Api {
                status,
                code: None,
                message: body.chars().take(200).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::NotFound("jobs row j1".to_string());
        assert_eq!(err.to_string(), "Not found: jobs row j1");
    }

    #[test]
    fn test_rate_limited_display() {
        let err = StoreError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");
    }

    #[test]
    fn test_api_error_from_postgrest_body() {
        let body = r#"{"message":"duplicate key value","code":"23505","details":"Key (id)=(j1) already exists.","hint":null}"#;
        let err = StoreError::from_error_body(409, body);
        match err {
            StoreError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 409);
                assert_eq!(code.as_deref(), Some("23505"));
                assert!(message.contains("duplicate key value"));
                assert!(message.contains("already exists"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_error_from_non_json_body() {
        let err = StoreError::from_error_body(502, "<html>Bad Gateway</html>");
        match err {
            StoreError::Api { status, code, message } => {
                assert_eq!(status, 502);
                assert!(code.is_none());
                assert!(message.contains("Bad Gateway"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_auth_error_display() {
        let err = StoreError::Auth("invalid login credentials".to_string());
        assert_eq!(err.to_string(), "Auth error: invalid login credentials");
    }
}
