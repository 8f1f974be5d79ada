//! Auth service client: password-grant sign-in and session refresh.
//!
//! Identity, credential storage, and verification all live in the hosted
//! auth service; this module only exchanges credentials for a session and
//! carries the actor identity into store calls. The access token goes to
//! [`crate::store::SupabaseStore::authorized`]; the actor ID goes to each
//! resource's constructor.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use fieldwork_core::ActorId;

use crate::config::SupabaseConfig;
use crate::error::StoreError;

// =============================================================================
// Session
// =============================================================================

/// An authenticated session returned by the auth service.
#[derive(Clone)]
pub struct Session {
    access_token: SecretString,
    refresh_token: SecretString,
    expires_in: u64,
    user: AuthUser,
}

/// The authenticated user behind a session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ActorId,
    pub email: Option<String>,
}

impl Session {
    /// The bearer token for store calls.
    #[must_use]
    pub const fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Seconds until the access token expires.
    #[must_use]
    pub const fn expires_in(&self) -> u64 {
        self.expires_in
    }

    /// The owning-user identifier to scope resource operations by.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        self.user.id
    }

    /// The authenticated user.
    #[must_use]
    pub const fn user(&self) -> &AuthUser {
        &self.user
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish()
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: u64,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    error: Option<String>,
}

// =============================================================================
// AuthClient
// =============================================================================

/// Client for the auth service's token endpoint.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    config: SupabaseConfig,
}

impl AuthClient {
    /// Create a new auth client.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(AuthClientInner {
                client: reqwest::Client::new(),
                config: config.clone(),
            }),
        }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if the service rejects the credentials,
    /// `StoreError::Http`/`StoreError::Parse` on transport or body failures.
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, StoreError> {
        let url = self.inner.config.token_endpoint("password");
        let body = serde_json::json!({
            "email": email,
            "password": password.expose_secret(),
        });

        self.token_request(url, &body).await
    }

    /// Exchange a refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` if the refresh token is expired or revoked.
    pub async fn refresh(&self, session: &Session) -> Result<Session, StoreError> {
        let url = self.inner.config.token_endpoint("refresh_token");
        let body = serde_json::json!({
            "refresh_token": session.refresh_token.expose_secret(),
        });

        self.token_request(url, &body).await
    }

    async fn token_request(
        &self,
        url: url::Url,
        body: &serde_json::Value,
    ) -> Result<Session, StoreError> {
        let response = self
            .inner
            .client
            .post(url)
            .header("apikey", self.inner.config.anon_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Auth(extract_auth_error(&text)));
        }

        let token: TokenResponse = serde_json::from_str(&text)?;
        Ok(Session {
            access_token: SecretString::from(token.access_token),
            refresh_token: SecretString::from(token.refresh_token),
            expires_in: token.expires_in,
            user: AuthUser {
                id: ActorId::new(token.user.id),
                email: token.user.email,
            },
        })
    }
}

/// Pull the most descriptive message out of an auth error body.
fn extract_auth_error(body: &str) -> String {
    match serde_json::from_str::<AuthErrorBody>(body) {
        Ok(parsed) => parsed
            .error_description
            .or(parsed.msg)
            .or(parsed.error)
            .unwrap_or_else(|| "authentication failed".to_string()),
        Err(_) => body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_auth_error_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(extract_auth_error(body), "Invalid login credentials");
    }

    #[test]
    fn test_extract_auth_error_msg_fallback() {
        let body = r#"{"msg":"Email not confirmed"}"#;
        assert_eq!(extract_auth_error(body), "Email not confirmed");
    }

    #[test]
    fn test_extract_auth_error_non_json() {
        assert_eq!(extract_auth_error("gateway timeout"), "gateway timeout");
    }

    #[test]
    fn test_session_debug_redacts_tokens() {
        let session = Session {
            access_token: SecretString::from("token-abc"),
            refresh_token: SecretString::from("token-def"),
            expires_in: 3600,
            user: AuthUser {
                id: ActorId::new(Uuid::nil()),
                email: Some("owner@example.com".to_string()),
            },
        };

        let debug_output = format!("{session:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("token-abc"));
        assert!(!debug_output.contains("token-def"));
    }
}
