//! PostgREST-backed implementation of the remote store capability.
//!
//! Every call is a single HTTP round-trip against the project's REST
//! surface. Mutations ask for `return=representation` so the stored row
//! (with store-assigned ID and timestamps) comes back in the response.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::auth::Session;
use crate::config::SupabaseConfig;
use crate::error::StoreError;
use crate::store::{RemoteStore, SelectQuery};

// =============================================================================
// SupabaseStore
// =============================================================================

/// Client for the project's tabular REST interface.
///
/// Cheap to clone; derived stores from [`Self::authorized`] share nothing but
/// the configuration, so an anonymous and an actor-scoped store can coexist.
#[derive(Clone)]
pub struct SupabaseStore {
    inner: Arc<SupabaseStoreInner>,
}

struct SupabaseStoreInner {
    client: reqwest::Client,
    config: SupabaseConfig,
    bearer: SecretString,
}

impl SupabaseStore {
    /// Create a store that authenticates as the anonymous role.
    ///
    /// Row-level security will hide actor-owned rows until
    /// [`Self::authorized`] swaps in a session token.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(SupabaseStoreInner {
                client: reqwest::Client::new(),
                config: config.clone(),
                bearer: config.anon_key.clone(),
            }),
        }
    }

    /// Derive a store that sends the session's access token, so the store's
    /// row-level security scopes every read and write to the session actor.
    #[must_use]
    pub fn authorized(&self, session: &Session) -> Self {
        Self {
            inner: Arc::new(SupabaseStoreInner {
                client: self.inner.client.clone(),
                config: self.inner.config.clone(),
                bearer: session.access_token().clone(),
            }),
        }
    }

    /// Derive a store using the service-role key, when configured.
    ///
    /// Bypasses row-level security; for server-side tooling only.
    #[must_use]
    pub fn service_role(&self) -> Option<Self> {
        let key = self.inner.config.service_role_key.clone()?;
        Some(Self {
            inner: Arc::new(SupabaseStoreInner {
                client: self.inner.client.clone(),
                config: self.inner.config.clone(),
                bearer: key,
            }),
        })
    }

    /// Attach the project key and bearer token to a request.
    fn authenticate(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", self.inner.config.anon_key.expose_secret())
            .bearer_auth(self.inner.bearer.expose_secret())
    }

    /// Send a request and return the response body, mapping rate limits and
    /// non-success statuses to [`StoreError`].
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<String, StoreError> {
        let response = self.authenticate(builder).send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(StoreError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "store returned non-success status"
            );
            return Err(StoreError::from_error_body(status.as_u16(), &body));
        }

        Ok(body)
    }

    /// Parse a representation body into rows.
    fn parse_rows(body: &str) -> Result<Vec<Value>, StoreError> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<Value> = serde_json::from_str(body)?;
        Ok(rows)
    }
}

impl RemoteStore for SupabaseStore {
    #[instrument(skip(self, query), fields(table = %table))]
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        let url = self.inner.config.rest_endpoint(table);
        let builder = self
            .inner
            .client
            .get(url)
            .query(&query.to_query_pairs());

        let body = self.send(builder).await?;
        let rows = Self::parse_rows(&body)?;
        debug!(count = rows.len(), "selected rows");
        Ok(rows)
    }

    #[instrument(skip(self, row), fields(table = %table))]
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        let url = self.inner.config.rest_endpoint(table);
        let builder = self
            .inner
            .client
            .post(url)
            .header("Prefer", "return=representation")
            .json(row);

        let body = self.send(builder).await?;
        Self::parse_rows(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("{table} insert returned no row")))
    }

    #[instrument(skip(self, patch), fields(table = %table, id = %id))]
    async fn update(&self, table: &str, id: &str, patch: &Value) -> Result<Value, StoreError> {
        let url = self.inner.config.rest_endpoint(table);
        let builder = self
            .inner
            .client
            .patch(url)
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(patch);

        let body = self.send(builder).await?;
        // An empty representation means no row matched the ID (or the row is
        // invisible to this actor).
        Self::parse_rows(&body)?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(format!("{table} row {id}")))
    }

    #[instrument(skip(self), fields(table = %table, id = %id))]
    async fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let url = self.inner.config.rest_endpoint(table);
        let builder = self
            .inner
            .client
            .delete(url)
            .query(&[("id", format!("eq.{id}"))]);

        self.send(builder).await?;
        Ok(())
    }

    #[instrument(skip(self, args), fields(procedure = %procedure))]
    async fn call_procedure(&self, procedure: &str, args: &Value) -> Result<Value, StoreError> {
        let url = self.inner.config.rpc_endpoint(procedure);
        let builder = self.inner.client.post(url).json(args);

        let body = self.send(builder).await?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows_empty_body() {
        let rows = SupabaseStore::parse_rows("").expect("empty body is no rows");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_parse_rows_array() {
        let rows =
            SupabaseStore::parse_rows(r#"[{"id":"j1"},{"id":"j2"}]"#).expect("two rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "j1");
    }

    #[test]
    fn test_parse_rows_rejects_object() {
        assert!(SupabaseStore::parse_rows(r#"{"id":"j1"}"#).is_err());
    }
}
