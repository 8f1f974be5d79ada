//! The generic resource: one in-memory, refreshable view per entity type.
//!
//! A [`Resource`] pairs an owned snapshot of one remote table with four
//! operations (list, create, update, delete). The consistency contract is
//! eventual full-list consistency: every successful mutation is followed by
//! an unconditional refetch that replaces the snapshot wholesale. Nothing is
//! merged, nothing is applied optimistically, and nothing is retried.
//!
//! The five CRM entities differ only in table name, projection, sort order,
//! and whether creation consumes a remote sequence number, so the whole
//! family is one generic parameterized by an [`Entity`] descriptor.
//!
//! # Failure semantics
//!
//! - `list` failures are logged and suppressed; the previous snapshot stays.
//! - `create`/`update`/`delete` failures propagate to the caller; the
//!   snapshot stays at its last known-good state because nothing local was
//!   applied before the store confirmed the mutation.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut jobs = JobsResource::new(store.clone(), session.actor());
//! jobs.list().await;
//! let job = jobs
//!     .create(JobDraft::new(customer.id.clone(), "Plumbing Repair"))
//!     .await?;
//! assert!(jobs.items().iter().any(|j| j.id == job.id));
//! ```

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{instrument, warn};

use fieldwork_core::ActorId;

use crate::error::StoreError;
use crate::store::{Order, RemoteStore, SelectQuery};

/// A remote sequence-number generator consumed at creation time.
///
/// The procedure returns the next human-readable number (e.g. "JOB-0001");
/// the value lands in `column` on the inserted row. The generator call and
/// the insert are two separate remote calls: a failed insert after a
/// successful call leaves a gap in the sequence, which the store's numbering
/// scheme tolerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequence {
    /// Remote procedure name (e.g. `generate_job_number`).
    pub procedure: &'static str,
    /// Column the generated number is inserted under.
    pub column: &'static str,
}

/// Descriptor for one entity type managed by a [`Resource`].
///
/// Implementations only declare data shape and table wiring; all behavior
/// lives in the generic resource.
pub trait Entity: DeserializeOwned + Clone + Send + Sync {
    /// Remote table name.
    const TABLE: &'static str;

    /// Projection, in the store's embedded-resource syntax where the entity
    /// carries a joined customer reference.
    const SELECT: &'static str;

    /// Fixed sort order for every list query.
    const ORDER: Order;

    /// Sequence-number generator, for entities with human-readable numbers.
    const SEQUENCE: Option<Sequence> = None;

    /// Column holding the owning-user identifier.
    const OWNER_COLUMN: &'static str = "user_id";

    /// Opaque store-assigned identifier type.
    type Id: std::fmt::Display + Clone + Send + Sync;

    /// User-supplied fields for creation (no ID, no timestamps).
    type Draft: Serialize + Send + Sync;

    /// Partial set of fields for update.
    type Patch: Serialize + Send + Sync;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;
}

/// An in-memory list of one entity type plus mutations against its table.
///
/// Owns its state exclusively: `items` and `loading` belong to this value
/// and nothing else, so no synchronization is involved. The actor identity
/// is supplied at construction and scopes every query and insert.
#[derive(Debug)]
pub struct Resource<E: Entity, S> {
    store: S,
    actor: ActorId,
    items: Vec<E>,
    loading: bool,
}

impl<E: Entity, S: RemoteStore> Resource<E, S> {
    /// Create a resource over `store`, scoped to `actor`.
    ///
    /// The initial snapshot is empty; call [`Self::list`] to populate it.
    #[must_use]
    pub const fn new(store: S, actor: ActorId) -> Self {
        Self {
            store,
            actor,
            items: Vec::new(),
            loading: false,
        }
    }

    /// The current snapshot, in the store's return order.
    #[must_use]
    pub fn items(&self) -> &[E] {
        &self.items
    }

    /// True only while a list fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The actor this resource is scoped to.
    #[must_use]
    pub const fn actor(&self) -> ActorId {
        self.actor
    }

    /// Find a record in the current snapshot by ID.
    ///
    /// Purely local; does not touch the store.
    #[must_use]
    pub fn get(&self, id: &E::Id) -> Option<&E>
    where
        E::Id: PartialEq,
    {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Refetch the full list from the store.
    ///
    /// On success the snapshot is replaced wholesale with a point-in-time
    /// view; it is never merged with prior state. On failure the error is
    /// logged, the previous snapshot is kept, and the loading flag still
    /// clears. Either way the current snapshot is returned.
    #[instrument(skip(self), fields(table = E::TABLE))]
    pub async fn list(&mut self) -> &[E] {
        self.loading = true;

        let query = SelectQuery::new(E::SELECT)
            .filter(E::OWNER_COLUMN, self.actor.to_string())
            .order(E::ORDER);

        match self.fetch(&query).await {
            Ok(rows) => self.items = rows,
            Err(error) => {
                warn!(table = E::TABLE, %error, "list fetch failed, keeping stale snapshot");
            }
        }

        self.loading = false;
        &self.items
    }

    /// Create a record from user-supplied fields.
    ///
    /// For sequenced entities the remote generator runs first, then the
    /// draft plus sequence number plus owning-user ID is inserted as a
    /// single new row. On success the list is refetched in full and the
    /// stored record is returned.
    ///
    /// # Errors
    ///
    /// Propagates the store's error from either remote call. A failure
    /// between the generator call and the insert consumes a sequence number
    /// without creating a row; no local state is touched on any failure.
    pub async fn create(&mut self, draft: E::Draft) -> Result<E, StoreError> {
        let mut row = into_object(serde_json::to_value(&draft)?)?;

        if let Some(sequence) = E::SEQUENCE {
            let number = self
                .store
                .call_procedure(sequence.procedure, &Value::Object(Map::new()))
                .await?;
            row.insert(sequence.column.to_string(), number);
        }

        row.insert(
            E::OWNER_COLUMN.to_string(),
            Value::String(self.actor.to_string()),
        );

        let stored = self.store.insert(E::TABLE, &Value::Object(row)).await?;
        let created: E = serde_json::from_value(stored)?;

        self.list().await;
        Ok(created)
    }

    /// Update a record by ID with a partial set of fields.
    ///
    /// Stamps `updated_at` with the current client time (the store accepts
    /// the client's clock here), sends the patch, and refetches the full
    /// list on success.
    ///
    /// # Errors
    ///
    /// Propagates the store's error; the snapshot stays at its last
    /// known-good state and callers see stale data until a later refetch.
    pub async fn update(&mut self, id: &E::Id, patch: E::Patch) -> Result<E, StoreError> {
        let mut body = into_object(serde_json::to_value(&patch)?)?;
        body.insert(
            "updated_at".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );

        let stored = self
            .store
            .update(E::TABLE, &id.to_string(), &Value::Object(body))
            .await?;
        let updated: E = serde_json::from_value(stored)?;

        self.list().await;
        Ok(updated)
    }

    /// Delete a record by ID.
    ///
    /// Physical delete, no tombstones. Refetches the full list on success.
    ///
    /// # Errors
    ///
    /// Propagates the store's error; the snapshot is unchanged on failure.
    pub async fn delete(&mut self, id: &E::Id) -> Result<(), StoreError> {
        self.store.delete(E::TABLE, &id.to_string()).await?;

        self.list().await;
        Ok(())
    }

    /// Run the list query and decode rows into entities.
    async fn fetch(&self, query: &SelectQuery) -> Result<Vec<E>, StoreError> {
        let rows = self.store.select(E::TABLE, query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }
}

/// Require a serialized draft/patch to be a JSON object.
fn into_object(value: Value) -> Result<Map<String, Value>, StoreError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Parse(serde::ser::Error::custom(format!(
            "expected a JSON object, got {other}"
        )))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Debug, Clone, Deserialize)]
    struct Widget {
        id: String,
        name: String,
    }

    #[derive(Debug, Serialize)]
    struct WidgetDraft {
        name: String,
    }

    impl Entity for Widget {
        const TABLE: &'static str = "widgets";
        const SELECT: &'static str = "*";
        const ORDER: Order = Order::descending("created_at");
        type Id = String;
        type Draft = WidgetDraft;
        type Patch = WidgetDraft;

        fn id(&self) -> &String {
            &self.id
        }
    }

    /// Store double that serves one scripted select outcome per call.
    struct ScriptedStore {
        outcomes: Mutex<Vec<Result<Vec<Value>, StoreError>>>,
    }

    impl ScriptedStore {
        fn new(outcomes: Vec<Result<Vec<Value>, StoreError>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes),
            }
        }
    }

    impl RemoteStore for ScriptedStore {
        async fn select(&self, _: &str, _: &SelectQuery) -> Result<Vec<Value>, StoreError> {
            self.outcomes
                .lock()
                .expect("lock")
                .remove(0)
        }

        async fn insert(&self, _: &str, _: &Value) -> Result<Value, StoreError> {
            unreachable!("not used in these tests")
        }

        async fn update(&self, _: &str, _: &str, _: &Value) -> Result<Value, StoreError> {
            unreachable!("not used in these tests")
        }

        async fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
            unreachable!("not used in these tests")
        }

        async fn call_procedure(&self, _: &str, _: &Value) -> Result<Value, StoreError> {
            unreachable!("not used in these tests")
        }
    }

    fn widget_row(id: &str, name: &str) -> Value {
        serde_json::json!({"id": id, "name": name})
    }

    #[tokio::test]
    async fn test_list_replaces_snapshot_wholesale() {
        let store = ScriptedStore::new(vec![
            Ok(vec![widget_row("w1", "first"), widget_row("w2", "second")]),
            Ok(vec![widget_row("w3", "third")]),
        ]);
        let mut widgets: Resource<Widget, _> =
            Resource::new(store, ActorId::new(Uuid::nil()));

        widgets.list().await;
        assert_eq!(widgets.items().len(), 2);

        // Second snapshot replaces, never merges.
        widgets.list().await;
        assert_eq!(widgets.items().len(), 1);
        assert_eq!(widgets.items()[0].name, "third");
    }

    #[tokio::test]
    async fn test_list_failure_keeps_stale_snapshot_and_clears_loading() {
        let store = ScriptedStore::new(vec![
            Ok(vec![widget_row("w1", "first")]),
            Err(StoreError::Api {
                status: 503,
                code: None,
                message: "service unavailable".to_string(),
            }),
        ]);
        let mut widgets: Resource<Widget, _> =
            Resource::new(store, ActorId::new(Uuid::nil()));

        widgets.list().await;
        assert_eq!(widgets.items().len(), 1);

        widgets.list().await;
        assert_eq!(widgets.items().len(), 1, "stale snapshot must survive");
        assert!(!widgets.is_loading());
    }

    #[tokio::test]
    async fn test_list_decode_failure_is_a_fetch_failure() {
        let store = ScriptedStore::new(vec![
            Ok(vec![widget_row("w1", "first")]),
            Ok(vec![serde_json::json!({"unexpected": true})]),
        ]);
        let mut widgets: Resource<Widget, _> =
            Resource::new(store, ActorId::new(Uuid::nil()));

        widgets.list().await;
        widgets.list().await;
        assert_eq!(widgets.items().len(), 1, "undecodable rows keep the stale snapshot");
    }

    #[test]
    fn test_into_object_rejects_non_objects() {
        assert!(into_object(Value::String("nope".to_string())).is_err());
        assert!(into_object(serde_json::json!({"ok": 1})).is_ok());
    }
}
