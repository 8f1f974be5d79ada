//! Integration test support for Fieldwork.
//!
//! The resource layer is store-agnostic, so the consistency contract is
//! tested against [`MemoryStore`]: an in-memory stand-in for the remote
//! store with store-assigned IDs and timestamps, per-procedure sequence
//! counters, equality filtering, order application, customer embedding, and
//! one-shot failure injection per operation kind.
//!
//! Like the production store client, `MemoryStore` is a cheap `Clone` over
//! shared inner state - tests keep one handle for seeding and inspection
//! and give clones to the resources under test.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value};

use fieldwork_client::error::StoreError;
use fieldwork_client::store::{Direction, RemoteStore, SelectQuery};

/// Operation kinds that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Select,
    Insert,
    Update,
    Delete,
    Procedure,
}

struct State {
    tables: HashMap<String, Vec<Value>>,
    sequences: HashMap<String, u64>,
    next_row: u64,
    /// Deterministic clock: each assigned timestamp is one second later.
    ticks: i64,
    fail_next: Option<Op>,
}

/// In-memory implementation of the remote store capability.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<State>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(State {
                tables: HashMap::new(),
                sequences: HashMap::new(),
                next_row: 1,
                ticks: 0,
                fail_next: None,
            })),
        }
    }

    /// Make the next operation of the given kind fail with a server error.
    pub fn fail_next(&self, op: Op) {
        self.lock().fail_next = Some(op);
    }

    /// Insert rows directly, bypassing ID and timestamp assignment.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Raw rows currently in a table.
    #[must_use]
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.inner.lock().expect("memory store poisoned")
    }

    fn check_fail(state: &mut State, op: Op) -> Result<(), StoreError> {
        if state.fail_next == Some(op) {
            state.fail_next = None;
            return Err(StoreError::Api {
                status: 500,
                code: None,
                message: format!("injected {op:?} failure"),
            });
        }
        Ok(())
    }

    fn next_timestamp(state: &mut State) -> String {
        // Far enough in the past that client-stamped `updated_at` values
        // (real wall clock) always compare later than store-assigned ones.
        let base: DateTime<Utc> = "2020-01-01T09:00:00Z".parse().expect("valid base time");
        let stamp = base + Duration::seconds(state.ticks);
        state.ticks += 1;
        stamp.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    }

    /// Embed the joined customer subset the way the store resolves
    /// `customer:customers(id,name,email,phone)`.
    fn embed_customer(state: &State, row: &mut Value) {
        let Some(customer_id) = row.get("customer_id").cloned() else {
            return;
        };
        let customer = state
            .tables
            .get("customers")
            .and_then(|rows| rows.iter().find(|r| r.get("id") == Some(&customer_id)));

        if let (Some(customer), Some(object)) = (customer, row.as_object_mut()) {
            let mut subset = Map::new();
            for key in ["id", "name", "email", "phone"] {
                if let Some(value) = customer.get(key) {
                    subset.insert(key.to_string(), value.clone());
                }
            }
            object.insert("customer".to_string(), Value::Object(subset));
        }
    }

    fn field_as_string(row: &Value, column: &str) -> String {
        match row.get(column) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

impl RemoteStore for MemoryStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, StoreError> {
        let mut state = self.lock();
        Self::check_fail(&mut state, Op::Select)?;

        let mut rows: Vec<Value> = state
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|row| {
                query
                    .filters
                    .iter()
                    .all(|f| Self::field_as_string(row, &f.column) == f.value)
            })
            .collect();

        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let left = Self::field_as_string(a, order.column);
                let right = Self::field_as_string(b, order.column);
                match order.direction {
                    Direction::Ascending => left.cmp(&right),
                    Direction::Descending => right.cmp(&left),
                }
            });
        }

        if query.select.contains("customer:customers") {
            for row in &mut rows {
                Self::embed_customer(&state, row);
            }
        }

        Ok(rows)
    }

    async fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError> {
        let mut state = self.lock();
        Self::check_fail(&mut state, Op::Insert)?;

        let mut stored = row.clone();
        let Some(object) = stored.as_object_mut() else {
            return Err(StoreError::Api {
                status: 400,
                code: None,
                message: "insert body must be an object".to_string(),
            });
        };

        let id = format!("rec-{}", state.next_row);
        state.next_row += 1;
        let stamp = Self::next_timestamp(&mut state);

        object.insert("id".to_string(), Value::String(id));
        object.insert("created_at".to_string(), Value::String(stamp.clone()));
        object.insert("updated_at".to_string(), Value::String(stamp));

        state
            .tables
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());

        Ok(stored)
    }

    async fn update(&self, table: &str, id: &str, patch: &Value) -> Result<Value, StoreError> {
        let mut state = self.lock();
        Self::check_fail(&mut state, Op::Update)?;

        let row = state
            .tables
            .get_mut(table)
            .and_then(|rows| {
                rows.iter_mut()
                    .find(|r| r.get("id").and_then(Value::as_str) == Some(id))
            })
            .ok_or_else(|| StoreError::NotFound(format!("{table} row {id}")))?;

        if let (Some(object), Some(changes)) = (row.as_object_mut(), patch.as_object()) {
            for (key, value) in changes {
                object.insert(key.clone(), value.clone());
            }
        }

        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        Self::check_fail(&mut state, Op::Delete)?;

        if let Some(rows) = state.tables.get_mut(table) {
            rows.retain(|r| r.get("id").and_then(Value::as_str) != Some(id));
        }
        Ok(())
    }

    async fn call_procedure(&self, procedure: &str, _args: &Value) -> Result<Value, StoreError> {
        let mut state = self.lock();
        Self::check_fail(&mut state, Op::Procedure)?;

        let prefix = match procedure {
            "generate_job_number" => "JOB",
            "generate_quote_number" => "QUO",
            "generate_invoice_number" => "INV",
            other => return Err(StoreError::NotFound(format!("procedure {other}"))),
        };

        let counter = state.sequences.entry(procedure.to_string()).or_insert(0);
        *counter += 1;
        Ok(Value::String(format!("{prefix}-{counter:04}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldwork_client::store::Order;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = MemoryStore::new();
        let row = store
            .insert("jobs", &serde_json::json!({"service": "x"}))
            .await
            .expect("insert");

        assert_eq!(row["id"], "rec-1");
        assert_eq!(row["created_at"], row["updated_at"]);
    }

    #[tokio::test]
    async fn test_sequence_numbers_are_per_procedure() {
        let store = MemoryStore::new();
        let args = serde_json::json!({});
        let first = store
            .call_procedure("generate_job_number", &args)
            .await
            .expect("rpc");
        let second = store
            .call_procedure("generate_job_number", &args)
            .await
            .expect("rpc");
        let other = store
            .call_procedure("generate_invoice_number", &args)
            .await
            .expect("rpc");

        assert_eq!(first, "JOB-0001");
        assert_eq!(second, "JOB-0002");
        assert_eq!(other, "INV-0001");
    }

    #[tokio::test]
    async fn test_fail_next_fires_once() {
        let store = MemoryStore::new();
        store.fail_next(Op::Select);

        let query = SelectQuery::new("*").order(Order::descending("created_at"));
        assert!(store.select("jobs", &query).await.is_err());
        assert!(store.select("jobs", &query).await.is_ok());
    }
}
