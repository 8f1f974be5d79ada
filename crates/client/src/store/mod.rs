//! Remote store capability.
//!
//! The backend exposes tabular storage with per-table select/insert/update/
//! delete plus named remote procedures. [`RemoteStore`] captures exactly that
//! surface at the JSON level; the resource layer deserializes rows into
//! entity types on its side of the boundary.
//!
//! [`supabase::SupabaseStore`] is the production implementation. Tests
//! substitute an in-memory implementation, which is why the seam is a trait.

pub mod supabase;

pub use supabase::SupabaseStore;

use serde_json::Value;

use crate::error::StoreError;

/// Sort direction for a fixed query order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A fixed sort order applied to every list query of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub direction: Direction,
}

impl Order {
    /// Ascending order on a column.
    #[must_use]
    pub const fn ascending(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Ascending,
        }
    }

    /// Descending order on a column.
    #[must_use]
    pub const fn descending(column: &'static str) -> Self {
        Self {
            column,
            direction: Direction::Descending,
        }
    }

    /// Render in the store's `column.direction` query form.
    #[must_use]
    pub fn to_query_value(&self) -> String {
        match self.direction {
            Direction::Ascending => format!("{}.asc", self.column),
            Direction::Descending => format!("{}.desc", self.column),
        }
    }
}

/// An equality filter on a column.
///
/// Equality is the only comparison the client ever needs: actor scoping and
/// row addressing by ID. Anything richer belongs to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    /// Filter rows where `column` equals `value`.
    #[must_use]
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

/// A list query: projection, equality filters, and a fixed order.
///
/// The projection uses the store's embedded-resource syntax for joins
/// (e.g. `*,customer:customers(id,name,email,phone)`), so reference
/// resolution happens server-side and the client never joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub select: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl SelectQuery {
    /// A query with the given projection, no filters, no order.
    #[must_use]
    pub fn new(select: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            filters: Vec::new(),
            order: None,
        }
    }

    /// Add an equality filter.
    #[must_use]
    pub fn filter(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(Filter::eq(column, value));
        self
    }

    /// Set the order.
    #[must_use]
    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    /// Render as URL query pairs in the store's syntax.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), self.select.clone())];
        for filter in &self.filters {
            pairs.push((filter.column.clone(), format!("eq.{}", filter.value)));
        }
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.to_query_value()));
        }
        pairs
    }
}

/// Capability boundary to the remote tabular store.
///
/// One method per operation the backend offers. All rows travel as JSON
/// values; errors are the store's, never synthesized locally.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Query rows from a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, StoreError>;

    /// Insert a single row, returning the stored representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert is rejected or the request fails.
    async fn insert(&self, table: &str, row: &Value) -> Result<Value, StoreError>;

    /// Update a row by ID, returning the stored representation.
    ///
    /// # Errors
    ///
    /// Returns an error if no row matches, the update is rejected, or the
    /// request fails.
    async fn update(&self, table: &str, id: &str, patch: &Value) -> Result<Value, StoreError>;

    /// Delete a row by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected or the request fails.
    async fn delete(&self, table: &str, id: &str) -> Result<(), StoreError>;

    /// Call a named remote procedure.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure fails or the request fails.
    async fn call_procedure(&self, procedure: &str, args: &Value) -> Result<Value, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_query_value() {
        assert_eq!(
            Order::descending("created_at").to_query_value(),
            "created_at.desc"
        );
        assert_eq!(
            Order::ascending("scheduled_at").to_query_value(),
            "scheduled_at.asc"
        );
    }

    #[test]
    fn test_select_query_pairs() {
        let query = SelectQuery::new("*,customer:customers(id,name)")
            .filter("user_id", "u1")
            .order(Order::descending("created_at"));

        assert_eq!(
            query.to_query_pairs(),
            vec![
                (
                    "select".to_string(),
                    "*,customer:customers(id,name)".to_string()
                ),
                ("user_id".to_string(), "eq.u1".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_query_minimal() {
        let query = SelectQuery::new("*");
        assert_eq!(
            query.to_query_pairs(),
            vec![("select".to_string(), "*".to_string())]
        );
    }
}
