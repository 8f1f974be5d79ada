//! Customers: the contact records everything else references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldwork_core::{ActorId, CustomerId};

use crate::resource::{Entity, Resource};
use crate::store::Order;

/// A customer record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub user_id: ActorId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for a new customer.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CustomerDraft {
    /// A draft with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            notes: None,
        }
    }
}

/// Partial update for a customer; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CustomerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Customer {
    const TABLE: &'static str = "customers";
    const SELECT: &'static str = "*";
    const ORDER: Order = Order::descending("created_at");

    type Id = CustomerId;
    type Draft = CustomerDraft;
    type Patch = CustomerPatch;

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

/// Resource over the customers table.
pub type CustomersResource<S> = Resource<Customer, S>;
