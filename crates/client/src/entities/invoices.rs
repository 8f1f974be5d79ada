//! Invoices: billed work awaiting payment.
//!
//! Creation consumes `generate_invoice_number`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fieldwork_core::{ActorId, CustomerId, InvoiceId, InvoiceStatus};

use crate::entities::{CUSTOMER_JOIN_SELECT, CustomerRef};
use crate::resource::{Entity, Resource, Sequence};
use crate::store::Order;

/// An invoice record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    pub user_id: ActorId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    pub service: String,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for a new invoice.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDraft {
    pub customer_id: CustomerId,
    pub service: String,
    pub status: InvoiceStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl InvoiceDraft {
    /// A draft with the required fields and everything else unset.
    #[must_use]
    pub fn new(customer_id: CustomerId, service: impl Into<String>) -> Self {
        Self {
            customer_id,
            service: service.into(),
            status: InvoiceStatus::default(),
            amount: None,
            due_date: None,
        }
    }
}

/// Partial update for an invoice; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoicePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InvoiceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Entity for Invoice {
    const TABLE: &'static str = "invoices";
    const SELECT: &'static str = CUSTOMER_JOIN_SELECT;
    const ORDER: Order = Order::descending("created_at");
    const SEQUENCE: Option<Sequence> = Some(Sequence {
        procedure: "generate_invoice_number",
        column: "invoice_number",
    });

    type Id = InvoiceId;
    type Draft = InvoiceDraft;
    type Patch = InvoicePatch;

    fn id(&self) -> &InvoiceId {
        &self.id
    }
}

/// Resource over the invoices table.
pub type InvoicesResource<S> = Resource<Invoice, S>;
