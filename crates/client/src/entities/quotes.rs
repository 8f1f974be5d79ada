//! Quotes: priced proposals that may become jobs.
//!
//! Creation consumes `generate_quote_number`.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fieldwork_core::{ActorId, CustomerId, QuoteId, QuoteStatus};

use crate::entities::{CUSTOMER_JOIN_SELECT, CustomerRef};
use crate::resource::{Entity, Resource, Sequence};
use crate::store::Order;

/// A quote record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub quote_number: String,
    pub user_id: ActorId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    pub service: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: QuoteStatus,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for a new quote.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDraft {
    pub customer_id: CustomerId,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: QuoteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

impl QuoteDraft {
    /// A draft with the required fields and everything else unset.
    #[must_use]
    pub fn new(customer_id: CustomerId, service: impl Into<String>) -> Self {
        Self {
            customer_id,
            service: service.into(),
            description: None,
            status: QuoteStatus::default(),
            amount: None,
            valid_until: None,
        }
    }
}

/// Partial update for a quote; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<QuoteStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<NaiveDate>,
}

impl Entity for Quote {
    const TABLE: &'static str = "quotes";
    const SELECT: &'static str = CUSTOMER_JOIN_SELECT;
    const ORDER: Order = Order::descending("created_at");
    const SEQUENCE: Option<Sequence> = Some(Sequence {
        procedure: "generate_quote_number",
        column: "quote_number",
    });

    type Id = QuoteId;
    type Draft = QuoteDraft;
    type Patch = QuotePatch;

    fn id(&self) -> &QuoteId {
        &self.id
    }
}

/// Resource over the quotes table.
pub type QuotesResource<S> = Resource<Quote, S>;
