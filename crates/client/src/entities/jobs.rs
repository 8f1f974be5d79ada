//! Jobs: scheduled field-service work for a customer.
//!
//! Creation consumes `generate_job_number` for the human-readable number;
//! lists come back newest-first with the customer joined in.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fieldwork_core::{ActorId, CustomerId, JobId, JobStatus};

use crate::entities::{CUSTOMER_JOIN_SELECT, CustomerRef};
use crate::resource::{Entity, Resource, Sequence};
use crate::store::Order;

/// A job record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub job_number: String,
    pub user_id: ActorId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    pub service: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for a new job.
#[derive(Debug, Clone, Serialize)]
pub struct JobDraft {
    pub customer_id: CustomerId,
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: JobStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl JobDraft {
    /// A draft with the required fields and everything else unset.
    #[must_use]
    pub fn new(customer_id: CustomerId, service: impl Into<String>) -> Self {
        Self {
            customer_id,
            service: service.into(),
            description: None,
            status: JobStatus::default(),
            amount: None,
            scheduled_date: None,
            scheduled_time: None,
            address: None,
            notes: None,
        }
    }
}

/// Partial update for a job; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Job {
    const TABLE: &'static str = "jobs";
    const SELECT: &'static str = CUSTOMER_JOIN_SELECT;
    const ORDER: Order = Order::descending("created_at");
    const SEQUENCE: Option<Sequence> = Some(Sequence {
        procedure: "generate_job_number",
        column: "job_number",
    });

    type Id = JobId;
    type Draft = JobDraft;
    type Patch = JobPatch;

    fn id(&self) -> &JobId {
        &self.id
    }
}

/// Resource over the jobs table.
pub type JobsResource<S> = Resource<Job, S>;
