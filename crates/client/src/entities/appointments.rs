//! Appointments: calendar entries tied to a customer.
//!
//! The one entity listed soonest-first: ordered ascending by the scheduling
//! timestamp rather than descending by creation time. No sequence number.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldwork_core::{ActorId, AppointmentId, AppointmentStatus, CustomerId};

use crate::entities::{CUSTOMER_JOIN_SELECT, CustomerRef};
use crate::resource::{Entity, Resource};
use crate::store::Order;

/// An appointment record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub user_id: ActorId,
    pub customer_id: CustomerId,
    #[serde(default)]
    pub customer: Option<CustomerRef>,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    pub status: AppointmentStatus,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-supplied fields for a new appointment.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentDraft {
    pub customer_id: CustomerId,
    pub title: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentDraft {
    /// A draft with the required fields and everything else unset.
    #[must_use]
    pub fn new(
        customer_id: CustomerId,
        title: impl Into<String>,
        scheduled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            customer_id,
            title: title.into(),
            scheduled_at,
            status: AppointmentStatus::default(),
            location: None,
            duration_minutes: None,
            notes: None,
        }
    }
}

/// Partial update for an appointment; only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entity for Appointment {
    const TABLE: &'static str = "appointments";
    const SELECT: &'static str = CUSTOMER_JOIN_SELECT;
    const ORDER: Order = Order::ascending("scheduled_at");

    type Id = AppointmentId;
    type Draft = AppointmentDraft;
    type Patch = AppointmentPatch;

    fn id(&self) -> &AppointmentId {
        &self.id
    }
}

/// Resource over the appointments table.
pub type AppointmentsResource<S> = Resource<Appointment, S>;
