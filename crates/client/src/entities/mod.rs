//! Entity catalog: record, draft, and patch shapes for the five CRM tables.
//!
//! Every record is flat: an opaque store-assigned ID, the owning actor, a
//! status from a closed set, free-form service fields, and store-assigned
//! timestamps. Entities other than Customer carry a foreign customer
//! reference that the store resolves into [`CustomerRef`] at read time via
//! the projection - the client never joins.
//!
//! Drafts hold only user-supplied fields; patches are all-optional and only
//! serialize the fields being changed.

pub mod appointments;
pub mod customers;
pub mod invoices;
pub mod jobs;
pub mod quotes;

pub use appointments::{Appointment, AppointmentDraft, AppointmentPatch, AppointmentsResource};
pub use customers::{Customer, CustomerDraft, CustomerPatch, CustomersResource};
pub use invoices::{Invoice, InvoiceDraft, InvoicePatch, InvoicesResource};
pub use jobs::{Job, JobDraft, JobPatch, JobsResource};
pub use quotes::{Quote, QuoteDraft, QuotePatch, QuotesResource};

use serde::{Deserialize, Serialize};

use fieldwork_core::CustomerId;

/// Projection used by every customer-referencing entity.
pub(crate) const CUSTOMER_JOIN_SELECT: &str = "*,customer:customers(id,name,email,phone)";

/// The joined subset of a customer record embedded by the store.
///
/// Read-only: mutations go through the customers resource, never through
/// the embedding row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: CustomerId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
