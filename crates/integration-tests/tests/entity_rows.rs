//! Row-shape decoding: each entity against representative store JSON, and
//! draft/patch serialization against what the store expects to receive.

use rust_decimal::Decimal;
use serde_json::json;

use fieldwork_client::entities::appointments::Appointment;
use fieldwork_client::entities::customers::Customer;
use fieldwork_client::entities::invoices::Invoice;
use fieldwork_client::entities::jobs::{Job, JobDraft, JobPatch};
use fieldwork_client::entities::quotes::Quote;
use fieldwork_core::{CustomerId, InvoiceStatus, JobStatus, QuoteStatus};

#[test]
fn test_job_row_decodes_with_joined_customer() {
    let job: Job = serde_json::from_value(json!({
        "id": "j1",
        "job_number": "JOB-0001",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "customer_id": "c1",
        "customer": {
            "id": "c1",
            "name": "Dana Fixit",
            "email": "dana@example.com",
            "phone": null,
        },
        "service": "Plumbing Repair",
        "description": null,
        "status": "Quote Sent",
        "amount": "150.00",
        "scheduled_date": "2026-08-15",
        "scheduled_time": "09:30:00",
        "address": "12 Canal St",
        "notes": null,
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-02T10:30:00Z",
    }))
    .expect("job row decodes");

    assert_eq!(job.status, JobStatus::QuoteSent);
    assert_eq!(job.amount, Some(Decimal::new(15000, 2)));
    let customer = job.customer.expect("joined customer");
    assert_eq!(customer.name, "Dana Fixit");
    assert!(customer.phone.is_none());
}

#[test]
fn test_job_row_decodes_without_join_or_optionals() {
    // Insert representations come back without the embedded customer.
    let job: Job = serde_json::from_value(json!({
        "id": "j2",
        "job_number": "JOB-0002",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "customer_id": "c1",
        "service": "Gutter Cleaning",
        "status": "Scheduled",
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-01T09:00:00Z",
    }))
    .expect("sparse job row decodes");

    assert!(job.customer.is_none());
    assert!(job.amount.is_none());
    assert!(job.scheduled_date.is_none());
}

#[test]
fn test_customer_row_decodes() {
    let customer: Customer = serde_json::from_value(json!({
        "id": "c1",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "name": "Dana Fixit",
        "email": "dana@example.com",
        "phone": "555-0100",
        "address": null,
        "notes": null,
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-01T09:00:00Z",
    }))
    .expect("customer row decodes");

    assert_eq!(customer.id, CustomerId::new("c1"));
    assert_eq!(customer.email.as_deref(), Some("dana@example.com"));
}

#[test]
fn test_quote_row_decodes() {
    let quote: Quote = serde_json::from_value(json!({
        "id": "q1",
        "quote_number": "QUO-0001",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "customer_id": "c1",
        "service": "Bathroom Remodel",
        "status": "Accepted",
        "amount": "4200.00",
        "valid_until": "2026-09-30",
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-01T09:00:00Z",
    }))
    .expect("quote row decodes");

    assert_eq!(quote.status, QuoteStatus::Accepted);
    assert_eq!(quote.valid_until.map(|d| d.to_string()), Some("2026-09-30".to_string()));
}

#[test]
fn test_invoice_row_decodes() {
    let invoice: Invoice = serde_json::from_value(json!({
        "id": "i1",
        "invoice_number": "INV-0001",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "customer_id": "c1",
        "service": "Plumbing Repair",
        "status": "Overdue",
        "amount": "150.00",
        "due_date": "2026-08-20",
        "paid_at": null,
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-01T09:00:00Z",
    }))
    .expect("invoice row decodes");

    assert_eq!(invoice.status, InvoiceStatus::Overdue);
    assert!(invoice.paid_at.is_none());
}

#[test]
fn test_appointment_row_decodes() {
    let appointment: Appointment = serde_json::from_value(json!({
        "id": "a1",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "customer_id": "c1",
        "title": "Site visit",
        "location": "12 Canal St",
        "status": "Confirmed",
        "scheduled_at": "2026-08-15T10:00:00Z",
        "duration_minutes": 45,
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-01T09:00:00Z",
    }))
    .expect("appointment row decodes");

    assert_eq!(appointment.duration_minutes, Some(45));
    assert_eq!(appointment.title, "Site visit");
}

#[test]
fn test_draft_serialization_omits_unset_fields() {
    let draft = JobDraft::new(CustomerId::new("c1"), "Plumbing Repair");
    let value = serde_json::to_value(&draft).expect("serialize");
    let object = value.as_object().expect("object");

    assert_eq!(object["customer_id"], "c1");
    assert_eq!(object["service"], "Plumbing Repair");
    assert_eq!(object["status"], "Scheduled");
    assert!(!object.contains_key("description"));
    assert!(!object.contains_key("amount"));
    assert!(!object.contains_key("address"));
}

#[test]
fn test_patch_serialization_sends_only_set_fields() {
    let patch = JobPatch {
        status: Some(JobStatus::Completed),
        ..JobPatch::default()
    };
    let value = serde_json::to_value(&patch).expect("serialize");
    let object = value.as_object().expect("object");

    assert_eq!(object.len(), 1);
    assert_eq!(object["status"], "Completed");
}

#[test]
fn test_amount_decodes_from_json_number_too() {
    // Numeric columns may come back as JSON numbers depending on the store;
    // both forms must decode.
    let invoice: Invoice = serde_json::from_value(json!({
        "id": "i2",
        "invoice_number": "INV-0002",
        "user_id": "7f9c0e66-5dd7-4f2c-a7a6-9e1d3f2b4c5a",
        "customer_id": "c1",
        "service": "Gutter Cleaning",
        "status": "Pending",
        "amount": 99.5,
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-01T09:00:00Z",
    }))
    .expect("invoice with numeric amount decodes");

    assert_eq!(invoice.amount, Some(Decimal::new(995, 1)));
}
