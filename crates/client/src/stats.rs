//! Derived dashboard statistics.
//!
//! Pure aggregation over resource snapshots - no I/O, no caching. The
//! dashboard screens recompute these on every render from whatever the
//! resources currently hold.

use rust_decimal::Decimal;

use fieldwork_core::{InvoiceStatus, JobStatus, QuoteStatus};

use crate::entities::{Invoice, Job, Quote};

/// Job counts by lifecycle bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobCounts {
    pub total: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Count jobs by status.
#[must_use]
pub fn job_counts(jobs: &[Job]) -> JobCounts {
    let mut counts = JobCounts {
        total: jobs.len(),
        ..JobCounts::default()
    };
    for job in jobs {
        match job.status {
            JobStatus::Scheduled => counts.scheduled += 1,
            JobStatus::InProgress => counts.in_progress += 1,
            JobStatus::Completed => counts.completed += 1,
            JobStatus::Cancelled => counts.cancelled += 1,
            JobStatus::QuoteSent | JobStatus::Approved => {}
        }
    }
    counts
}

/// Money collected and money still owed, from the invoice snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RevenueSummary {
    /// Sum of paid invoice amounts.
    pub collected: Decimal,
    /// Sum of pending and overdue invoice amounts.
    pub outstanding: Decimal,
    /// Number of overdue invoices.
    pub overdue: usize,
}

/// Sum invoice amounts by payment status. Invoices without an amount count
/// for zero.
#[must_use]
pub fn revenue_summary(invoices: &[Invoice]) -> RevenueSummary {
    let mut summary = RevenueSummary::default();
    for invoice in invoices {
        let amount = invoice.amount.unwrap_or_default();
        match invoice.status {
            InvoiceStatus::Paid => summary.collected += amount,
            InvoiceStatus::Pending => summary.outstanding += amount,
            InvoiceStatus::Overdue => {
                summary.outstanding += amount;
                summary.overdue += 1;
            }
            InvoiceStatus::Draft => {}
        }
    }
    summary
}

/// Fraction of decided quotes that were accepted.
///
/// Returns `None` when no quote has been accepted or rejected yet, so the
/// dashboard can show a placeholder instead of a misleading 0%.
#[must_use]
pub fn quote_acceptance_rate(quotes: &[Quote]) -> Option<f64> {
    let accepted = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Accepted)
        .count();
    let rejected = quotes
        .iter()
        .filter(|q| q.status == QuoteStatus::Rejected)
        .count();

    let decided = accepted + rejected;
    if decided == 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)] // Counts will never exceed f64 precision
    let rate = accepted as f64 / decided as f64;
    Some(rate)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job(status: &str) -> Job {
        serde_json::from_value(json!({
            "id": "j1",
            "job_number": "JOB-0001",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "customer_id": "c1",
            "service": "Plumbing Repair",
            "status": status,
            "created_at": "2026-08-01T09:00:00Z",
            "updated_at": "2026-08-01T09:00:00Z",
        }))
        .unwrap()
    }

    fn invoice(status: &str, amount: &str) -> Invoice {
        serde_json::from_value(json!({
            "id": "i1",
            "invoice_number": "INV-0001",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "customer_id": "c1",
            "service": "Plumbing Repair",
            "status": status,
            "amount": amount,
            "created_at": "2026-08-01T09:00:00Z",
            "updated_at": "2026-08-01T09:00:00Z",
        }))
        .unwrap()
    }

    fn quote(status: &str) -> Quote {
        serde_json::from_value(json!({
            "id": "q1",
            "quote_number": "QUO-0001",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "customer_id": "c1",
            "service": "Plumbing Repair",
            "status": status,
            "created_at": "2026-08-01T09:00:00Z",
            "updated_at": "2026-08-01T09:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_job_counts() {
        let jobs = vec![
            job("Scheduled"),
            job("Scheduled"),
            job("In Progress"),
            job("Completed"),
            job("Quote Sent"),
        ];
        let counts = job_counts(&jobs);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.scheduled, 2);
        assert_eq!(counts.in_progress, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.cancelled, 0);
    }

    #[test]
    fn test_revenue_summary() {
        let invoices = vec![
            invoice("Paid", "150.00"),
            invoice("Paid", "49.50"),
            invoice("Pending", "200.00"),
            invoice("Overdue", "75.25"),
            invoice("Draft", "999.99"),
        ];
        let summary = revenue_summary(&invoices);
        assert_eq!(summary.collected, Decimal::new(19950, 2));
        assert_eq!(summary.outstanding, Decimal::new(27525, 2));
        assert_eq!(summary.overdue, 1);
    }

    #[test]
    fn test_revenue_summary_missing_amounts_count_zero() {
        let mut paid = invoice("Paid", "150.00");
        paid.amount = None;
        let summary = revenue_summary(&[paid]);
        assert_eq!(summary.collected, Decimal::ZERO);
    }

    #[test]
    fn test_quote_acceptance_rate() {
        let quotes = vec![
            quote("Accepted"),
            quote("Accepted"),
            quote("Rejected"),
            quote("Pending"),
            quote("Draft"),
        ];
        let rate = quote_acceptance_rate(&quotes).unwrap();
        assert!((rate - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_quote_acceptance_rate_undecided() {
        assert!(quote_acceptance_rate(&[quote("Pending")]).is_none());
        assert!(quote_acceptance_rate(&[]).is_none());
    }
}
