//! Dashboard summary across jobs, invoices, and quotes.

use fieldwork_client::entities::{InvoicesResource, JobsResource, QuotesResource};
use fieldwork_client::stats::{job_counts, quote_acceptance_rate, revenue_summary};

use super::context::Context;

pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let mut jobs = JobsResource::new(ctx.store.clone(), ctx.actor);
    let mut invoices = InvoicesResource::new(ctx.store.clone(), ctx.actor);
    let mut quotes = QuotesResource::new(ctx.store.clone(), ctx.actor);

    let counts = job_counts(jobs.list().await);
    let revenue = revenue_summary(invoices.list().await);
    let acceptance = quote_acceptance_rate(quotes.list().await);

    println!("jobs:      {} total", counts.total);
    println!(
        "           {} scheduled, {} in progress, {} completed, {} cancelled",
        counts.scheduled, counts.in_progress, counts.completed, counts.cancelled
    );
    println!("collected: {}", revenue.collected);
    println!(
        "owed:      {} ({} overdue)",
        revenue.outstanding, revenue.overdue
    );
    match acceptance {
        Some(rate) => println!("quotes:    {:.0}% accepted", rate * 100.0),
        None => println!("quotes:    no decided quotes yet"),
    }

    Ok(())
}
