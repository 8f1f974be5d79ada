//! Job commands: the full lifecycle from creation to deletion.

use clap::Subcommand;
use rust_decimal::Decimal;

use fieldwork_client::entities::jobs::{JobDraft, JobPatch, JobsResource};
use fieldwork_core::{CustomerId, JobId, JobStatus};

use super::context::Context;

#[derive(Subcommand)]
pub enum JobsAction {
    /// List jobs, newest first
    List,
    /// Create a job
    Create {
        /// Customer record ID
        #[arg(short, long)]
        customer: String,

        /// Service performed (e.g. "Plumbing Repair")
        #[arg(short, long)]
        service: String,

        /// Longer description of the work
        #[arg(long)]
        description: Option<String>,

        /// Quoted amount (e.g. 150.00)
        #[arg(long)]
        amount: Option<Decimal>,

        /// Service address
        #[arg(long)]
        address: Option<String>,
    },
    /// Change a job's status
    SetStatus {
        /// Job record ID
        id: String,

        /// New status (`Scheduled`, `In Progress`, `Completed`, `Cancelled`,
        /// `Quote Sent`, `Approved`)
        status: String,
    },
    /// Delete a job
    Delete {
        /// Job record ID
        id: String,
    },
}

pub async fn run(ctx: &Context, action: JobsAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut jobs = JobsResource::new(ctx.store.clone(), ctx.actor);

    match action {
        JobsAction::List => {
            for job in jobs.list().await {
                let customer = job
                    .customer
                    .as_ref()
                    .map_or_else(|| job.customer_id.to_string(), |c| c.name.clone());
                let amount = job
                    .amount
                    .map_or_else(String::new, |a| format!("  {a}"));
                println!(
                    "{}  {:<12}  {}  {} ({customer}){amount}",
                    job.id, job.status, job.job_number, job.service
                );
            }
        }
        JobsAction::Create {
            customer,
            service,
            description,
            amount,
            address,
        } => {
            let draft = JobDraft {
                description,
                amount,
                address,
                ..JobDraft::new(CustomerId::new(customer), service)
            };
            let job = jobs.create(draft).await?;
            println!("created {} ({})", job.job_number, job.id);
        }
        JobsAction::SetStatus { id, status } => {
            let status: JobStatus = status.parse()?;
            let patch = JobPatch {
                status: Some(status),
                ..JobPatch::default()
            };
            let job = jobs.update(&JobId::new(id), patch).await?;
            println!("{} is now {}", job.job_number, job.status);
        }
        JobsAction::Delete { id } => {
            jobs.delete(&JobId::new(id)).await?;
            println!("deleted");
        }
    }

    Ok(())
}
