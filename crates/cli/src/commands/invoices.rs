//! Invoice commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use fieldwork_client::entities::invoices::{InvoiceDraft, InvoicePatch, InvoicesResource};
use fieldwork_core::{CustomerId, InvoiceId, InvoiceStatus};

use super::context::Context;

#[derive(Subcommand)]
pub enum InvoicesAction {
    /// List invoices, newest first
    List,
    /// Create an invoice
    Create {
        /// Customer record ID
        #[arg(short, long)]
        customer: String,

        /// Service being billed
        #[arg(short, long)]
        service: String,

        /// Billed amount (e.g. 150.00)
        #[arg(long)]
        amount: Option<Decimal>,
    },
    /// Change an invoice's status
    SetStatus {
        /// Invoice record ID
        id: String,

        /// New status (`Draft`, `Pending`, `Paid`, `Overdue`)
        status: String,
    },
    /// Delete an invoice
    Delete {
        /// Invoice record ID
        id: String,
    },
}

pub async fn run(
    ctx: &Context,
    action: InvoicesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut invoices = InvoicesResource::new(ctx.store.clone(), ctx.actor);

    match action {
        InvoicesAction::List => {
            for invoice in invoices.list().await {
                let amount = invoice
                    .amount
                    .map_or_else(String::new, |a| format!("  {a}"));
                println!(
                    "{}  {:<8}  {}  {}{amount}",
                    invoice.id, invoice.status, invoice.invoice_number, invoice.service
                );
            }
        }
        InvoicesAction::Create {
            customer,
            service,
            amount,
        } => {
            let draft = InvoiceDraft {
                amount,
                ..InvoiceDraft::new(CustomerId::new(customer), service)
            };
            let invoice = invoices.create(draft).await?;
            println!("created {} ({})", invoice.invoice_number, invoice.id);
        }
        InvoicesAction::SetStatus { id, status } => {
            let status: InvoiceStatus = status.parse()?;
            let patch = InvoicePatch {
                status: Some(status),
                ..InvoicePatch::default()
            };
            let invoice = invoices.update(&InvoiceId::new(id), patch).await?;
            println!("{} is now {}", invoice.invoice_number, invoice.status);
        }
        InvoicesAction::Delete { id } => {
            invoices.delete(&InvoiceId::new(id)).await?;
            println!("deleted");
        }
    }

    Ok(())
}
