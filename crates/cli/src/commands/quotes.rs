//! Quote commands.

use clap::Subcommand;
use rust_decimal::Decimal;

use fieldwork_client::entities::quotes::{QuoteDraft, QuotePatch, QuotesResource};
use fieldwork_core::{CustomerId, QuoteId, QuoteStatus};

use super::context::Context;

#[derive(Subcommand)]
pub enum QuotesAction {
    /// List quotes, newest first
    List,
    /// Create a quote
    Create {
        /// Customer record ID
        #[arg(short, long)]
        customer: String,

        /// Service being quoted
        #[arg(short, long)]
        service: String,

        /// Quoted amount (e.g. 150.00)
        #[arg(long)]
        amount: Option<Decimal>,
    },
    /// Change a quote's status
    SetStatus {
        /// Quote record ID
        id: String,

        /// New status (`Draft`, `Pending`, `Accepted`, `Rejected`)
        status: String,
    },
    /// Delete a quote
    Delete {
        /// Quote record ID
        id: String,
    },
}

pub async fn run(ctx: &Context, action: QuotesAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut quotes = QuotesResource::new(ctx.store.clone(), ctx.actor);

    match action {
        QuotesAction::List => {
            for quote in quotes.list().await {
                let amount = quote
                    .amount
                    .map_or_else(String::new, |a| format!("  {a}"));
                println!(
                    "{}  {:<10}  {}  {}{amount}",
                    quote.id, quote.status, quote.quote_number, quote.service
                );
            }
        }
        QuotesAction::Create {
            customer,
            service,
            amount,
        } => {
            let draft = QuoteDraft {
                amount,
                ..QuoteDraft::new(CustomerId::new(customer), service)
            };
            let quote = quotes.create(draft).await?;
            println!("created {} ({})", quote.quote_number, quote.id);
        }
        QuotesAction::SetStatus { id, status } => {
            let status: QuoteStatus = status.parse()?;
            let patch = QuotePatch {
                status: Some(status),
                ..QuotePatch::default()
            };
            let quote = quotes.update(&QuoteId::new(id), patch).await?;
            println!("{} is now {}", quote.quote_number, quote.status);
        }
        QuotesAction::Delete { id } => {
            quotes.delete(&QuoteId::new(id)).await?;
            println!("deleted");
        }
    }

    Ok(())
}
