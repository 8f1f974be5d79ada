//! Customer commands.

use clap::Subcommand;

use fieldwork_client::entities::customers::{CustomerDraft, CustomersResource};
use fieldwork_core::CustomerId;

use super::context::Context;

#[derive(Subcommand)]
pub enum CustomersAction {
    /// List customers, newest first
    List,
    /// Create a customer
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,

        /// Street address
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a customer
    Delete {
        /// Customer record ID
        id: String,
    },
}

pub async fn run(
    ctx: &Context,
    action: CustomersAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut customers = CustomersResource::new(ctx.store.clone(), ctx.actor);

    match action {
        CustomersAction::List => {
            for customer in customers.list().await {
                let email = customer.email.as_deref().unwrap_or("-");
                let phone = customer.phone.as_deref().unwrap_or("-");
                println!("{}  {}  {email}  {phone}", customer.id, customer.name);
            }
        }
        CustomersAction::Create {
            name,
            email,
            phone,
            address,
        } => {
            let draft = CustomerDraft {
                email,
                phone,
                address,
                ..CustomerDraft::new(name)
            };
            let customer = customers.create(draft).await?;
            println!("created {} ({})", customer.name, customer.id);
        }
        CustomersAction::Delete { id } => {
            customers.delete(&CustomerId::new(id)).await?;
            println!("deleted");
        }
    }

    Ok(())
}
