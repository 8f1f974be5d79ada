//! Appointment commands.

use chrono::{DateTime, Utc};
use clap::Subcommand;

use fieldwork_client::entities::appointments::{AppointmentDraft, AppointmentsResource};
use fieldwork_core::{AppointmentId, CustomerId};

use super::context::Context;

#[derive(Subcommand)]
pub enum AppointmentsAction {
    /// List appointments, soonest first
    List,
    /// Create an appointment
    Create {
        /// Customer record ID
        #[arg(short, long)]
        customer: String,

        /// Appointment title
        #[arg(short, long)]
        title: String,

        /// When (RFC 3339, e.g. 2026-08-12T09:00:00Z)
        #[arg(short, long)]
        at: DateTime<Utc>,

        /// Location
        #[arg(short, long)]
        location: Option<String>,

        /// Duration in minutes
        #[arg(short, long)]
        duration: Option<i32>,
    },
    /// Delete an appointment
    Delete {
        /// Appointment record ID
        id: String,
    },
}

pub async fn run(
    ctx: &Context,
    action: AppointmentsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut appointments = AppointmentsResource::new(ctx.store.clone(), ctx.actor);

    match action {
        AppointmentsAction::List => {
            for appointment in appointments.list().await {
                let customer = appointment
                    .customer
                    .as_ref()
                    .map_or_else(|| appointment.customer_id.to_string(), |c| c.name.clone());
                println!(
                    "{}  {}  {:<10}  {} ({customer})",
                    appointment.id,
                    appointment.scheduled_at.format("%Y-%m-%d %H:%M"),
                    appointment.status,
                    appointment.title
                );
            }
        }
        AppointmentsAction::Create {
            customer,
            title,
            at,
            location,
            duration,
        } => {
            let draft = AppointmentDraft {
                location,
                duration_minutes: duration,
                ..AppointmentDraft::new(CustomerId::new(customer), title, at)
            };
            let appointment = appointments.create(draft).await?;
            println!("created {} ({})", appointment.title, appointment.id);
        }
        AppointmentsAction::Delete { id } => {
            appointments.delete(&AppointmentId::new(id)).await?;
            println!("deleted");
        }
    }

    Ok(())
}
