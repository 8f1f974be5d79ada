//! Fieldwork CLI - drive the CRM backend from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # List jobs, newest first
//! fw-cli jobs list
//!
//! # Create a job for a customer
//! fw-cli jobs create --customer c1 --service "Plumbing Repair" --amount 150.00
//!
//! # Move a job along its lifecycle
//! fw-cli jobs set-status <id> "In Progress"
//!
//! # Dashboard summary across jobs, invoices, and quotes
//! fw-cli stats
//! ```
//!
//! Credentials come from the environment: `SUPABASE_URL`,
//! `SUPABASE_ANON_KEY`, `FIELDWORK_EMAIL`, `FIELDWORK_PASSWORD`.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Terminal output is this binary's job
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fw-cli")]
#[command(author, version, about = "Fieldwork CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage jobs
    Jobs {
        #[command(subcommand)]
        action: commands::jobs::JobsAction,
    },
    /// Manage customers
    Customers {
        #[command(subcommand)]
        action: commands::customers::CustomersAction,
    },
    /// Manage quotes
    Quotes {
        #[command(subcommand)]
        action: commands::quotes::QuotesAction,
    },
    /// Manage invoices
    Invoices {
        #[command(subcommand)]
        action: commands::invoices::InvoicesAction,
    },
    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        action: commands::appointments::AppointmentsAction,
    },
    /// Dashboard summary across jobs, invoices, and quotes
    Stats,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = commands::context::Context::sign_in().await?;

    match cli.command {
        Commands::Jobs { action } => commands::jobs::run(&ctx, action).await?,
        Commands::Customers { action } => commands::customers::run(&ctx, action).await?,
        Commands::Quotes { action } => commands::quotes::run(&ctx, action).await?,
        Commands::Invoices { action } => commands::invoices::run(&ctx, action).await?,
        Commands::Appointments { action } => commands::appointments::run(&ctx, action).await?,
        Commands::Stats => commands::stats::run(&ctx).await?,
    }

    Ok(())
}
