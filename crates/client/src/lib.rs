//! Fieldwork client library.
//!
//! A typed Rust client for the hosted CRM backend: tabular storage behind a
//! PostgREST interface, an auth service for identity, and remote procedures
//! for human-readable sequence numbers.
//!
//! # Architecture
//!
//! - The backend is the source of truth - NO local persistence, direct API
//!   calls only
//! - One generic [`resource::Resource`] per entity pairs an in-memory list
//!   with create/update/delete operations; every mutation is followed by an
//!   unconditional full refetch
//! - Identity is explicit: the actor ID from [`auth::Session`] is passed to
//!   each resource at construction, never read from global state
//!
//! # Example
//!
//! ```rust,ignore
//! use fieldwork_client::auth::AuthClient;
//! use fieldwork_client::config::SupabaseConfig;
//! use fieldwork_client::entities::jobs::{JobDraft, JobsResource};
//! use fieldwork_client::store::supabase::SupabaseStore;
//!
//! let config = SupabaseConfig::from_env()?;
//! let session = AuthClient::new(&config).sign_in(&email, &password).await?;
//! let store = SupabaseStore::new(&config).authorized(&session);
//!
//! let mut jobs = JobsResource::new(store, session.actor());
//! jobs.list().await;
//! let job = jobs.create(JobDraft::new(customer_id, "Plumbing Repair")).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod entities;
pub mod error;
pub mod resource;
pub mod stats;
pub mod store;

pub use error::StoreError;
pub use resource::Resource;
