//! Fieldwork Core - Shared types library.
//!
//! This crate provides common types used across all Fieldwork components:
//! - `client` - Typed client for the hosted CRM backend
//! - `cli` - Command-line tool exercising the client operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe record IDs, the actor ID,
//!   and per-entity status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
