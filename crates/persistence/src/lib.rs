//! Persistence layer for the customer directory.
//!
//! This crate contains:
//! - Database connection management and the `Store` handle
//! - Schema initialization
//! - Entity definitions (database row mappings)
//! - Repository implementations for customers, phones and search

pub mod db;
pub mod entities;
pub mod error;
pub mod metrics;
pub mod repositories;
pub mod schema;

pub use db::{DatabaseConfig, Store};
pub use error::StoreError;
