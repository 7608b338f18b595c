//! Domain layer for the customer directory.
//!
//! This crate contains:
//! - Domain models (Customer, Phone)
//! - Request types for creating, updating and searching customers
//! - Reported outcomes of repository operations

pub mod models;
