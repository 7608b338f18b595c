//! Shared utilities for the customer directory.
//!
//! This crate provides common functionality used across all other crates:
//! - Input validation helpers and column width limits

pub mod validation;
