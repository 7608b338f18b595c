//! Command line front end for the customer directory.

pub mod commands;
pub mod config;
pub mod demo;
pub mod logging;
pub mod report;
