//! Repository implementations for database operations.

pub mod customer;
pub mod phone;
pub mod search;

pub use customer::CustomerRepository;
pub use phone::PhoneRepository;
pub use search::CustomerSearchRepository;
