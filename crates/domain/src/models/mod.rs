//! Domain models for the customer directory.

pub mod customer;
pub mod outcome;
pub mod phone;

pub use customer::{Customer, CustomerSearch, CustomerUpdate, NewCustomer};
pub use outcome::{
    CustomerAddOutcome, CustomerDeleteOutcome, CustomerUpdateOutcome, PhoneAddOutcome,
    PhoneDeleteOutcome, SearchResult,
};
pub use phone::Phone;
