//! Reported outcomes of repository operations.
//!
//! Expected conditions such as a missing customer or a duplicate record are
//! not errors: they are returned as one of these values and leave the store
//! unchanged.

use serde::Serialize;
use std::fmt;

use super::{Customer, Phone};

/// Outcome of adding a single phone to a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhoneAddOutcome {
    Added(Phone),
    CustomerNotFound { cus_id: i32 },
    Duplicate { cus_id: i32, phone_num: String },
}

impl PhoneAddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, PhoneAddOutcome::Added(_))
    }
}

impl fmt::Display for PhoneAddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneAddOutcome::Added(_) => write!(f, "Customer phone number added successfully."),
            PhoneAddOutcome::CustomerNotFound { cus_id } => {
                write!(f, "There is no customer with ID = {}.", cus_id)
            }
            PhoneAddOutcome::Duplicate { phone_num, .. } => write!(
                f,
                "The phone number \"{}\" is already recorded for the customer.",
                phone_num
            ),
        }
    }
}

/// Outcome of deleting a single phone of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PhoneDeleteOutcome {
    Deleted { cus_id: i32, phone_num: String },
    CustomerNotFound { cus_id: i32 },
    PhoneNotFound { cus_id: i32, phone_num: String },
}

impl fmt::Display for PhoneDeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhoneDeleteOutcome::Deleted { .. } => write!(f, "Phone number deleted successfully."),
            PhoneDeleteOutcome::CustomerNotFound { cus_id } => {
                write!(f, "There is no customer with ID = {}.", cus_id)
            }
            PhoneDeleteOutcome::PhoneNotFound { cus_id, phone_num } => write!(
                f,
                "There is no such phone number as \"{}\" of customer with ID = {}.",
                phone_num, cus_id
            ),
        }
    }
}

/// Outcome of creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CustomerAddOutcome {
    /// The customer was inserted; `phones` holds one outcome per requested phone.
    Added {
        customer: Customer,
        phones: Vec<PhoneAddOutcome>,
    },
    /// A customer with the same name, surname and e-mail already exists.
    Duplicate {
        name: String,
        surname: String,
        e_mail: String,
    },
}

impl CustomerAddOutcome {
    /// Returns the inserted customer, if any.
    pub fn customer(&self) -> Option<&Customer> {
        match self {
            CustomerAddOutcome::Added { customer, .. } => Some(customer),
            CustomerAddOutcome::Duplicate { .. } => None,
        }
    }
}

impl fmt::Display for CustomerAddOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerAddOutcome::Added { .. } => write!(f, "Customer added successfully."),
            CustomerAddOutcome::Duplicate { .. } => write!(
                f,
                "A customer with the same name, surname and e-mail already exists."
            ),
        }
    }
}

/// Outcome of a partial customer update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CustomerUpdateOutcome {
    /// The update was applied. `phones` is set when the phone list was replaced.
    Updated {
        customer: Customer,
        phones: Option<Vec<PhoneAddOutcome>>,
    },
    NotFound { cus_id: i32 },
    /// The new name, surname and e-mail collide with another customer.
    Conflict { cus_id: i32 },
}

impl fmt::Display for CustomerUpdateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerUpdateOutcome::Updated { .. } => write!(f, "Customer data changed."),
            CustomerUpdateOutcome::NotFound { cus_id } => {
                write!(f, "There is no customer with ID = {}.", cus_id)
            }
            CustomerUpdateOutcome::Conflict { cus_id } => write!(
                f,
                "Customer with ID = {} was not changed: another customer has the same name, surname and e-mail.",
                cus_id
            ),
        }
    }
}

/// Outcome of deleting a customer together with its phones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CustomerDeleteOutcome {
    Deleted { cus_id: i32, phones_removed: u64 },
    NotFound { cus_id: i32 },
}

impl fmt::Display for CustomerDeleteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomerDeleteOutcome::Deleted { .. } => write!(f, "Customer deleted successfully."),
            CustomerDeleteOutcome::NotFound { cus_id } => {
                write!(f, "There is no customer with ID = {}.", cus_id)
            }
        }
    }
}

/// Customers matching a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub customers: Vec<Customer>,
}

impl SearchResult {
    pub fn count(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.customers.is_empty() {
            return write!(f, "No customers found.");
        }

        write!(f, "{} customers found:", self.count())?;
        for customer in &self.customers {
            write!(f, "\n{}", customer)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(cus_id: i32, name: &str, surname: &str, e_mail: &str) -> Customer {
        Customer {
            cus_id,
            name: name.to_string(),
            surname: surname.to_string(),
            e_mail: e_mail.to_string(),
        }
    }

    #[test]
    fn test_phone_add_outcome_display() {
        let added = PhoneAddOutcome::Added(Phone {
            phone_id: 1,
            cus_id: 1,
            phone_num: "+1".to_string(),
        });
        assert!(added.is_added());
        assert_eq!(added.to_string(), "Customer phone number added successfully.");

        let missing = PhoneAddOutcome::CustomerNotFound { cus_id: 10 };
        assert!(!missing.is_added());
        assert_eq!(missing.to_string(), "There is no customer with ID = 10.");

        let duplicate = PhoneAddOutcome::Duplicate {
            cus_id: 1,
            phone_num: "+1".to_string(),
        };
        assert_eq!(
            duplicate.to_string(),
            "The phone number \"+1\" is already recorded for the customer."
        );
    }

    #[test]
    fn test_phone_delete_outcome_display() {
        let missing_phone = PhoneDeleteOutcome::PhoneNotFound {
            cus_id: 1,
            phone_num: "123".to_string(),
        };
        assert_eq!(
            missing_phone.to_string(),
            "There is no such phone number as \"123\" of customer with ID = 1."
        );
        assert_eq!(
            PhoneDeleteOutcome::CustomerNotFound { cus_id: 10 }.to_string(),
            "There is no customer with ID = 10."
        );
    }

    #[test]
    fn test_customer_add_outcome_customer() {
        let added = CustomerAddOutcome::Added {
            customer: customer(1, "John", "Johnson", "a@b.c"),
            phones: vec![],
        };
        assert_eq!(added.customer().map(|c| c.cus_id), Some(1));

        let duplicate = CustomerAddOutcome::Duplicate {
            name: "John".to_string(),
            surname: "Johnson".to_string(),
            e_mail: "a@b.c".to_string(),
        };
        assert!(duplicate.customer().is_none());
        assert!(duplicate.to_string().contains("already exists"));
    }

    #[test]
    fn test_search_result_display_empty() {
        let result = SearchResult::default();
        assert!(result.is_empty());
        assert_eq!(result.to_string(), "No customers found.");
    }

    #[test]
    fn test_search_result_display_rows() {
        let result = SearchResult {
            customers: vec![
                customer(3, "Jane", "Jackson", "d@e.f"),
                customer(4, "Jane", "Robinson", "g@h.i"),
            ],
        };
        assert_eq!(result.count(), 2);
        assert_eq!(
            result.to_string(),
            "2 customers found:\nID 3: Jane Jackson, e-mail: d@e.f\nID 4: Jane Robinson, e-mail: g@h.i"
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = CustomerDeleteOutcome::Deleted {
            cus_id: 2,
            phones_removed: 3,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "deleted");
        assert_eq!(json["cus_id"], 2);
        assert_eq!(json["phones_removed"], 3);
    }
}
