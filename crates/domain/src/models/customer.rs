//! Customer domain models.

use serde::{Deserialize, Serialize};
use shared::validation::{validate_not_blank, validate_phone_numbers};
use std::fmt;
use validator::Validate;

/// A stored customer.
///
/// The triple (name, surname, e_mail) is unique across all customers. Phones
/// are not loaded with the customer; they are queried on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Customer {
    pub cus_id: i32,
    pub name: String,
    pub surname: String,
    pub e_mail: String,
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID {}: {} {}, e-mail: {}",
            self.cus_id, self.name, self.surname, self.e_mail
        )
    }
}

/// Request payload for creating a customer together with its phones.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct NewCustomer {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Surname must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub surname: String,

    #[validate(length(
        min = 1,
        max = 100,
        message = "E-mail must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub e_mail: String,

    #[serde(default)]
    #[validate(custom(function = "validate_phone_numbers"))]
    pub phones: Vec<String>,
}

impl NewCustomer {
    /// Creates a request without phones.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        e_mail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            surname: surname.into(),
            e_mail: e_mail.into(),
            phones: Vec::new(),
        }
    }

    /// Sets the phones to record for the new customer.
    pub fn with_phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = phones.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial update of a customer.
///
/// Every field is optional; an absent field keeps its stored value. `phones`
/// set to a non-empty list replaces all phones of the customer, while an
/// absent or empty list leaves them untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CustomerUpdate {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Name must be between 1 and 50 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub name: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "Surname must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub surname: Option<String>,

    #[validate(length(
        min = 1,
        max = 100,
        message = "E-mail must be between 1 and 100 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub e_mail: Option<String>,

    #[validate(custom(function = "validate_phone_numbers"))]
    pub phones: Option<Vec<String>>,
}

impl CustomerUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn e_mail(mut self, e_mail: impl Into<String>) -> Self {
        self.e_mail = Some(e_mail.into());
        self
    }

    pub fn phones<I, S>(mut self, phones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phones = Some(phones.into_iter().map(Into::into).collect());
        self
    }

    /// Returns the replacement phone list, if this update replaces phones.
    pub fn replacement_phones(&self) -> Option<&[String]> {
        match &self.phones {
            Some(phones) if !phones.is_empty() => Some(phones),
            _ => None,
        }
    }

    /// Returns true if applying the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.e_mail.is_none()
            && self.replacement_phones().is_none()
    }

    /// Merges the update onto the currently stored customer.
    pub fn apply_to(&self, current: &Customer) -> Customer {
        Customer {
            cus_id: current.cus_id,
            name: self.name.clone().unwrap_or_else(|| current.name.clone()),
            surname: self
                .surname
                .clone()
                .unwrap_or_else(|| current.surname.clone()),
            e_mail: self.e_mail.clone().unwrap_or_else(|| current.e_mail.clone()),
        }
    }
}

/// Search criteria for customers.
///
/// Each provided criterion narrows the result by exact match; criteria
/// combine with AND. A search without criteria matches every customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CustomerSearch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub e_mail: Option<String>,
    /// Matches customers owning at least one phone equal to this number.
    pub phone: Option<String>,
}

impl CustomerSearch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    pub fn e_mail(mut self, e_mail: impl Into<String>) -> Self {
        self.e_mail = Some(e_mail.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Returns true if no criterion is set.
    pub fn is_unfiltered(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.e_mail.is_none()
            && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Customer {
        Customer {
            cus_id: 7,
            name: "John".to_string(),
            surname: "Johnson".to_string(),
            e_mail: "a@b.c".to_string(),
        }
    }

    #[test]
    fn test_customer_display() {
        assert_eq!(stored().to_string(), "ID 7: John Johnson, e-mail: a@b.c");
    }

    #[test]
    fn test_new_customer_validation() {
        let valid = NewCustomer::new("John", "Johnson", "a@b.c").with_phones(["+1", "+2"]);
        assert!(valid.validate().is_ok());
        assert_eq!(valid.phones, vec!["+1".to_string(), "+2".to_string()]);

        let empty_name = NewCustomer::new("", "Johnson", "a@b.c");
        assert!(empty_name.validate().is_err());

        let blank_surname = NewCustomer::new("John", "   ", "a@b.c");
        assert!(blank_surname.validate().is_err());

        let long_name = NewCustomer::new("x".repeat(51), "Johnson", "a@b.c");
        assert!(long_name.validate().is_err());

        let blank_phone = NewCustomer::new("John", "Johnson", "a@b.c").with_phones(["+1", ""]);
        assert!(blank_phone.validate().is_err());
    }

    #[test]
    fn test_new_customer_phones_default_empty() {
        let request: NewCustomer = serde_json::from_str(
            r#"{"name": "Jane", "surname": "Jackson", "e_mail": "d@e.f"}"#,
        )
        .unwrap();
        assert!(request.phones.is_empty());

        // Each request owns its own list
        let mut first = NewCustomer::new("a", "b", "c");
        let second = NewCustomer::new("a", "b", "c");
        first.phones.push("+1".to_string());
        assert!(second.phones.is_empty());
    }

    #[test]
    fn test_update_apply_partial() {
        let update = CustomerUpdate::default().surname("Smith");
        let merged = update.apply_to(&stored());

        assert_eq!(merged.cus_id, 7);
        assert_eq!(merged.name, "John");
        assert_eq!(merged.surname, "Smith");
        assert_eq!(merged.e_mail, "a@b.c");
    }

    #[test]
    fn test_update_apply_all_fields() {
        let update = CustomerUpdate::default()
            .name("Jane")
            .surname("Doe")
            .e_mail("x@y.z");
        let merged = update.apply_to(&stored());

        assert_eq!(merged.name, "Jane");
        assert_eq!(merged.surname, "Doe");
        assert_eq!(merged.e_mail, "x@y.z");
    }

    #[test]
    fn test_update_replacement_phones() {
        assert_eq!(CustomerUpdate::default().replacement_phones(), None);

        let empty = CustomerUpdate::default().phones(Vec::<String>::new());
        assert_eq!(empty.replacement_phones(), None);
        assert!(empty.is_empty());

        let replace = CustomerUpdate::default().phones(["+1", "+2"]);
        assert_eq!(
            replace.replacement_phones(),
            Some(&["+1".to_string(), "+2".to_string()][..])
        );
        assert!(!replace.is_empty());
    }

    #[test]
    fn test_update_validation() {
        assert!(CustomerUpdate::default().validate().is_ok());
        assert!(CustomerUpdate::default().surname("X").validate().is_ok());
        assert!(CustomerUpdate::default().name("").validate().is_err());
        assert!(CustomerUpdate::default().e_mail(" ").validate().is_err());
        assert!(CustomerUpdate::default().phones(["+1", " "]).validate().is_err());
    }

    #[test]
    fn test_search_builder() {
        assert!(CustomerSearch::default().is_unfiltered());

        let search = CustomerSearch::default().name("Jane").phone("+1");
        assert!(!search.is_unfiltered());
        assert_eq!(search.name.as_deref(), Some("Jane"));
        assert_eq!(search.surname, None);
        assert_eq!(search.e_mail, None);
        assert_eq!(search.phone.as_deref(), Some("+1"));
    }
}
