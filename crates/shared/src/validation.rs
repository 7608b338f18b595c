//! Common validation utilities.

use std::borrow::Cow;

use validator::ValidationError;

/// Maximum length of a customer's first name.
pub const MAX_NAME_LENGTH: usize = 50;

/// Maximum length of a customer's surname.
pub const MAX_SURNAME_LENGTH: usize = 100;

/// Maximum length of a customer's e-mail address.
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Maximum length of a phone number.
pub const MAX_PHONE_LENGTH: usize = 100;

/// Validates that a string carries at least one non-whitespace character.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed("Value must not be blank")));
    }
    Ok(())
}

/// Validates a single phone number: non-blank and within the column width.
pub fn validate_phone_number(phone: &str) -> Result<(), ValidationError> {
    validate_not_blank(phone).map_err(|_| {
        ValidationError::new("phone_blank")
            .with_message(Cow::Borrowed("Phone number must not be blank"))
    })?;

    if phone.chars().count() > MAX_PHONE_LENGTH {
        return Err(ValidationError::new("phone_length").with_message(Cow::Owned(format!(
            "Phone number must be at most {} characters",
            MAX_PHONE_LENGTH
        ))));
    }

    Ok(())
}

/// Validates every phone number in a list.
pub fn validate_phone_numbers(phones: &[String]) -> Result<(), ValidationError> {
    phones.iter().try_for_each(|p| validate_phone_number(p))
}
