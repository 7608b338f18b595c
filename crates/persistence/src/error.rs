//! Store error type and constraint classification.

use thiserror::Error;

/// PostgreSQL SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL SQLSTATE for `foreign_key_violation`.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Failure of a store operation.
///
/// Not-found and duplicate conditions are reported as outcomes and never
/// surface here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Integrity constraint a statement ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

impl ConstraintViolation {
    /// Maps a SQLSTATE code to the constraint class it reports.
    pub fn from_sqlstate(code: &str) -> Option<Self> {
        match code {
            UNIQUE_VIOLATION => Some(ConstraintViolation::Unique),
            FOREIGN_KEY_VIOLATION => Some(ConstraintViolation::ForeignKey),
            _ => None,
        }
    }

    /// Classifies a database error, if it is a constraint violation we recover from.
    pub fn of(err: &sqlx::Error) -> Option<Self> {
        match err {
            sqlx::Error::Database(db_err) => db_err
                .code()
                .and_then(|code| Self::from_sqlstate(code.as_ref())),
            _ => None,
        }
    }
}

pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    ConstraintViolation::of(err) == Some(ConstraintViolation::Unique)
}

pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    ConstraintViolation::of(err) == Some(ConstraintViolation::ForeignKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sqlstate() {
        assert_eq!(
            ConstraintViolation::from_sqlstate("23505"),
            Some(ConstraintViolation::Unique)
        );
        assert_eq!(
            ConstraintViolation::from_sqlstate("23503"),
            Some(ConstraintViolation::ForeignKey)
        );
        // not_null_violation is not recovered from
        assert_eq!(ConstraintViolation::from_sqlstate("23502"), None);
        assert_eq!(ConstraintViolation::from_sqlstate(""), None);
    }

    #[test]
    fn test_non_database_errors_are_unclassified() {
        let err = sqlx::Error::RowNotFound;
        assert_eq!(ConstraintViolation::of(&err), None);
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));

        let err = sqlx::Error::PoolTimedOut;
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn test_store_error_display() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(err.to_string().starts_with("Database error:"));

        let err = StoreError::from(validator::ValidationErrors::new());
        assert!(err.to_string().starts_with("Validation error:"));
    }
}
