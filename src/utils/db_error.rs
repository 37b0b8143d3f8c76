//! Conversion of `sqlx` failures into store errors.

use crate::domain::errors::StoreError;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error()
            && db_err.is_unique_violation()
        {
            return StoreError::UniqueViolation {
                constraint: db_err.constraint().map(str::to_string),
            };
        }

        StoreError::Database(e.to_string())
    }
}

/// Returns true if the error is a unique violation on the short key index.
pub fn is_unique_violation_on_short_key(e: &StoreError) -> bool {
    match e {
        StoreError::UniqueViolation { constraint } => {
            matches!(constraint.as_deref(), Some("short_links_short_key_key") | None)
        }
        StoreError::Database(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_database_error() {
        let err: StoreError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(!is_unique_violation_on_short_key(&err));
    }

    #[test]
    fn test_short_key_constraint_detected() {
        let err = StoreError::UniqueViolation {
            constraint: Some("short_links_short_key_key".to_string()),
        };
        assert!(is_unique_violation_on_short_key(&err));

        let other = StoreError::UniqueViolation {
            constraint: Some("auth_tokens_token_hash_key".to_string()),
        };
        assert!(!is_unique_violation_on_short_key(&other));
    }
}
