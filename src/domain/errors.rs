//! Errors reported by persistent store adapters.

/// Failure of a repository operation.
///
/// Unique-constraint violations are kept apart from every other database
/// failure because the lifecycle service reacts to them (regenerating a key or
/// reporting a conflict) instead of bubbling them up as internal errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violation{}", constraint.as_deref().map(|c| format!(" on {c}")).unwrap_or_default())]
    UniqueViolation { constraint: Option<String> },

    #[error("database error: {0}")]
    Database(String),
}

impl StoreError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }
}
