//! Repository trait for bearer token authentication.

use crate::domain::entities::{AuthToken, NewAuthToken};
use crate::domain::errors::StoreError;
use async_trait::async_trait;

/// Repository interface for API token management.
///
/// Tokens are addressed by their HMAC hash; the raw value never reaches the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Finds an active token by hash.
    async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, StoreError>;

    /// Updates the `last_used_at` timestamp for a token.
    async fn touch_last_used(&self, id: i64) -> Result<(), StoreError>;

    /// Stores a new active token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the hash already exists.
    async fn create(&self, new_token: NewAuthToken) -> Result<AuthToken, StoreError>;

    /// Lists active tokens, newest first.
    async fn list_active(&self) -> Result<Vec<AuthToken>, StoreError>;

    /// Finds a token by name (first match, newest first).
    async fn find_by_name(&self, name: &str) -> Result<Option<AuthToken>, StoreError>;

    /// Revokes a token.
    ///
    /// Returns the number of rows affected; `0` means unknown or already revoked.
    async fn revoke(&self, id: i64) -> Result<u64, StoreError>;
}
