//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::errors::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistent store of short links, addressed by short key.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Finds a link by key, active or not.
    ///
    /// Callers decide what an inactive record means; key-availability checks
    /// must treat revoked links as taken.
    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortLink>, StoreError>;

    /// Inserts a new active link with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if the key is already taken.
    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError>;

    /// Adds one click to an active link.
    ///
    /// Returns the number of rows affected.
    async fn increment_clicks(&self, short_key: &str) -> Result<u64, StoreError>;

    /// Marks a link as revoked, whatever its expiry.
    ///
    /// Returns the number of rows affected; `0` means the key is unknown.
    async fn deactivate(&self, short_key: &str) -> Result<u64, StoreError>;

    /// Revokes every active link whose expiry lies before `now`.
    ///
    /// Returns the number of links revoked.
    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError>;

    /// Counts links, optionally only the active ones.
    async fn count(&self, active_only: bool) -> Result<i64, StoreError>;
}
