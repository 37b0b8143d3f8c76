//! ShortLink entity representing a short key mapping.

use chrono::{DateTime, Utc};

/// A persisted short link.
///
/// `is_active = false` means the link was revoked. Revocation is terminal and
/// soft: the row stays in the table and keeps its key reserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub id: i64,
    pub short_key: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub is_active: bool,
    pub passkey_hash: Option<String>,
}

impl ShortLink {
    /// Returns true if the link has an expiry that lies before `now`.
    ///
    /// Expiry is computed on read; an expired link stays active until a revoke
    /// (explicit or via the sweep) flips `is_active`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now > expires_at)
    }

    /// Returns true if lookups must present a passkey.
    pub fn requires_passkey(&self) -> bool {
        self.passkey_hash.is_some()
    }
}

/// Input data for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub short_key: String,
    pub long_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub passkey_hash: Option<String>,
}
