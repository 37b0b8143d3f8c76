//! AuthToken entity for bearer authentication.

use chrono::{DateTime, Utc};

/// A bearer token record.
///
/// Only the HMAC of the raw token is stored; the raw value is returned once,
/// when the token is issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub id: i64,
    pub name: String,
    pub token_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Input data for inserting a new token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthToken {
    pub name: String,
    pub token_hash: String,
}
