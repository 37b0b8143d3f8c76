//! DTOs for link lookup and revocation endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::ShortLink;

/// Query string accepted by redirect and info lookups.
#[derive(Debug, Default, Deserialize)]
pub struct PasskeyQuery {
    pub passkey: Option<String>,
}

/// Public view of a short link. The passkey hash is never exposed.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkInfoResponse {
    pub short_key: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub is_active: bool,
    pub protected: bool,
}

impl From<ShortLink> for LinkInfoResponse {
    fn from(link: ShortLink) -> Self {
        let protected = link.requires_passkey();
        Self {
            short_key: link.short_key,
            long_url: link.long_url,
            created_at: link.created_at,
            expires_at: link.expires_at,
            clicks: link.clicks,
            is_active: link.is_active,
            protected,
        }
    }
}

/// Plain acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Result of an auto-revoke sweep.
#[derive(Debug, Serialize, Deserialize)]
pub struct AutoRevokeResponse {
    pub message: String,
    pub revoked: u64,
}
