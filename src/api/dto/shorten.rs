//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::CreateShortUrl;

/// Request to shorten a URL.
///
/// Optional fields may be omitted or sent as empty strings.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The URL to shorten. A missing scheme is treated as `https://`.
    #[validate(length(min = 1, message = "long_url is required"))]
    pub long_url: String,

    /// Optional custom short key (3-20 characters of `A-Za-z0-9_-`).
    #[serde(default)]
    pub custom_key: Option<String>,

    /// Optional passkey required to resolve the link.
    #[serde(default)]
    pub passkey: Option<String>,

    /// Optional lifetime such as `"90s"`, `"1h30m"` or `"720h"`.
    #[serde(default)]
    pub expires_in: Option<String>,
}

impl From<ShortenRequest> for CreateShortUrl {
    fn from(req: ShortenRequest) -> Self {
        CreateShortUrl {
            long_url: req.long_url,
            custom_key: req.custom_key,
            passkey: req.passkey,
            expires_in: req.expires_in,
        }
    }
}

/// Created short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_key: String,
    pub short_url: String,
    pub long_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}
