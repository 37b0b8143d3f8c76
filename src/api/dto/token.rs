//! DTOs for API token management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::IssuedToken;
use crate::domain::entities::AuthToken;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTokenRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
}

/// Newly issued token. `token` is shown only in this response.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateTokenResponse {
    pub id: i64,
    pub name: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl From<IssuedToken> for CreateTokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            id: issued.record.id,
            name: issued.record.name,
            token: issued.token,
            created_at: issued.record.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenItem {
    pub id: i64,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl From<AuthToken> for TokenItem {
    fn from(token: AuthToken) -> Self {
        Self {
            id: token.id,
            name: token.name,
            is_active: token.is_active,
            created_at: token.created_at,
            last_used_at: token.last_used_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenListResponse {
    pub tokens: Vec<TokenItem>,
}
