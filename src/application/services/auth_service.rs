//! Authentication service for API token validation and management.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::{AuthToken, NewAuthToken};
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// A freshly issued token. `token` is the only copy of the raw value.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub record: AuthToken,
}

/// Generates a random 48-character alphanumeric token.
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            TOKEN_CHARSET[idx] as char
        })
        .collect()
}

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. An attacker with read-only access to the database cannot verify
/// or forge tokens without the server-side secret.
pub struct AuthService {
    repository: Arc<dyn TokenRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<dyn TokenRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> String {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a raw token against stored credentials.
    ///
    /// On success the token's `last_used_at` is updated; a failure to do so is
    /// logged and does not reject the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked,
    /// [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<AuthToken, AppError> {
        let token_hash = self.hash_token(token);

        let Some(record) = self.repository.find_active_by_hash(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.touch_last_used(record.id).await {
            warn!(token_id = record.id, error = %e, "Failed to update token last_used_at");
        }

        Ok(record)
    }

    /// Issues a new token under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `name` is blank.
    pub async fn create_token(&self, name: &str) -> Result<IssuedToken, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Token name must not be empty",
                json!({"field": "name"}),
            ));
        }

        let token = generate_token();
        let record = self
            .repository
            .create(NewAuthToken {
                name: name.to_string(),
                token_hash: self.hash_token(&token),
            })
            .await?;

        info!(token_id = record.id, name = %record.name, "API token created");

        Ok(IssuedToken { token, record })
    }

    /// Lists active tokens, newest first.
    pub async fn list_tokens(&self) -> Result<Vec<AuthToken>, AppError> {
        Ok(self.repository.list_active().await?)
    }

    /// Finds a token by its name.
    pub async fn find_token_by_name(&self, name: &str) -> Result<Option<AuthToken>, AppError> {
        Ok(self.repository.find_by_name(name).await?)
    }

    /// Revokes an active token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active token has this id.
    pub async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let affected = self.repository.revoke(id).await?;

        if affected == 0 {
            return Err(AppError::not_found(
                "Token not found",
                json!({"id": id}),
            ));
        }

        info!(token_id = id, "API token revoked");
        Ok(())
    }
}
