//! PostgreSQL implementation of token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AuthToken, NewAuthToken};
use crate::domain::errors::StoreError;
use crate::domain::repositories::TokenRepository;

#[derive(sqlx::FromRow)]
struct AuthTokenRow {
    id: i64,
    name: String,
    token_hash: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
}

impl From<AuthTokenRow> for AuthToken {
    fn from(row: AuthTokenRow) -> Self {
        AuthToken {
            id: row.id,
            name: row.name,
            token_hash: row.token_hash,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            last_used_at: row.last_used_at,
        }
    }
}

/// PostgreSQL repository for API token storage and validation.
///
/// Stores HMAC-hashed tokens. Raw tokens are never persisted.
pub struct PgTokenRepository {
    pool: Arc<PgPool>,
}

impl PgTokenRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, StoreError> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            r#"
            SELECT id, name, token_hash, is_active, created_at, updated_at, last_used_at
            FROM auth_tokens
            WHERE token_hash = $1
              AND is_active
            "#,
        )
        .bind(token_hash)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(AuthToken::from))
    }

    async fn touch_last_used(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE auth_tokens
            SET last_used_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn create(&self, new_token: NewAuthToken) -> Result<AuthToken, StoreError> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            r#"
            INSERT INTO auth_tokens (name, token_hash)
            VALUES ($1, $2)
            RETURNING id, name, token_hash, is_active, created_at, updated_at, last_used_at
            "#,
        )
        .bind(&new_token.name)
        .bind(&new_token.token_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn list_active(&self) -> Result<Vec<AuthToken>, StoreError> {
        let rows = sqlx::query_as::<_, AuthTokenRow>(
            r#"
            SELECT id, name, token_hash, is_active, created_at, updated_at, last_used_at
            FROM auth_tokens
            WHERE is_active
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(AuthToken::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<AuthToken>, StoreError> {
        let row = sqlx::query_as::<_, AuthTokenRow>(
            r#"
            SELECT id, name, token_hash, is_active, created_at, updated_at, last_used_at
            FROM auth_tokens
            WHERE name = $1
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(AuthToken::from))
    }

    async fn revoke(&self, id: i64) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE auth_tokens
            SET is_active = FALSE, updated_at = NOW()
            WHERE id = $1 AND is_active
            "#,
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }
}
