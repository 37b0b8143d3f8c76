//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::errors::StoreError;
use crate::domain::repositories::ShortLinkRepository;

const SHORT_LINK_COLUMNS: &str = "id, short_key, long_url, created_at, updated_at, expires_at, \
     clicks, is_active, passkey_hash";

#[derive(sqlx::FromRow)]
struct ShortLinkRow {
    id: i64,
    short_key: String,
    long_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
    clicks: i64,
    is_active: bool,
    passkey_hash: Option<String>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            short_key: row.short_key,
            long_url: row.long_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
            expires_at: row.expires_at,
            clicks: row.clicks,
            is_active: row.is_active,
            passkey_hash: row.passkey_hash,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// Uniqueness of `short_key` is enforced by the `short_links_short_key_key`
/// constraint; click counts are incremented in SQL.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortLink>, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            "SELECT {SHORT_LINK_COLUMNS} FROM short_links WHERE short_key = $1"
        ))
        .bind(short_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortLink::from))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(&format!(
            r#"
            INSERT INTO short_links (short_key, long_url, expires_at, passkey_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING {SHORT_LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.short_key)
        .bind(&new_link.long_url)
        .bind(new_link.expires_at)
        .bind(&new_link.passkey_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn increment_clicks(&self, short_key: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE short_links
            SET clicks = clicks + 1
            WHERE short_key = $1 AND is_active
            "#,
        )
        .bind(short_key)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn deactivate(&self, short_key: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE short_links
            SET is_active = FALSE, updated_at = NOW()
            WHERE short_key = $1
            "#,
        )
        .bind(short_key)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE short_links
            SET is_active = FALSE, updated_at = NOW()
            WHERE is_active
              AND expires_at IS NOT NULL
              AND expires_at < $1
            "#,
        )
        .bind(now)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self, active_only: bool) -> Result<i64, StoreError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE is_active OR NOT $1")
                .bind(active_only)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(count)
    }
}
