use chrono::{Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use shorturl::domain::entities::NewShortLink;
use shorturl::domain::errors::StoreError;
use shorturl::domain::repositories::ShortLinkRepository;
use shorturl::infrastructure::persistence::PgShortLinkRepository;

fn new_link(short_key: &str, expires_at: Option<chrono::DateTime<Utc>>) -> NewShortLink {
    NewShortLink {
        short_key: short_key.to_string(),
        long_url: format!("https://example.com/{short_key}"),
        expires_at,
        passkey_hash: None,
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let created = repo.insert(new_link("abc123", None)).await.unwrap();

    assert_eq!(created.short_key, "abc123");
    assert_eq!(created.clicks, 0);
    assert!(created.is_active);
    assert!(created.passkey_hash.is_none());

    let found = repo.find_by_key("abc123").await.unwrap().unwrap();
    assert_eq!(found, created);

    assert!(repo.find_by_key("missing").await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_duplicate_key_is_unique_violation(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("dup001", None)).await.unwrap();
    let result = repo.insert(new_link("dup001", None)).await;

    match result {
        Err(StoreError::UniqueViolation { constraint }) => {
            assert_eq!(constraint.as_deref(), Some("short_links_short_key_key"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_increment_clicks_only_active(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("click1", None)).await.unwrap();

    assert_eq!(repo.increment_clicks("click1").await.unwrap(), 1);
    assert_eq!(repo.increment_clicks("click1").await.unwrap(), 1);
    assert_eq!(repo.find_by_key("click1").await.unwrap().unwrap().clicks, 2);

    repo.deactivate("click1").await.unwrap();
    assert_eq!(repo.increment_clicks("click1").await.unwrap(), 0);
    assert_eq!(repo.increment_clicks("missing").await.unwrap(), 0);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_deactivate_keeps_row(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("gone01", None)).await.unwrap();

    assert_eq!(repo.deactivate("gone01").await.unwrap(), 1);
    assert_eq!(repo.deactivate("unknown").await.unwrap(), 0);

    let link = repo.find_by_key("gone01").await.unwrap().unwrap();
    assert!(!link.is_active);

    // The key stays reserved.
    assert!(repo.insert(new_link("gone01", None)).await.is_err());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_deactivate_expired(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    let now = Utc::now();

    repo.insert(new_link("past01", Some(now - Duration::hours(1))))
        .await
        .unwrap();
    repo.insert(new_link("future", Some(now + Duration::hours(1))))
        .await
        .unwrap();
    repo.insert(new_link("never1", None)).await.unwrap();

    assert_eq!(repo.deactivate_expired(now).await.unwrap(), 1);
    assert_eq!(repo.deactivate_expired(now).await.unwrap(), 0);

    assert!(!repo.find_by_key("past01").await.unwrap().unwrap().is_active);
    assert!(repo.find_by_key("future").await.unwrap().unwrap().is_active);
    assert!(repo.find_by_key("never1").await.unwrap().unwrap().is_active);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_count(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("count1", None)).await.unwrap();
    repo.insert(new_link("count2", None)).await.unwrap();
    repo.deactivate("count2").await.unwrap();

    assert_eq!(repo.count(true).await.unwrap(), 1);
    assert_eq!(repo.count(false).await.unwrap(), 2);
}
