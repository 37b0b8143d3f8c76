#![allow(dead_code)]

//! In-memory implementations of the store and cache traits for tests that
//! run without PostgreSQL or Redis.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use shorturl::application::services::{AuthService, IssuedToken, LinkPolicy, UrlService};
use shorturl::domain::entities::{AuthToken, NewAuthToken, NewShortLink, ShortLink};
use shorturl::domain::errors::StoreError;
use shorturl::domain::repositories::{ShortLinkRepository, TokenRepository};
use shorturl::infrastructure::cache::{CacheError, CacheResult, CacheService};
use shorturl::state::AppState;

pub const TEST_SECRET: &str = "test-signing-secret";

#[derive(Default)]
pub struct InMemoryShortLinkRepository {
    links: Mutex<Vec<ShortLink>>,
    fail: AtomicBool,
}

impl InMemoryShortLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a database error.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(StoreError::Database("connection refused".to_string()));
        }
        Ok(())
    }

    pub fn get(&self, short_key: &str) -> Option<ShortLink> {
        self.links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.short_key == short_key)
            .cloned()
    }

    pub fn all(&self) -> Vec<ShortLink> {
        self.links.lock().unwrap().clone()
    }

    /// Inserts a record directly, bypassing the service.
    pub fn seed(&self, short_key: &str, long_url: &str, expires_at: Option<DateTime<Utc>>) {
        let now = Utc::now();
        let mut links = self.links.lock().unwrap();
        let id = links.len() as i64 + 1;
        links.push(ShortLink {
            id,
            short_key: short_key.to_string(),
            long_url: long_url.to_string(),
            created_at: now,
            updated_at: now,
            expires_at,
            clicks: 0,
            is_active: true,
            passkey_hash: None,
        });
    }

    /// Moves a link's expiry into the past.
    pub fn expire(&self, short_key: &str) {
        let mut links = self.links.lock().unwrap();
        if let Some(link) = links.iter_mut().find(|l| l.short_key == short_key) {
            link.expires_at = Some(Utc::now() - Duration::hours(1));
        }
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryShortLinkRepository {
    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortLink>, StoreError> {
        self.check()?;
        Ok(self.get(short_key))
    }

    async fn insert(&self, new_link: NewShortLink) -> Result<ShortLink, StoreError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.short_key == new_link.short_key) {
            return Err(StoreError::UniqueViolation {
                constraint: Some("short_links_short_key_key".to_string()),
            });
        }

        let now = Utc::now();
        let link = ShortLink {
            id: links.len() as i64 + 1,
            short_key: new_link.short_key,
            long_url: new_link.long_url,
            created_at: now,
            updated_at: now,
            expires_at: new_link.expires_at,
            clicks: 0,
            is_active: true,
            passkey_hash: new_link.passkey_hash,
        };
        links.push(link.clone());
        Ok(link)
    }

    async fn increment_clicks(&self, short_key: &str) -> Result<u64, StoreError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        match links
            .iter_mut()
            .find(|l| l.short_key == short_key && l.is_active)
        {
            Some(link) => {
                link.clicks += 1;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn deactivate(&self, short_key: &str) -> Result<u64, StoreError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.short_key == short_key) {
            Some(link) => {
                link.is_active = false;
                link.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn deactivate_expired(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        let mut revoked = 0;
        for link in links
            .iter_mut()
            .filter(|l| l.is_active && l.expires_at.is_some_and(|at| at < now))
        {
            link.is_active = false;
            link.updated_at = now;
            revoked += 1;
        }
        Ok(revoked)
    }

    async fn count(&self, active_only: bool) -> Result<i64, StoreError> {
        self.check()?;
        let links = self.links.lock().unwrap();
        Ok(links.iter().filter(|l| !active_only || l.is_active).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryTokenRepository {
    tokens: Mutex<Vec<AuthToken>>,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_active_by_hash(&self, token_hash: &str) -> Result<Option<AuthToken>, StoreError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.token_hash == token_hash && t.is_active)
            .cloned())
    }

    async fn touch_last_used(&self, id: i64) -> Result<(), StoreError> {
        if let Some(token) = self.tokens.lock().unwrap().iter_mut().find(|t| t.id == id) {
            token.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create(&self, new_token: NewAuthToken) -> Result<AuthToken, StoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        let now = Utc::now();
        let token = AuthToken {
            id: tokens.len() as i64 + 1,
            name: new_token.name,
            token_hash: new_token.token_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_used_at: None,
        };
        tokens.push(token.clone());
        Ok(token)
    }

    async fn list_active(&self) -> Result<Vec<AuthToken>, StoreError> {
        let mut active: Vec<AuthToken> = self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(active)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<AuthToken>, StoreError> {
        Ok(self
            .tokens
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke(&self, id: i64) -> Result<u64, StoreError> {
        let mut tokens = self.tokens.lock().unwrap();
        match tokens.iter_mut().find(|t| t.id == id && t.is_active) {
            Some(token) => {
                token.is_active = false;
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// Cache fake that records TTLs and can be switched into a failing state.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Option<u64>)>>,
    down: AtomicBool,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn entry(&self, short_key: &str) -> Option<(String, Option<u64>)> {
        self.entries.lock().unwrap().get(short_key).cloned()
    }

    pub fn put(&self, short_key: &str, long_url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(short_key.to_string(), (long_url.to_string(), None));
    }

    fn check(&self) -> CacheResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("cache is down".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        self.check()?;
        Ok(self.entry(short_key).map(|(url, _)| url))
    }

    async fn set_url(
        &self,
        short_key: &str,
        long_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(short_key.to_string(), (long_url.to_string(), ttl_seconds));
        Ok(())
    }

    async fn invalidate(&self, short_key: &str) -> CacheResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(short_key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.down.load(Ordering::SeqCst)
    }
}

/// Services wired to in-memory fakes, with handles for inspection.
pub struct TestContext {
    pub links: Arc<InMemoryShortLinkRepository>,
    pub tokens: Arc<InMemoryTokenRepository>,
    pub cache: Arc<InMemoryCache>,
    pub url_service: Arc<UrlService>,
    pub auth_service: Arc<AuthService>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_policy(LinkPolicy::default())
    }

    pub fn with_policy(policy: LinkPolicy) -> Self {
        let links = Arc::new(InMemoryShortLinkRepository::new());
        let tokens = Arc::new(InMemoryTokenRepository::new());
        let cache = Arc::new(InMemoryCache::new());

        let url_service = Arc::new(UrlService::new(links.clone(), cache.clone(), policy));
        let auth_service = Arc::new(AuthService::new(tokens.clone(), TEST_SECRET.to_string()));

        Self {
            links,
            tokens,
            cache,
            url_service,
            auth_service,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.url_service.clone(),
            self.auth_service.clone(),
            self.cache.clone(),
            "Test Shortener",
        )
    }

    pub async fn issue_token(&self, name: &str) -> IssuedToken {
        self.auth_service.create_token(name).await.unwrap()
    }
}
