//! Short URL lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::application::errors::LinkError;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{KEY_LENGTH, generate_key_with_length, validate_custom_key};
use crate::utils::db_error::is_unique_violation_on_short_key;
use crate::utils::duration::parse_duration;
use crate::utils::passkey::{hash_passkey, verify_passkey};
use crate::utils::url_normalizer::{normalize_url, validate_url, validate_url_length};

/// TTL of cached key → URL mappings, independent of the link's own expiry.
pub const CACHE_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Lifetime given to links created without `expires_in`.
pub const DEFAULT_EXPIRY_HOURS: i64 = 720;

/// Generation attempts per key length before moving on.
const MAX_KEY_ATTEMPTS: usize = 10;

/// Key length used once [`MAX_KEY_ATTEMPTS`] 6-character keys were taken.
const FALLBACK_KEY_LENGTH: usize = 8;

/// Deployment-level switches applied on creation.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    pub max_url_length: usize,
    pub allow_custom_keys: bool,
}

impl Default for LinkPolicy {
    fn default() -> Self {
        Self {
            max_url_length: 2048,
            allow_custom_keys: true,
        }
    }
}

/// Parameters of a create request.
///
/// Empty strings are treated the same as `None`.
#[derive(Debug, Clone, Default)]
pub struct CreateShortUrl {
    pub long_url: String,
    pub custom_key: Option<String>,
    pub passkey: Option<String>,
    pub expires_in: Option<String>,
}

/// Tracks how many generated keys were tried and at which length.
#[derive(Debug, Default)]
struct KeyAttempts {
    used: usize,
}

impl KeyAttempts {
    fn next_length(&mut self) -> Option<usize> {
        let length = if self.used < MAX_KEY_ATTEMPTS {
            KEY_LENGTH
        } else if self.used < 2 * MAX_KEY_ATTEMPTS {
            FALLBACK_KEY_LENGTH
        } else {
            return None;
        };

        self.used += 1;
        Some(length)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Computes the expiry of a new link.
///
/// Without `expires_in` the link lives [`DEFAULT_EXPIRY_HOURS`]; configured
/// defaults are not consulted.
fn resolve_expiry(
    expires_in: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, LinkError> {
    let lifetime = match expires_in {
        Some(raw) => parse_duration(raw)?,
        None => Duration::hours(DEFAULT_EXPIRY_HOURS),
    };

    now.checked_add_signed(lifetime)
        .ok_or_else(|| LinkError::InvalidDuration("expiry lies too far in the future".to_string()))
}

/// Checks expiry and passkey of an active link.
fn check_access(link: &ShortLink, passkey: Option<&str>, now: DateTime<Utc>) -> Result<(), LinkError> {
    if link.is_expired_at(now) {
        return Err(LinkError::Expired);
    }

    if let Some(hash) = &link.passkey_hash {
        let passkey = passkey.unwrap_or_default();
        if passkey.is_empty() {
            return Err(LinkError::PasskeyRequired);
        }
        if !verify_passkey(passkey, hash)? {
            return Err(LinkError::InvalidPasskey);
        }
    }

    Ok(())
}

/// Creates, resolves and revokes short links.
///
/// The persistent store is the source of truth. The cache only saves the long
/// URL lookup on redirects; activity, expiry and passkey are always checked
/// against the stored record.
pub struct UrlService {
    repository: Arc<dyn ShortLinkRepository>,
    cache: Arc<dyn CacheService>,
    policy: LinkPolicy,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        cache: Arc<dyn CacheService>,
        policy: LinkPolicy,
    ) -> Self {
        Self {
            repository,
            cache,
            policy,
        }
    }

    /// Creates a short link.
    ///
    /// # Key selection
    ///
    /// - A custom key is validated and must not belong to any existing link,
    ///   revoked ones included.
    /// - Otherwise random keys are generated until a free one is found: up to 10
    ///   six-character keys, then up to 10 eight-character keys.
    /// - If the insert still hits the unique index (a concurrent create took the
    ///   key), a custom key fails with [`LinkError::KeyConflict`] and a generated
    ///   key is replaced from the same attempt budget.
    ///
    /// # Errors
    ///
    /// [`LinkError::InvalidUrl`], [`LinkError::InvalidKey`],
    /// [`LinkError::KeyConflict`], [`LinkError::InvalidDuration`],
    /// [`LinkError::ExhaustedKeyspace`], or a store/passkey failure.
    pub async fn create_short_url(&self, request: CreateShortUrl) -> Result<ShortLink, LinkError> {
        validate_url(&request.long_url)?;
        let long_url = normalize_url(&request.long_url);
        validate_url_length(&long_url, self.policy.max_url_length)?;

        let custom_key = non_empty(request.custom_key);
        if let Some(key) = &custom_key {
            validate_custom_key(key)?;
            if !self.policy.allow_custom_keys {
                return Err(LinkError::InvalidKey(
                    "custom keys are disabled".to_string(),
                ));
            }
        }

        let mut attempts = KeyAttempts::default();
        let short_key = match &custom_key {
            Some(key) => {
                if self.repository.find_by_key(key).await?.is_some() {
                    return Err(LinkError::KeyConflict(key.clone()));
                }
                key.clone()
            }
            None => self.next_free_key(&mut attempts).await?,
        };

        let passkey_hash = non_empty(request.passkey)
            .map(|passkey| hash_passkey(&passkey))
            .transpose()?;
        let expires_at = resolve_expiry(non_empty(request.expires_in).as_deref(), Utc::now())?;

        let mut new_link = NewShortLink {
            short_key,
            long_url,
            expires_at: Some(expires_at),
            passkey_hash,
        };

        let link = loop {
            match self.repository.insert(new_link.clone()).await {
                Ok(link) => break link,
                Err(e) if is_unique_violation_on_short_key(&e) => {
                    if custom_key.is_some() {
                        return Err(LinkError::KeyConflict(new_link.short_key));
                    }
                    warn!(short_key = %new_link.short_key, "Generated key taken concurrently, regenerating");
                    new_link.short_key = self.next_free_key(&mut attempts).await?;
                }
                Err(e) => return Err(e.into()),
            }
        };

        if let Err(e) = self
            .cache
            .set_url(&link.short_key, &link.long_url, Some(CACHE_TTL_SECONDS))
            .await
        {
            warn!(short_key = %link.short_key, error = %e, "Failed to cache new link");
        }

        info!(
            short_key = %link.short_key,
            protected = link.requires_passkey(),
            "Short URL created"
        );

        Ok(link)
    }

    /// Resolves a short key to its long URL and counts the click.
    ///
    /// # Errors
    ///
    /// [`LinkError::MissingKey`], [`LinkError::NotFound`] (unknown or revoked),
    /// [`LinkError::Expired`], [`LinkError::PasskeyRequired`],
    /// [`LinkError::InvalidPasskey`], or a store failure.
    pub async fn get_long_url(
        &self,
        short_key: &str,
        passkey: Option<&str>,
    ) -> Result<String, LinkError> {
        let (link, cached_url) = self.resolve(short_key, passkey).await?;
        Ok(cached_url.unwrap_or(link.long_url))
    }

    /// Same checks and click accounting as [`Self::get_long_url`], returning the
    /// whole record instead of redirecting.
    pub async fn get_link_info(
        &self,
        short_key: &str,
        passkey: Option<&str>,
    ) -> Result<ShortLink, LinkError> {
        let (link, _) = self.resolve(short_key, passkey).await?;
        Ok(link)
    }

    async fn resolve(
        &self,
        short_key: &str,
        passkey: Option<&str>,
    ) -> Result<(ShortLink, Option<String>), LinkError> {
        if short_key.is_empty() {
            return Err(LinkError::MissingKey);
        }

        let cached_url = match self.cache.get_url(short_key).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(short_key, error = %e, "Cache read failed, falling back to store");
                None
            }
        };

        let mut link = self
            .repository
            .find_by_key(short_key)
            .await?
            .filter(|link| link.is_active)
            .ok_or(LinkError::NotFound)?;

        check_access(&link, passkey, Utc::now())?;

        match self.repository.increment_clicks(short_key).await {
            Ok(updated) if updated > 0 => link.clicks += 1,
            Ok(_) => debug!(short_key, "Link revoked before its click was recorded"),
            Err(e) => warn!(short_key, error = %e, "Failed to record click"),
        }

        if cached_url.is_none() {
            debug!(short_key, "Backfilling cache");
            if let Err(e) = self
                .cache
                .set_url(short_key, &link.long_url, Some(CACHE_TTL_SECONDS))
                .await
            {
                warn!(short_key, error = %e, "Failed to backfill cache");
            }
        }

        Ok((link, cached_url))
    }

    /// Revokes a link, whatever its expiry, and evicts it from the cache.
    ///
    /// # Errors
    ///
    /// [`LinkError::NotFound`] if no link has this key.
    pub async fn revoke_url(&self, short_key: &str) -> Result<(), LinkError> {
        let affected = self.repository.deactivate(short_key).await?;
        if affected == 0 {
            return Err(LinkError::NotFound);
        }

        if let Err(e) = self.cache.invalidate(short_key).await {
            warn!(short_key, error = %e, "Failed to evict revoked link from cache");
        }

        info!(short_key, "Short URL revoked");
        Ok(())
    }

    /// Revokes every active link whose expiry has passed.
    ///
    /// Cached entries are left alone; lookups re-check the store anyway.
    ///
    /// Returns the number of links revoked.
    pub async fn auto_revoke_expired_urls(&self) -> Result<u64, LinkError> {
        let revoked = self.repository.deactivate_expired(Utc::now()).await?;
        info!(revoked, "Auto-revoke sweep finished");
        Ok(revoked)
    }

    /// Counts active links. Doubles as a store health probe.
    pub async fn count_active_links(&self) -> Result<i64, LinkError> {
        Ok(self.repository.count(true).await?)
    }

    async fn next_free_key(&self, attempts: &mut KeyAttempts) -> Result<String, LinkError> {
        while let Some(length) = attempts.next_length() {
            let candidate = generate_key_with_length(length);

            if self.repository.find_by_key(&candidate).await?.is_none() {
                return Ok(candidate);
            }

            debug!(candidate, "Generated key already taken");
        }

        Err(LinkError::ExhaustedKeyspace {
            attempts: attempts.used,
        })
    }
}
