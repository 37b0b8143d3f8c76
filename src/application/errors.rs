//! Errors of the short URL lifecycle.

use crate::domain::errors::StoreError;

/// Failure of a [`crate::application::services::UrlService`] operation.
///
/// Everything except [`LinkError::Store`], [`LinkError::Passkey`] and
/// [`LinkError::ExhaustedKeyspace`] is caused by the caller's input or by the
/// state of the link and is safe to show to clients.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid custom key: {0}")]
    InvalidKey(String),

    #[error("custom key '{0}' already exists")]
    KeyConflict(String),

    #[error("invalid expires_in format: {0}")]
    InvalidDuration(String),

    #[error("short key is required")]
    MissingKey,

    #[error("URL not found")]
    NotFound,

    #[error("URL has expired")]
    Expired,

    #[error("passkey required")]
    PasskeyRequired,

    #[error("invalid passkey")]
    InvalidPasskey,

    #[error("no free short key found after {attempts} attempts")]
    ExhaustedKeyspace { attempts: usize },

    #[error("failed to process passkey: {0}")]
    Passkey(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LinkError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidKey(_) => "invalid_key",
            Self::KeyConflict(_) => "key_conflict",
            Self::InvalidDuration(_) => "invalid_duration",
            Self::MissingKey => "missing_key",
            Self::NotFound => "not_found",
            Self::Expired => "expired",
            Self::PasskeyRequired => "passkey_required",
            Self::InvalidPasskey => "invalid_passkey",
            Self::ExhaustedKeyspace { .. } => "exhausted_keyspace",
            Self::Passkey(_) => "passkey_error",
            Self::Store(_) => "store_error",
        }
    }
}
