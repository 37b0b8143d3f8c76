//! Long URL validation and normalization.
//!
//! Inputs without a scheme are treated as HTTPS. Normalization only adds that
//! prefix; everything else about the URL is stored exactly as submitted.

use url::Url;

use crate::application::errors::LinkError;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Returns true if the input already starts with `http://` or `https://`.
fn has_known_scheme(raw: &str) -> bool {
    raw.starts_with(HTTP_PREFIX) || raw.starts_with(HTTPS_PREFIX)
}

/// Normalizes a long URL to the form that gets persisted.
///
/// Prefixes `https://` when neither known scheme prefix is present and returns
/// the input unchanged otherwise, so applying it twice is a no-op.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com"), "https://example.com");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    if has_known_scheme(raw) {
        raw.to_string()
    } else {
        format!("{HTTPS_PREFIX}{raw}")
    }
}

/// Validates a long URL submitted for shortening.
///
/// The input is parsed in its normalized form, so `example.com/path` is valid.
///
/// # Security
///
/// Only `http` and `https` are accepted. Scheme-confusion payloads such as
/// `javascript:alert(1)` end up as an unparsable `https://javascript:...` and
/// are rejected.
///
/// # Errors
///
/// Returns [`LinkError::InvalidUrl`] if the input is empty or contains control
/// characters, does not parse, has no host, uses another scheme, or has
/// whitespace in the host.
pub fn validate_url(raw: &str) -> Result<(), LinkError> {
    if raw.is_empty() {
        return Err(LinkError::InvalidUrl("URL cannot be empty".to_string()));
    }

    // The parser strips tabs and newlines, but the raw string is what gets stored.
    if raw.chars().any(char::is_control) {
        return Err(LinkError::InvalidUrl(
            "URL cannot contain control characters".to_string(),
        ));
    }

    let parsed = Url::parse(&normalize_url(raw))
        .map_err(|e| LinkError::InvalidUrl(format!("invalid URL format: {e}")))?;

    let host = parsed.host_str().unwrap_or_default();
    if host.is_empty() {
        return Err(LinkError::InvalidUrl(
            "URL must have a valid host".to_string(),
        ));
    }

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LinkError::InvalidUrl(
            "URL must use http or https protocol".to_string(),
        ));
    }

    if host.chars().any(char::is_whitespace) {
        return Err(LinkError::InvalidUrl(
            "host cannot contain spaces".to_string(),
        ));
    }

    Ok(())
}

/// Rejects URLs longer than `max_length` bytes.
///
/// # Errors
///
/// Returns [`LinkError::InvalidUrl`] when the limit is exceeded.
pub fn validate_url_length(raw: &str, max_length: usize) -> Result<(), LinkError> {
    if raw.len() > max_length {
        return Err(LinkError::InvalidUrl(format!(
            "URL exceeds maximum length of {max_length} characters"
        )));
    }

    Ok(())
}
