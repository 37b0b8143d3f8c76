//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode, header},
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "example.com/some/page",
///   "custom_key": "my-link",   // optional
///   "passkey": "s3cret",       // optional
///   "expires_in": "72h"        // optional, default 720h
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "short_key": "my-link",
///   "short_url": "http://s.example.com/my-link",
///   "long_url": "https://example.com/some/page",
///   "expires_at": "2025-02-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for an invalid URL, key or duration
/// - 409 if the custom key is taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state.url_service.create_short_url(payload.into()).await?;

    let short_url = format!("{}/{}", base_url(&headers), link.short_key);

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_key: link.short_key,
            short_url,
            long_url: link.long_url,
            expires_at: link.expires_at,
        }),
    ))
}

/// Builds the public base URL from the request's `Host` header.
///
/// `X-Forwarded-Proto: https` switches the scheme for deployments behind a
/// TLS-terminating proxy.
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .filter(|proto| proto.eq_ignore_ascii_case("https"))
        .map_or("http", |_| "https");

    format!("{scheme}://{host}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_base_url_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("s.example.com"));

        assert_eq!(base_url(&headers), "http://s.example.com");

        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(base_url(&headers), "https://s.example.com");
    }

    #[test]
    fn test_base_url_without_host() {
        assert_eq!(base_url(&HeaderMap::new()), "http://localhost");
    }
}
