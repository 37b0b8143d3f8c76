//! Handler for short URL redirect.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};

use crate::api::dto::link::PasskeyQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its long URL.
///
/// # Endpoint
///
/// `GET /{key}?passkey=...`
///
/// # Request Flow
///
/// 1. Read the long URL from the cache (errors count as a miss)
/// 2. Load the stored record and check activity, expiry and passkey
/// 3. Count the click
/// 4. Backfill the cache on a miss
/// 5. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the key is unknown, revoked or expired, or if the
/// passkey is missing or wrong.
pub async fn redirect_handler(
    Path(key): Path<String>,
    Query(query): Query<PasskeyQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let long_url = state
        .url_service
        .get_long_url(&key, query.passkey.as_deref())
        .await?;

    Ok(Redirect::temporary(&long_url))
}
