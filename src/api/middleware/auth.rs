//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use tracing::debug;

use crate::{error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Look up the token's HMAC among active tokens
/// 3. Update `last_used_at` (best effort)
/// 4. Store the [`crate::domain::entities::AuthToken`] in request extensions
/// 5. Continue to next middleware/handler
///
/// # Errors
///
/// Returns `401 Unauthorized` with `WWW-Authenticate: Bearer` if the header is
/// missing or malformed, or the token is unknown or revoked.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/auth/tokens", get(list_tokens_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let record = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(record);

    Ok(next.run(req).await)
}

/// Like [`layer`], but never rejects.
///
/// A valid token is attached to the request; a missing, malformed or invalid
/// one lets the request through anonymously.
pub async fn optional_layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let record = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => match st.auth_service.authenticate(&token).await {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "Ignoring invalid bearer token");
                None
            }
        },
        Err(_) => None,
    };

    let mut req = Request::from_parts(parts, body);
    if let Some(record) = record {
        req.extensions_mut().insert(record);
    }

    next.run(req).await
}
