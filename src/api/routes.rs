//! API route configuration.
//!
//! URL routes are guarded by [`crate::api::middleware::auth::layer`] or
//! [`crate::api::middleware::auth::optional_layer`], depending on
//! configuration. Token routes always require a valid token.

use crate::api::handlers::{
    auto_revoke_handler, create_token_handler, link_info_handler, list_tokens_handler,
    revoke_link_handler, revoke_token_handler, shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Short link management routes.
///
/// # Endpoints
///
/// - `POST   /shorten`      - Create a short link
/// - `GET    /info/{key}`   - Link details without redirecting
/// - `DELETE /urls/{key}`   - Revoke a link
/// - `POST   /auto-revoke`  - Revoke all expired links
pub fn url_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/info/{key}", get(link_info_handler))
        .route("/urls/{key}", delete(revoke_link_handler))
        .route("/auto-revoke", post(auto_revoke_handler))
}

/// API token management routes.
///
/// # Endpoints
///
/// - `POST   /auth/tokens`      - Issue a token
/// - `GET    /auth/tokens`      - List active tokens
/// - `DELETE /auth/tokens/{id}` - Revoke a token
pub fn token_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/tokens",
            post(create_token_handler).get(list_tokens_handler),
        )
        .route("/auth/tokens/{id}", delete(revoke_token_handler))
}
