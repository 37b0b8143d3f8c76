//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`      - Health check: DB and cache (public)
//! - `GET  /{key}`       - Short link redirect (public, `?passkey=` for protected links)
//! - `/api/*`            - URL management (bearer token required or optional)
//! - `/api/auth/tokens`  - Token management (bearer token always required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Bearer token
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `require_auth` - when `true`, URL management routes reject requests
///   without a valid bearer token; otherwise a token is optional
pub fn router(state: AppState, require_auth: bool) -> Router {
    let url_routes = if require_auth {
        api::routes::url_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
    } else {
        api::routes::url_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional_layer,
        ))
    };

    let token_routes = api::routes::token_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .route("/{key}", get(redirect_handler))
        .nest("/api", url_routes.merge(token_routes))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application with trailing slashes trimmed before routing.
pub fn app_router(state: AppState, require_auth: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, require_auth))
}
