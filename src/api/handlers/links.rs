//! Handlers for link info, revocation and the expiry sweep.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::dto::link::{AutoRevokeResponse, LinkInfoResponse, MessageResponse, PasskeyQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Returns link details without redirecting.
///
/// `GET /api/info/{key}?passkey=...`
///
/// Applies the same checks as the redirect and counts as a click.
pub async fn link_info_handler(
    Path(key): Path<String>,
    Query(query): Query<PasskeyQuery>,
    State(state): State<AppState>,
) -> Result<Json<LinkInfoResponse>, AppError> {
    let link = state
        .url_service
        .get_link_info(&key, query.passkey.as_deref())
        .await?;

    Ok(Json(link.into()))
}

/// Revokes a link.
///
/// `DELETE /api/urls/{key}`
///
/// Revocation is permanent; the key stays reserved.
pub async fn revoke_link_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.url_service.revoke_url(&key).await?;

    Ok(Json(MessageResponse {
        message: "URL revoked successfully".to_string(),
    }))
}

/// Revokes all links whose expiry has passed.
///
/// `POST /api/auto-revoke`
pub async fn auto_revoke_handler(
    State(state): State<AppState>,
) -> Result<Json<AutoRevokeResponse>, AppError> {
    let revoked = state.url_service.auto_revoke_expired_urls().await?;

    Ok(Json(AutoRevokeResponse {
        message: "Auto-revoke completed".to_string(),
        revoked,
    }))
}
