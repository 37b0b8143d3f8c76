//! Handlers for API token management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::MessageResponse;
use crate::api::dto::token::{CreateTokenRequest, CreateTokenResponse, TokenListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Issues a new API token.
///
/// `POST /api/auth/tokens`
///
/// The raw token appears only in this response; the store keeps its HMAC.
pub async fn create_token_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateTokenRequest>,
) -> Result<(StatusCode, Json<CreateTokenResponse>), AppError> {
    payload.validate()?;

    let issued = state.auth_service.create_token(&payload.name).await?;

    Ok((StatusCode::CREATED, Json(issued.into())))
}

/// Lists active API tokens.
///
/// `GET /api/auth/tokens`
pub async fn list_tokens_handler(
    State(state): State<AppState>,
) -> Result<Json<TokenListResponse>, AppError> {
    let tokens = state.auth_service.list_tokens().await?;

    Ok(Json(TokenListResponse {
        tokens: tokens.into_iter().map(Into::into).collect(),
    }))
}

/// Revokes an API token.
///
/// `DELETE /api/auth/tokens/{id}`
pub async fn revoke_token_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.auth_service.revoke_token(id).await?;

    Ok(Json(MessageResponse {
        message: "Token revoked successfully".to_string(),
    }))
}
