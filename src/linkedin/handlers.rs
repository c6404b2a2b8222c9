use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{ConnectResponse, CookieConnectRequest, CredentialsConnectRequest},
    services,
};
use crate::{auth::AuthUser, error::AppResult, state::AppState};

pub fn linkedin_routes() -> Router<AppState> {
    Router::new()
        .route("/linkedin/connect/cookie", post(connect_with_cookie))
        .route("/linkedin/connect/credentials", post(connect_with_credentials))
}

#[instrument(skip(state, payload))]
pub async fn connect_with_cookie(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CookieConnectRequest>, JsonRejection>,
) -> AppResult<Json<ConnectResponse>> {
    let Json(payload) = payload?;
    let res = services::connect_with_cookie(&state, user_id, &payload.cookie).await?;
    Ok(Json(res))
}

#[instrument(skip(state, payload))]
pub async fn connect_with_credentials(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CredentialsConnectRequest>, JsonRejection>,
) -> AppResult<Json<ConnectResponse>> {
    let Json(payload) = payload?;
    let res =
        services::connect_with_credentials(&state, user_id, &payload.username, &payload.password)
            .await?;
    Ok(Json(res))
}
