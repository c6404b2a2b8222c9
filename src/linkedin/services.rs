use tracing::{error, info, warn};

use super::dto::ConnectResponse;
use crate::{
    accounts::repo::{LinkedAccount, DEFAULT_PROVIDER},
    error::{AppError, AppResult},
    provider::{classify, ConnectRequest, ProviderError},
    state::AppState,
};

pub async fn connect_with_cookie(
    state: &AppState,
    user_id: i64,
    cookie: &str,
) -> AppResult<ConnectResponse> {
    let cookie = cookie.trim();
    if cookie.is_empty() {
        return Err(AppError::Validation("cookie is required".into()));
    }
    connect(state, user_id, ConnectRequest::linkedin_cookie(cookie)).await
}

pub async fn connect_with_credentials(
    state: &AppState,
    user_id: i64,
    username: &str,
    password: &str,
) -> AppResult<ConnectResponse> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::Validation("username is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::Validation("password is required".into()));
    }
    connect(
        state,
        user_id,
        ConnectRequest::linkedin_credentials(username, password),
    )
    .await
}

/// One provider call, then persist the link if the reply classifies as connected.
///
/// If the insert fails the remote account stays linked; nothing is undone on the provider side.
async fn connect(state: &AppState, user_id: i64, req: ConnectRequest) -> AppResult<ConnectResponse> {
    let kind = req.kind();

    let reply = state.provider.create_account(&req).await.map_err(|e| {
        warn!(user_id, kind, error = %e, "provider call failed");
        AppError::from(e)
    })?;

    let identity = classify(&reply).map_err(|rejection| {
        warn!(user_id, kind, status = reply.status, reason = %rejection, "provider rejected connect");
        AppError::from(ProviderError::Rejected(rejection))
    })?;

    let account = LinkedAccount::create(
        &state.db,
        user_id,
        DEFAULT_PROVIDER,
        &identity.account_id,
        &identity.display_name,
    )
    .await
    .map_err(|e| {
        error!(
            error = %e,
            user_id,
            account_id = %identity.account_id,
            "failed to save linked account, remote link left orphaned"
        );
        AppError::Internal("Failed to save account".into())
    })?;

    info!(user_id, kind, id = account.id, account_id = %account.account_id, "linkedin account connected");
    Ok(ConnectResponse {
        message: "LinkedIn account connected successfully".into(),
        account_id: identity.account_id,
        account,
    })
}
