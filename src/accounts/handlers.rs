use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use super::{
    dto::{AccountsResponse, MessageResponse},
    repo::LinkedAccount,
};
use crate::{
    auth::AuthUser,
    error::{AppError, AppResult},
    state::AppState,
};

pub fn accounts_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/:id", delete(delete_account))
}

#[instrument(skip(state))]
pub async fn list_accounts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<AccountsResponse>> {
    let accounts = LinkedAccount::list_by_user(&state.db, user_id)
        .await
        .map_err(|e| {
            error!(error = %e, user_id, "list accounts failed");
            AppError::Internal("Failed to fetch accounts".into())
        })?;
    let count = accounts.len();
    Ok(Json(AccountsResponse { accounts, count }))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let not_found = || AppError::NotFound("Account not found".into());
    let internal = |e: anyhow::Error| {
        error!(error = %e, user_id, "delete account failed");
        AppError::Internal("Failed to delete account".into())
    };

    let Ok(id) = id.parse::<i64>() else {
        warn!(user_id, %id, "non-numeric account id");
        return Err(not_found());
    };

    let account = LinkedAccount::find_owned(&state.db, user_id, id)
        .await
        .map_err(internal)?
        .ok_or_else(|| {
            warn!(user_id, id, "account not found or not owned");
            not_found()
        })?;

    if !LinkedAccount::soft_delete(&state.db, user_id, account.id)
        .await
        .map_err(internal)?
    {
        return Err(not_found());
    }

    info!(user_id, id, account_id = %account.account_id, "linked account deleted");
    Ok(Json(MessageResponse {
        message: "Account deleted successfully".into(),
    }))
}
