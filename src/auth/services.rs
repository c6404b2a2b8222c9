use axum::extract::FromRef;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, warn};

use super::{
    dto::{AuthResponse, PublicUser},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::User,
};
use crate::{
    db::is_unique_violation,
    error::{AppError, AppResult},
    state::AppState,
};

pub const MIN_PASSWORD_LEN: usize = 6;
const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn issue(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let keys = JwtKeys::from_ref(state);
    let token = keys.sign(user.id, &user.email).map_err(|e| {
        error!(error = %e, user_id = user.id, "jwt sign failed");
        AppError::Internal("Failed to generate token".into())
    })?;
    Ok(AuthResponse {
        token,
        user: PublicUser {
            id: user.id,
            email: user.email,
        },
    })
}

pub async fn register(state: &AppState, email: &str, password: &str) -> AppResult<AuthResponse> {
    let email = normalize_email(email);

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    // Fast path only; the unique index below is what actually decides.
    match User::find_by_email(&state.db, &email).await {
        Ok(Some(_)) => {
            warn!(email = %email, "email already registered");
            return Err(AppError::Conflict("User already exists".into()));
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::Internal("Failed to create user".into()));
        }
    }

    let hash = hash_password(password).map_err(|e| {
        error!(error = %e, "hash_password failed");
        AppError::Internal("Failed to hash password".into())
    })?;

    let user = match User::create(&state.db, &email, &hash).await {
        Ok(u) => u,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %email, "email registered concurrently");
            return Err(AppError::Conflict("User already exists".into()));
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(AppError::Internal("Failed to create user".into()));
        }
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    issue(state, user)
}

pub async fn login(state: &AppState, email: &str, password: &str) -> AppResult<AuthResponse> {
    let email = normalize_email(email);

    let user = match User::find_by_email(&state.db, &email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!(email = %email, "login unknown email");
            return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
        }
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AppError::Internal("Failed to log in".into()));
        }
    };

    let ok = verify_password(password, &user.password_hash).map_err(|e| {
        error!(error = %e, user_id = user.id, "verify_password failed");
        AppError::Internal("Failed to log in".into())
    })?;

    if !ok {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AppError::Auth(INVALID_CREDENTIALS.into()));
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    issue(state, user)
}
