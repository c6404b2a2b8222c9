use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::jwt::JwtKeys;
use crate::error::AppError;

/// Extracts and validates the bearer JWT, returning the user ID.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Auth("Authorization header required".into()))?;

        // Expect "Bearer <token>", scheme case-insensitive
        let token = auth
            .split_once(' ')
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
            .map(|(_, token)| token.trim())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Auth("Invalid authorization header format".into()))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::Auth("Invalid or expired token".into())
        })?;

        Ok(AuthUser(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use axum::http::{header::AUTHORIZATION, Request};

    #[derive(Clone)]
    struct TestState(JwtKeys);

    impl FromRef<TestState> for JwtKeys {
        fn from_ref(state: &TestState) -> Self {
            state.0.clone()
        }
    }

    fn state() -> TestState {
        TestState(JwtKeys::from(&JwtConfig {
            secret: "gate-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: 5,
        }))
    }

    async fn extract(header: Option<&str>) -> Result<AuthUser, AppError> {
        let mut req = Request::builder().uri("/api/accounts");
        if let Some(value) = header {
            req = req.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = req.body(()).unwrap().into_parts();
        let state = state();
        AuthUser::from_request_parts(&mut parts, &state).await
    }

    #[tokio::test]
    async fn accepts_valid_bearer_token() {
        let token = state().0.sign(9, "a@b.co").unwrap();
        let AuthUser(id) = extract(Some(format!("Bearer {token}").as_str())).await.unwrap();
        assert_eq!(id, 9);
    }

    #[tokio::test]
    async fn scheme_is_case_insensitive() {
        let token = state().0.sign(9, "a@b.co").unwrap();
        for scheme in ["bearer", "BEARER", "BeArEr"] {
            let AuthUser(id) = extract(Some(format!("{scheme} {token}").as_str()))
                .await
                .unwrap();
            assert_eq!(id, 9);
        }
    }

    #[tokio::test]
    async fn rejects_scheme_without_token() {
        let err = extract(Some("Bearer ")).await.err().unwrap();
        assert_eq!(err.to_string(), "Invalid authorization header format");
        let err = extract(Some("Bearer")).await.err().unwrap();
        assert_eq!(err.to_string(), "Invalid authorization header format");
    }

    #[tokio::test]
    async fn rejects_missing_header() {
        let err = extract(None).await.err().unwrap();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn rejects_wrong_scheme() {
        let token = state().0.sign(9, "a@b.co").unwrap();
        let err = extract(Some(format!("Basic {token}").as_str())).await.err().unwrap();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn rejects_garbage_token() {
        let err = extract(Some("Bearer not.a.jwt")).await.err().unwrap();
        assert_eq!(err.to_string(), "Invalid or expired token");
    }
}
