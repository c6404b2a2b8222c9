use std::{net::SocketAddr, time::Duration};

use axum::{
    http::{header, request::Parts, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::debug;

use crate::config::ServerConfig;
use crate::state::AppState;
use crate::{accounts, auth, linkedin};

const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.frontend_url);

    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new()
                .merge(auth::router())
                .merge(linkedin::router())
                .merge(accounts::router()),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "LinkedIn Connector API is running",
    }))
}

/// Configured frontend, local dev servers, and Vercel preview deployments.
pub(crate) fn is_allowed_origin(origin: &str, frontend_url: &str) -> bool {
    origin == frontend_url
        || DEV_ORIGINS.contains(&origin)
        || (origin.starts_with("https://") && origin.ends_with(".vercel.app"))
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let frontend_url = frontend_url.trim_end_matches('/').to_string();
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                let Ok(origin) = origin.to_str() else {
                    return false;
                };
                let allowed = is_allowed_origin(origin, &frontend_url);
                if !allowed {
                    debug!(origin, frontend = %frontend_url, "cors: rejected origin");
                }
                allowed
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 3600))
}

pub async fn serve(app: Router, server: &ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
