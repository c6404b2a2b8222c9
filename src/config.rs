use serde::Deserialize;
use tracing::warn;

const DEFAULT_JWT_SECRET: &str = "default-secret-change-in-production";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Settings for the account-aggregation provider (Unipile).
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout_secs: u64,
    // Read for parity with deployments that set them; the connect flow makes a single attempt.
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env_or("DATABASE_URL", "sqlite://linkedin_connector.db?mode=rwc");

        let secret = env_or("JWT_SECRET", "");
        let secret = if secret.is_empty() {
            warn!("JWT_SECRET not set, using insecure default");
            DEFAULT_JWT_SECRET.to_string()
        } else {
            secret
        };
        let jwt = JwtConfig {
            secret,
            issuer: env_or("JWT_ISSUER", "linkedin-connector"),
            audience: env_or("JWT_AUDIENCE", "linkedin-connector-users"),
            ttl_minutes: env_parse("JWT_TTL_MINUTES", 60 * 24),
        };

        let api_key = env_or("UNIPILE_API_KEY", "");
        if api_key.is_empty() {
            warn!("UNIPILE_API_KEY not set, connect requests will fail");
        }
        let provider = ProviderConfig {
            api_key,
            api_url: env_or("UNIPILE_API_URL", "https://api.unipile.com/v1"),
            timeout_secs: env_parse("UNIPILE_TIMEOUT_SECS", 30),
            retry_attempts: env_parse("UNIPILE_RETRY_ATTEMPTS", 3),
            retry_delay_ms: env_parse("UNIPILE_RETRY_DELAY_MS", 1000),
        };

        // PORT is what most hosting platforms inject, so it wins over APP_PORT.
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or_else(|| env_parse("APP_PORT", 8080));
        let server = ServerConfig {
            host: env_or("APP_HOST", "0.0.0.0"),
            port,
            frontend_url: env_or("FRONTEND_URL", "http://localhost:5173"),
        };

        Ok(Self {
            database_url,
            jwt,
            provider,
            server,
        })
    }
}
