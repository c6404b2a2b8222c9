use crate::config::AppConfig;
use crate::db;
use crate::provider::{ProviderClient, UnipileClient};
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub provider: Arc<dyn ProviderClient>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = db::connect(&config.database_url).await?;
        db::migrate(&db).await?;

        let provider = Arc::new(UnipileClient::new(&config.provider)?) as Arc<dyn ProviderClient>;

        Ok(Self::from_parts(db, config, provider))
    }

    pub fn from_parts(
        db: SqlitePool,
        config: Arc<AppConfig>,
        provider: Arc<dyn ProviderClient>,
    ) -> Self {
        Self {
            db,
            config,
            provider,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Isolated state over a fresh in-memory database.
    pub async fn fake_with(provider: Arc<dyn ProviderClient>) -> Self {
        use crate::config::{JwtConfig, ProviderConfig, ServerConfig};

        let db = db::connect_in_memory().await.expect("in-memory db");
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
            },
            provider: ProviderConfig {
                api_key: "fake".into(),
                api_url: "http://fake.local".into(),
                timeout_secs: 1,
                retry_attempts: 0,
                retry_delay_ms: 0,
            },
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
                frontend_url: "http://localhost:5173".into(),
            },
        });
        Self::from_parts(db, config, provider)
    }

    pub async fn fake() -> Self {
        use crate::provider::fake::StaticProvider;
        Self::fake_with(StaticProvider::replying(500, serde_json::json!({}))).await
    }
}
