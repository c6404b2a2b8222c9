use async_trait::async_trait;
use thiserror::Error;

use crate::error::AppError;

pub mod client;
pub mod types;

pub use client::UnipileClient;
pub use types::{classify, ConnectRequest, ProviderReply, Rejection};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider API key is not configured")]
    NotConfigured,
    #[error("failed to call provider API: {0}")]
    Transport(String),
    #[error("failed to read provider response: {0}")]
    Read(String),
    #[error("failed to parse provider response: {0}")]
    Parse(String),
    #[error("{0}")]
    Rejected(Rejection),
}

impl From<ProviderError> for AppError {
    fn from(e: ProviderError) -> Self {
        AppError::Upstream(e.to_string())
    }
}

/// Account-aggregation API. One call, one attempt.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn create_account(&self, req: &ConnectRequest) -> Result<ProviderReply, ProviderError>;
}
