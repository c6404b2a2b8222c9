use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, error, instrument, warn};

use super::{
    types::{ConnectRequest, ConnectResponse, ProviderReply},
    ProviderClient, ProviderError,
};
use crate::config::ProviderConfig;

const API_KEY_HEADER: &str = "X-API-KEY";

/// reqwest-backed client for the Unipile REST API.
#[derive(Clone)]
pub struct UnipileClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
}

impl UnipileClient {
    pub fn new(cfg: &ProviderConfig) -> anyhow::Result<Self> {
        // Transport defaults only; the timeout and retry settings are not applied.
        let http = reqwest::Client::builder()
            .build()
            .context("build provider http client")?;
        debug!(
            api_url = %cfg.api_url,
            timeout_secs = cfg.timeout_secs,
            retry_attempts = cfg.retry_attempts,
            retry_delay_ms = cfg.retry_delay_ms,
            "provider client ready (single attempt, default transport timeout)"
        );
        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            api_url: cfg.api_url.trim_end_matches('/').to_string(),
        })
    }

    fn accounts_url(&self) -> String {
        format!("{}/accounts", self.api_url)
    }
}

#[async_trait]
impl ProviderClient for UnipileClient {
    #[instrument(skip_all, fields(kind = req.kind()))]
    async fn create_account(&self, req: &ConnectRequest) -> Result<ProviderReply, ProviderError> {
        if self.api_key.is_empty() {
            error!("provider API key is not configured");
            return Err(ProviderError::NotConfigured);
        }

        let url = self.accounts_url();
        debug!(%url, "calling provider");

        let res = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(req)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "provider request failed");
                ProviderError::Transport(e.to_string())
            })?;

        let status = res.status().as_u16();
        let bytes = res.bytes().await.map_err(|e| {
            error!(error = %e, status, "reading provider response failed");
            ProviderError::Read(e.to_string())
        })?;

        // Error replies share the success shape, so parse whatever the status.
        let body = serde_json::from_slice::<ConnectResponse>(&bytes).map_err(|e| {
            warn!(error = %e, status, "provider response is not valid JSON");
            ProviderError::Parse(e.to_string())
        })?;

        debug!(status, has_account_id = body.account_id.is_some(), "provider replied");
        Ok(ProviderReply { status, body })
    }
}
