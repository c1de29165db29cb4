//! Transport seam: anything that can turn a URL into a decoded JSON body.

use crate::config::EtlOptions;
use crate::errors::EtlError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

#[async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// `JsonSource` backed by a single shared `reqwest::Client`, so every request of a
/// run goes through the same connection pool.
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(opts: &EtlOptions) -> Result<Self> {
        let mut builder = Client::builder().user_agent(opts.user_agent.clone());
        if let Some(timeout) = opts.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("building HTTP client")?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonSource for HttpSource {
    async fn get_json(&self, url: &str) -> Result<Value> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("GET {}", url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(EtlError::Status { url: url.to_string(), status: status.as_u16() }.into());
        }

        let body = response.bytes().await.with_context(|| format!("reading body of {}", url))?;
        let value: Value = serde_json::from_slice(&body).with_context(|| format!("decoding JSON from {}", url))?;
        Ok(value)
    }
}
