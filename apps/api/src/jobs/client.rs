use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::jobs::models::UpstreamJobQuery;

#[derive(Debug, Error)]
pub enum JobSearchError {
    /// DNS, TLS, timeout, connection reset.
    #[error("request to job provider failed: {0}")]
    Transport(String),

    #[error("job provider returned invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<reqwest::Error> for JobSearchError {
    fn from(e: reqwest::Error) -> Self {
        JobSearchError::Transport(e.to_string())
    }
}

/// A job listing search backend. Returns the provider's payload as-is;
/// shaping it is the caller's job.
#[async_trait]
pub trait JobSearchProvider: Send + Sync {
    async fn search(&self, query: &UpstreamJobQuery) -> Result<Value, JobSearchError>;
}

/// Jooble REST client: `POST {base}/{api_key}` with the query as JSON.
#[derive(Clone)]
pub struct JoobleClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl JoobleClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> Result<Self, JobSearchError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

#[async_trait]
impl JobSearchProvider for JoobleClient {
    async fn search(&self, query: &UpstreamJobQuery) -> Result<Value, JobSearchError> {
        let url = format!("{}/{}", self.base_url, self.api_key);

        let response = self.client.post(&url).json(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!("Jooble responded {status} with {} bytes", body.len());

        // Status is not checked: error payloads still go through the `jobs`
        // check so the raw body reaches the caller.
        Ok(serde_json::from_str(&body)?)
    }
}
