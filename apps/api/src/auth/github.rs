use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("githired-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum OAuthError {
    /// The provider answered but refused: bad code, revoked token, non-2xx.
    #[error("{0}")]
    Rejected(String),

    #[error("request to OAuth provider failed: {0}")]
    Transport(String),

    #[error("OAuth provider returned an unexpected body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for OAuthError {
    fn from(e: reqwest::Error) -> Self {
        OAuthError::Transport(e.to_string())
    }
}

/// The two round-trips of an OAuth login.
#[async_trait]
pub trait OAuthProvider: Send + Sync {
    /// Code → access token.
    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError>;
    /// Access token → authenticated user.
    async fn fetch_profile(&self, access_token: &str) -> Result<GithubUser, OAuthError>;
}

/// The subset of GitHub's `/user` payload we read. Everything else is dropped
/// at deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

/// What the caller gets back. Exactly these four fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProfile {
    pub name: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub github_username: String,
}

impl From<GithubUser> for ExternalProfile {
    fn from(user: GithubUser) -> Self {
        let name = user
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| user.login.clone());
        Self {
            name,
            email: user.email,
            avatar: user.avatar_url,
            github_username: user.login,
        }
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl TokenResponse {
    fn into_token(self) -> Result<String, OAuthError> {
        match self.access_token.filter(|t| !t.is_empty()) {
            Some(token) => Ok(token),
            None => Err(OAuthError::Rejected(
                self.error_description
                    .or(self.error)
                    .unwrap_or_else(|| "token response has no access_token".to_string()),
            )),
        }
    }
}

/// GitHub OAuth app client.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    oauth_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl GithubClient {
    pub fn new(
        oauth_url: String,
        api_url: String,
        client_id: String,
        client_secret: String,
        timeout: Duration,
    ) -> Result<Self, OAuthError> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
            oauth_url: oauth_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            client_id,
            client_secret,
        })
    }
}

#[async_trait]
impl OAuthProvider for GithubClient {
    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        let response = self
            .client
            .post(format!("{}/access_token", self.oauth_url))
            .header("accept", "application/json")
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                code,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OAuthError::Rejected(format!(
                "token endpoint returned {status}"
            )));
        }

        // GitHub reports bad codes with a 200 and an `error` field.
        serde_json::from_str::<TokenResponse>(&body)
            .map_err(|e| OAuthError::Parse(e.to_string()))?
            .into_token()
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<GithubUser, OAuthError> {
        let response = self
            .client
            .get(format!("{}/user", self.api_url))
            .bearer_auth(access_token)
            .header("accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OAuthError::Rejected(format!(
                "user endpoint returned {status}"
            )));
        }

        let user: GithubUser =
            serde_json::from_str(&body).map_err(|e| OAuthError::Parse(e.to_string()))?;
        debug!("Fetched GitHub profile for {}", user.login);
        Ok(user)
    }
}
