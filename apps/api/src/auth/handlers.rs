use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::github::{ExternalProfile, OAuthError};
use crate::errors::AppError;
use crate::extract::ApiQuery;
use crate::state::AppState;

/// Query string of the OAuth callback. The code arrives as `accessToken`, or
/// as `code` straight from GitHub's redirect.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalSignupQuery {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

impl ExternalSignupQuery {
    fn oauth_code(&self) -> Option<&str> {
        [self.access_token.as_deref(), self.code.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|c| !c.is_empty())
    }
}

fn into_app_error(step: &str, e: OAuthError) -> AppError {
    match e {
        OAuthError::Rejected(msg) => AppError::Unauthorized(format!("{step}: {msg}")),
        OAuthError::Transport(msg) => AppError::UpstreamTransport(format!("{step}: {msg}")),
        OAuthError::Parse(msg) => AppError::UpstreamParse(format!("{step}: {msg}")),
    }
}

/// GET /external-signup
///
/// Code → token → profile. The second call only happens once the first has
/// produced a token.
pub async fn handle_external_signup(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ExternalSignupQuery>,
) -> Result<Json<ExternalProfile>, AppError> {
    if let Some(provider) = query.provider.as_deref() {
        if !provider.eq_ignore_ascii_case("github") {
            return Err(AppError::Validation(format!(
                "Unsupported provider '{provider}'"
            )));
        }
    }

    let code = query
        .oauth_code()
        .ok_or_else(|| AppError::Validation("Missing OAuth code".to_string()))?;

    let token = state
        .oauth
        .exchange_code(code)
        .await
        .map_err(|e| into_app_error("token exchange", e))?;

    let user = state
        .oauth
        .fetch_profile(&token)
        .await
        .map_err(|e| into_app_error("profile fetch", e))?;

    info!("GitHub login for {}", user.login);

    Ok(Json(ExternalProfile::from(user)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::auth::github::{GithubUser, OAuthError};
    use crate::test_support::{get, StubOAuth, TestApp};

    fn octocat() -> GithubUser {
        GithubUser {
            login: "octocat".to_string(),
            name: Some("Mona Lisa".to_string()),
            email: Some("mona@example.com".to_string()),
            avatar_url: Some("https://avatars.example/octocat".to_string()),
        }
    }

    fn happy_oauth() -> StubOAuth {
        StubOAuth::new(
            |code| {
                assert_eq!(code, "abc123");
                Ok("gho_token".to_string())
            },
            |token| {
                assert_eq!(token, "gho_token");
                Ok(octocat())
            },
        )
    }

    #[tokio::test]
    async fn test_code_is_exchanged_for_projected_profile() {
        let app = TestApp::with_oauth(happy_oauth());

        let (status, body) = app.send(get("/external-signup?accessToken=abc123")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "name": "Mona Lisa",
                "email": "mona@example.com",
                "avatar": "https://avatars.example/octocat",
                "githubUsername": "octocat"
            })
        );
        assert_eq!(app.oauth.exchange_calls(), 1);
        assert_eq!(app.oauth.profile_calls(), 1);
    }

    #[tokio::test]
    async fn test_frontend_code_param_is_accepted() {
        let app = TestApp::with_oauth(happy_oauth());

        let (status, body) = app
            .send(get("/external-signup?app=1713987&code=abc123&provider=github"))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["githubUsername"], "octocat");
    }

    #[tokio::test]
    async fn test_missing_code_is_400_without_network() {
        let app = TestApp::with_oauth(happy_oauth());

        for uri in ["/external-signup", "/external-signup?accessToken=", "/external-signup?code=%20"] {
            let (status, body) = app.send(get(uri)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
        assert_eq!(app.oauth.exchange_calls(), 0);
        assert_eq!(app.oauth.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_query_is_json_400() {
        let app = TestApp::with_oauth(happy_oauth());

        let (status, body) = app
            .send(get("/external-signup?accessToken=a&accessToken=b"))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["error"].as_str().unwrap().contains("accessToken"));
        assert_eq!(app.oauth.exchange_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_provider_is_400() {
        let app = TestApp::with_oauth(happy_oauth());

        let (status, _) = app
            .send(get("/external-signup?code=abc123&provider=gitlab"))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(app.oauth.exchange_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_access_token_is_401_and_skips_profile() {
        let app = TestApp::with_oauth(StubOAuth::new(
            |_| Err(OAuthError::Rejected("token response has no access_token".to_string())),
            |_| Ok(octocat()),
        ));

        let (status, body) = app.send(get("/external-signup?accessToken=abc123")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
        assert_eq!(app.oauth.exchange_calls(), 1);
        assert_eq!(app.oauth.profile_calls(), 0);
    }

    #[tokio::test]
    async fn test_network_failure_is_500_with_message() {
        let app = TestApp::with_oauth(StubOAuth::new(
            |_| Ok("gho_token".to_string()),
            |_| Err(OAuthError::Transport("dns error".to_string())),
        ));

        let (status, body) = app.send(get("/external-signup?accessToken=abc123")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["details"].as_str().unwrap().contains("dns error"));
    }
}
