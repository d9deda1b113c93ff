//! Helpers shared by the handler and client tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::auth::github::{GithubUser, OAuthError, OAuthProvider};
use crate::config::Config;
use crate::jobs::client::{JobSearchError, JobSearchProvider};
use crate::jobs::models::UpstreamJobQuery;
use crate::llm_client::{LlmError, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

/// Serves `router` on an ephemeral local port and returns its base URL.
/// Stands in for a third-party API when exercising the real HTTP clients.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Sends one request through `app` and decodes the JSON response body.
pub async fn send_json(app: Router, request: Request<Body>) -> (axum::http::StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

type JobsFn = dyn Fn(&UpstreamJobQuery) -> Result<Value, JobSearchError> + Send + Sync;

pub struct StubJobs {
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<UpstreamJobQuery>>,
    respond: Box<JobsFn>,
}

impl StubJobs {
    pub fn new(
        respond: impl Fn(&UpstreamJobQuery) -> Result<Value, JobSearchError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub fn returning(payload: Value) -> Self {
        Self::new(move |_| Ok(payload.clone()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobSearchProvider for StubJobs {
    async fn search(&self, query: &UpstreamJobQuery) -> Result<Value, JobSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());
        (self.respond)(query)
    }
}

type LlmFn = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;

pub struct StubLlm {
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
    respond: Box<LlmFn>,
}

impl StubLlm {
    pub fn new(respond: impl Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::new(move |_| Ok(text.clone()))
    }

    pub fn failing() -> Self {
        Self::new(|_| {
            Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            })
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for StubLlm {
    async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.respond)(prompt)
    }
}

type ExchangeFn = dyn Fn(&str) -> Result<String, OAuthError> + Send + Sync;
type ProfileFn = dyn Fn(&str) -> Result<GithubUser, OAuthError> + Send + Sync;

pub struct StubOAuth {
    pub exchange_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    exchange: Box<ExchangeFn>,
    profile: Box<ProfileFn>,
}

impl StubOAuth {
    pub fn new(
        exchange: impl Fn(&str) -> Result<String, OAuthError> + Send + Sync + 'static,
        profile: impl Fn(&str) -> Result<GithubUser, OAuthError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            exchange_calls: AtomicUsize::new(0),
            profile_calls: AtomicUsize::new(0),
            exchange: Box::new(exchange),
            profile: Box::new(profile),
        }
    }

    pub fn unused() -> Self {
        Self::new(
            |_| Err(OAuthError::Rejected("not configured".to_string())),
            |_| Err(OAuthError::Rejected("not configured".to_string())),
        )
    }

    pub fn exchange_calls(&self) -> usize {
        self.exchange_calls.load(Ordering::SeqCst)
    }

    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OAuthProvider for StubOAuth {
    async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        self.exchange_calls.fetch_add(1, Ordering::SeqCst);
        (self.exchange)(code)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<GithubUser, OAuthError> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        (self.profile)(access_token)
    }
}

/// A fully wired router over stub providers, with handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub jobs: Arc<StubJobs>,
    pub llm: Arc<StubLlm>,
    pub oauth: Arc<StubOAuth>,
}

impl TestApp {
    pub fn new(jobs: StubJobs, llm: StubLlm, oauth: StubOAuth) -> Self {
        Self::with_config(Config::for_tests("http://127.0.0.1:1"), jobs, llm, oauth)
    }

    pub fn with_config(config: Config, jobs: StubJobs, llm: StubLlm, oauth: StubOAuth) -> Self {
        let jobs = Arc::new(jobs);
        let llm = Arc::new(llm);
        let oauth = Arc::new(oauth);
        let state = AppState {
            config: Arc::new(config),
            jobs: jobs.clone(),
            llm: llm.clone(),
            oauth: oauth.clone(),
        };
        Self {
            router: build_router(state),
            jobs,
            llm,
            oauth,
        }
    }

    pub fn with_jobs(jobs: StubJobs) -> Self {
        Self::new(jobs, StubLlm::failing(), StubOAuth::unused())
    }

    pub fn with_llm(llm: StubLlm) -> Self {
        Self::new(StubJobs::returning(serde_json::json!({ "jobs": [] })), llm, StubOAuth::unused())
    }

    pub fn with_oauth(oauth: StubOAuth) -> Self {
        Self::new(
            StubJobs::returning(serde_json::json!({ "jobs": [] })),
            StubLlm::failing(),
            oauth,
        )
    }

    pub async fn send(&self, request: Request<Body>) -> (axum::http::StatusCode, Value) {
        send_json(self.router.clone(), request).await
    }
}
