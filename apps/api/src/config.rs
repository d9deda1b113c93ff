use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Clone)]
pub struct Config {
    pub jooble_api_key: String,
    pub jooble_api_url: String,
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_model: String,
    pub github_client_id: String,
    pub github_client_secret: String,
    pub github_oauth_url: String,
    pub github_api_url: String,
    pub default_job_location: String,
    pub static_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub upstream_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            jooble_api_key: require_env("JOOBLE_API_KEY")?,
            jooble_api_url: env_or("JOOBLE_API_URL", "https://jooble.org/api"),
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_api_url: env_or(
                "GEMINI_API_URL",
                "https://generativelanguage.googleapis.com",
            ),
            gemini_model: env_or("GEMINI_MODEL", "gemini-2.5-flash-lite"),
            github_client_id: require_env("GITHUB_CLIENT_ID")?,
            github_client_secret: require_env("GITHUB_CLIENT_SECRET")?,
            github_oauth_url: env_or("GITHUB_OAUTH_URL", "https://github.com/login/oauth"),
            github_api_url: env_or("GITHUB_API_URL", "https://api.github.com"),
            default_job_location: env_or("DEFAULT_JOB_LOCATION", "Bern"),
            static_dir: PathBuf::from(env_or("STATIC_DIR", "dist")),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 60)?,
            port: parse_env("PORT", 5000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

// Secrets never reach the logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jooble_api_key", &"<redacted>")
            .field("jooble_api_url", &self.jooble_api_url)
            .field("gemini_api_key", &"<redacted>")
            .field("gemini_api_url", &self.gemini_api_url)
            .field("gemini_model", &self.gemini_model)
            .field("github_client_id", &self.github_client_id)
            .field("github_client_secret", &"<redacted>")
            .field("github_oauth_url", &self.github_oauth_url)
            .field("github_api_url", &self.github_api_url)
            .field("default_job_location", &self.default_job_location)
            .field("static_dir", &self.static_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing every upstream at `base_url`, for tests.
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            jooble_api_key: "test-jooble-key".to_string(),
            jooble_api_url: format!("{base_url}/jooble"),
            gemini_api_key: "test-gemini-key".to_string(),
            gemini_api_url: format!("{base_url}/gemini"),
            gemini_model: "gemini-test".to_string(),
            github_client_id: "test-client-id".to_string(),
            github_client_secret: "test-client-secret".to_string(),
            github_oauth_url: format!("{base_url}/oauth"),
            github_api_url: format!("{base_url}/github"),
            default_job_location: "Bern".to_string(),
            static_dir: PathBuf::from("dist"),
            max_upload_bytes: 1024 * 1024,
            upstream_timeout_secs: 5,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
