//! Axum route handler for the job search proxy.

use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::jobs::client::JobSearchError;
use crate::jobs::models::{JobQuery, JobsResponse, UpstreamJobQuery};
use crate::jobs::normalize::take_jobs;
use crate::state::AppState;

/// POST /api/jobs
///
/// Forwards the search to the job provider once. Listings come back exactly as
/// the provider sent them.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    ApiJson(query): ApiJson<JobQuery>,
) -> Result<Json<JobsResponse>, AppError> {
    let upstream_query = UpstreamJobQuery::from_query(&query, &state.config.default_job_location);

    info!(
        keywords = %upstream_query.keywords,
        location = %upstream_query.location,
        "Searching jobs"
    );

    let payload = state
        .jobs
        .search(&upstream_query)
        .await
        .map_err(|e| match e {
            JobSearchError::Transport(msg) => AppError::UpstreamTransport(msg),
            JobSearchError::Parse(e) => AppError::UpstreamParse(e.to_string()),
        })?;

    let jobs = take_jobs(payload).map_err(|raw| AppError::UpstreamContract {
        message: "Job provider response has no jobs array".to_string(),
        raw,
    })?;

    info!("Job search returned {} listings", jobs.len());

    Ok(Json(JobsResponse { jobs }))
}
