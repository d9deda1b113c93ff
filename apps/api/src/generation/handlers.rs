//! Axum route handlers for the text-generation endpoints.
//!
//! Each one validates its input, makes a single LLM call, and normalizes the
//! text. Validation failures never reach the LLM.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::ApiJson;
use crate::generation::normalize::{parse_suggestions, split_questions};
use crate::generation::prompts::{
    autocomplete_prompt, cover_letter_prompt, interview_prompt, summary_prompt,
    AUTOCOMPLETE_SYSTEM, COVER_LETTER_SYSTEM, INTERVIEW_SYSTEM, SUMMARY_SYSTEM,
};
use crate::jobs::models::JobListing;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub jobs: Option<Vec<JobListing>>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct InterviewRequest {
    #[serde(default)]
    pub job: Option<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct InterviewResponse {
    pub questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterFeedbackRequest {
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CoverLetterFeedbackResponse {
    pub feedback: String,
}

#[derive(Debug, Deserialize)]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutocompleteResponse {
    pub suggestions: Vec<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/summarize
pub async fn handle_summarize(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let jobs = request
        .jobs
        .filter(|jobs| !jobs.is_empty())
        .ok_or_else(|| AppError::Validation("Invalid jobs array".to_string()))?;

    info!("Summarizing {} job listing(s)", jobs.len());

    let summary = state
        .llm
        .generate(&summary_prompt(&jobs), SUMMARY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Summary generation failed: {e}")))?;

    Ok(Json(SummaryResponse { summary }))
}

/// POST /api/interview-questions
pub async fn handle_interview_questions(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<InterviewRequest>,
) -> Result<Json<InterviewResponse>, AppError> {
    let job = request
        .job
        .filter(|job| non_blank(job.title.as_deref()).is_some())
        .ok_or_else(|| AppError::Validation("Invalid job data".to_string()))?;

    let text = state
        .llm
        .generate(&interview_prompt(&job), INTERVIEW_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Failed to generate interview questions: {e}")))?;

    Ok(Json(InterviewResponse {
        questions: split_questions(&text),
    }))
}

/// POST /api/cover-letter-feedback
pub async fn handle_cover_letter_feedback(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CoverLetterFeedbackRequest>,
) -> Result<Json<CoverLetterFeedbackResponse>, AppError> {
    let (Some(job_description), Some(cover_letter)) = (
        non_blank(request.job_description.as_deref()),
        non_blank(request.cover_letter.as_deref()),
    ) else {
        return Err(AppError::Validation(
            "Both jobDescription and coverLetter are required".to_string(),
        ));
    };

    let feedback = state
        .llm
        .generate(
            &cover_letter_prompt(job_description, cover_letter),
            COVER_LETTER_SYSTEM,
        )
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter feedback failed: {e}")))?;

    Ok(Json(CoverLetterFeedbackResponse { feedback }))
}

/// POST /api/universities
///
/// Backs an as-you-type field, so it always answers 200: an empty query skips
/// the LLM entirely, and any failure degrades to an empty list.
pub async fn handle_autocomplete(
    State(state): State<AppState>,
    payload: Result<Json<AutocompleteQuery>, JsonRejection>,
) -> Json<AutocompleteResponse> {
    let query = match payload {
        Ok(Json(q)) => q.query,
        Err(rejection) => {
            warn!("Ignoring malformed autocomplete request: {}", rejection.body_text());
            None
        }
    };

    let Some(query) = non_blank(query.as_deref()) else {
        return Json(AutocompleteResponse {
            suggestions: Vec::new(),
        });
    };

    let suggestions = match state
        .llm
        .generate(&autocomplete_prompt(query), AUTOCOMPLETE_SYSTEM)
        .await
    {
        Ok(text) => parse_suggestions(&text),
        Err(e) => {
            warn!("Autocomplete generation failed: {e}");
            Vec::new()
        }
    };

    Json(AutocompleteResponse { suggestions })
}
