pub mod frontend;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::documents::handlers as documents;
use crate::generation::handlers as generation;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let max_upload_bytes = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Job search
        .route("/api/jobs", post(jobs::handle_search_jobs))
        // Text generation
        .route("/api/summarize", post(generation::handle_summarize))
        .route(
            "/api/interview-questions",
            post(generation::handle_interview_questions),
        )
        .route(
            "/api/cover-letter-feedback",
            post(generation::handle_cover_letter_feedback),
        )
        .route("/api/universities", post(generation::handle_autocomplete))
        // Documents
        .route(
            "/api/extract-pdf-text",
            post(documents::handle_extract_pdf_text)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        // GitHub login
        .route("/external-signup", get(auth::handle_external_signup))
        // Everything else is the SPA
        .fallback_service(frontend::frontend_service(&static_dir))
        .with_state(state)
}
