//! Text generation endpoints: job summaries, interview questions,
//! cover-letter feedback, and university autocomplete.
//! All LLM calls go through llm_client; no direct Gemini calls here.

pub mod handlers;
pub mod normalize;
pub mod prompts;
