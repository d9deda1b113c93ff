//! All LLM prompts for the text-generation endpoints.
//! Builders take caller data and return the finished prompt string.

use crate::jobs::models::JobListing;

/// Upper bound on autocomplete suggestions, both asked for and returned.
pub const MAX_SUGGESTIONS: usize = 4;

pub const SUMMARY_SYSTEM: &str = "You are a concise career assistant. \
    Summarize job listings for a job seeker in plain prose. \
    Do NOT use markdown headings. \
    Do NOT invent details that are not in the listing.";

pub const INTERVIEW_SYSTEM: &str = "You are an experienced hiring manager. \
    Write one interview question per line. \
    Do NOT add introductions, headings, or closing remarks.";

pub const COVER_LETTER_SYSTEM: &str = "You are an expert career coach who reviews cover letters. \
    Give specific, actionable feedback grounded in the job description. \
    Be honest but encouraging.";

pub const AUTOCOMPLETE_SYSTEM: &str = "You are an autocomplete engine. \
    You MUST respond with a JSON array of strings only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

const NO_DESCRIPTION: &str = "No description provided.";

/// Builds the summary prompt, one numbered block per listing in input order.
pub fn summary_prompt(jobs: &[JobListing]) -> String {
    let listings: Vec<String> = jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let mut block = format!(
                "Job {}:\nTitle: {}",
                i + 1,
                job.title.as_deref().unwrap_or("Untitled")
            );
            for (label, value) in [
                ("Company", &job.company),
                ("Location", &job.location),
                ("Salary", &job.salary),
            ] {
                if let Some(value) = value.as_deref().filter(|v| !v.trim().is_empty()) {
                    block.push_str(&format!("\n{label}: {value}"));
                }
            }
            let description = job
                .snippet
                .as_deref()
                .map(clean_snippet)
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string());
            block.push_str(&format!("\nDescription: {description}"));
            block
        })
        .collect();

    format!(
        "Summarize the following job listing(s) in 3-4 sentences each. \
         Highlight the role, key responsibilities, required skills, and anything \
         notable about the employer or compensation.\n\n{}",
        listings.join("\n\n")
    )
}

pub fn interview_prompt(job: &JobListing) -> String {
    let description = job
        .snippet
        .as_deref()
        .map(clean_snippet)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    format!(
        "Generate 5 basic behavioral and situational interview questions based on this job:\n\
         Title: {}\n\
         Description: {}\n\
         Please avoid technical/coding questions.",
        job.title.as_deref().unwrap_or_default().trim(),
        description
    )
}

pub fn cover_letter_prompt(job_description: &str, cover_letter: &str) -> String {
    format!(
        "Review the cover letter below against the job description.\n\
         Point out strengths, gaps relative to the role's requirements, and concrete \
         improvements to wording, structure, and tone. Keep it under 300 words.\n\n\
         JOB DESCRIPTION:\n{}\n\n\
         COVER LETTER:\n{}",
        job_description.trim(),
        cover_letter.trim()
    )
}

pub fn autocomplete_prompt(query: &str) -> String {
    format!(
        "Given the input \"{query}\", return a JSON array of up to {MAX_SUGGESTIONS} real \
         university names that start with this input.\n\
         Output format: [\"University A\", \"University B\", ...]\n\
         Only return the JSON array. Do not include any explanation or text before or after it."
    )
}

/// Strips HTML tags and `&nbsp;` from a provider snippet and collapses whitespace.
pub fn clean_snippet(snippet: &str) -> String {
    let mut text = String::with_capacity(snippet.len());
    let mut rest = snippet;
    while let Some(open) = rest.find('<') {
        text.push_str(&rest[..open]);
        // A `<` with no closing `>` is ordinary text.
        match rest[open..].find('>') {
            Some(close) => {
                text.push(' ');
                rest = &rest[open + close + 1..];
            }
            None => {
                rest = &rest[open..];
                break;
            }
        }
    }
    text.push_str(rest);
    text.replace("&nbsp;", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
