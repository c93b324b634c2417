// Request inputs: job text (free text or scraped link) and the optional old resume.
// Both are best-effort: failures degrade to empty text and are reported through
// the outcome enums, never as request errors.

pub mod job_text;
pub mod resume_text;

pub use job_text::{resolve_job_text, JobText, PageFetcher};
pub use resume_text::{extract_resume_text, ResumeText};

/// Returns the first `max_chars` characters of `text` without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
