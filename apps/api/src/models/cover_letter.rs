use serde::{Deserialize, Serialize};

/// Structured cover-letter content returned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetterContent {
    pub company_name: String,
    pub job_role: String,
    pub job_location: String,
    /// Letter body; paragraphs separated by a blank line.
    pub letter_body: String,
}

impl CoverLetterContent {
    /// Splits the body on blank lines. Paragraphs are trimmed and empties dropped.
    pub fn paragraphs(&self) -> Vec<String> {
        self.letter_body
            .replace("\r\n", "\n")
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_COVER_LETTER_JSON: &str = r#"{
    "company_name": "Globex",
    "job_role": "Platform Engineer",
    "job_location": "Remote",
    "letter_body": "I am excited to apply.\n\nAt Initech I cut costs by 30%.\n\nThank you for your time."
}"#;
