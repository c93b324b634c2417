//! Content Generator: builds the prompt for a document kind, makes one model call and
//! parses the reply into typed content.
//!
//! Any failure (transport, provider status, empty reply, JSON that does not match the
//! contract) is an `AppError::Llm` carrying the cause. Nothing is defaulted and nothing
//! is retried.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::{COVER_LETTER_SYSTEM_TEMPLATE, RESUME_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::JSON_ONLY_RULES;
use crate::llm_client::{ChatRequest, LlmClient};
use crate::models::{CoverLetterContent, DocumentKind, ResumeContent};
use crate::sources::truncate_chars;

/// Characters of the old resume included in the prompt.
pub const RESUME_TEXT_LIMIT: usize = 4_000;

/// Per-document prompt settings.
#[derive(Debug, Clone, Copy)]
struct Profile {
    system_template: &'static str,
    job_text_limit: usize,
    temperature: f32,
}

impl Profile {
    fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            // Rewriting facts: stay close to the source.
            DocumentKind::Resume => Profile {
                system_template: RESUME_SYSTEM_TEMPLATE,
                job_text_limit: 4_000,
                temperature: 0.2,
            },
            DocumentKind::CoverLetter => Profile {
                system_template: COVER_LETTER_SYSTEM_TEMPLATE,
                job_text_limit: 3_000,
                temperature: 0.7,
            },
        }
    }

    fn system_prompt(&self) -> String {
        self.system_template.replace("{json_rules}", JSON_ONLY_RULES)
    }
}

/// Typed model output for either document.
#[derive(Debug, Clone)]
pub enum GeneratedContent {
    Resume(ResumeContent),
    CoverLetter(CoverLetterContent),
}

impl GeneratedContent {
    /// Raw (unescaped) company name used to key the artifact.
    pub fn company_name(&self) -> &str {
        match self {
            GeneratedContent::Resume(resume) => resume.company_name(),
            GeneratedContent::CoverLetter(letter) => &letter.company_name,
        }
    }

    /// Content tree handed to the template, before sanitization.
    /// Cover letters gain a `paragraphs` list split from `letter_body`.
    pub fn template_context(&self) -> Result<Value, serde_json::Error> {
        match self {
            GeneratedContent::Resume(resume) => serde_json::to_value(resume),
            GeneratedContent::CoverLetter(letter) => {
                let mut value = serde_json::to_value(letter)?;
                if let Value::Object(map) = &mut value {
                    map.insert("paragraphs".to_string(), letter.paragraphs().into());
                }
                Ok(value)
            }
        }
    }
}

/// The user turn: truncated old resume followed by truncated job text.
pub fn build_user_message(resume_text: &str, job_text: &str, job_text_limit: usize) -> String {
    format!(
        "OLD RESUME:\n{}\n\nTARGET JOB DESCRIPTION:\n{}",
        truncate_chars(resume_text, RESUME_TEXT_LIMIT),
        truncate_chars(job_text, job_text_limit)
    )
}

/// Generates content for `kind` from the resolved inputs.
pub async fn generate_content(
    llm: &LlmClient,
    kind: DocumentKind,
    resume_text: &str,
    job_text: &str,
) -> Result<GeneratedContent, AppError> {
    let content = match kind {
        DocumentKind::Resume => {
            GeneratedContent::Resume(request_json(llm, kind, resume_text, job_text).await?)
        }
        DocumentKind::CoverLetter => {
            GeneratedContent::CoverLetter(request_json(llm, kind, resume_text, job_text).await?)
        }
    };

    info!(
        "Generated {kind} content for company '{}'",
        content.company_name()
    );
    Ok(content)
}

async fn request_json<T: DeserializeOwned>(
    llm: &LlmClient,
    kind: DocumentKind,
    resume_text: &str,
    job_text: &str,
) -> Result<T, AppError> {
    let profile = Profile::for_kind(kind);
    let system = profile.system_prompt();
    let user = build_user_message(resume_text, job_text, profile.job_text_limit);

    llm.call_json(ChatRequest {
        system: &system,
        user: &user,
        temperature: profile.temperature,
    })
    .await
    .map_err(|e| AppError::Llm(format!("{kind} generation failed: {e}")))
}
