//! Generation pipeline shared by both endpoints.
//!
//! Flow: (resolve job text ∥ extract old resume) → reject if no job text →
//!       generate content → sanitize → render template → compile → artifact.

use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::form::GenerationRequest;
use crate::generation::generator::generate_content;
use crate::models::DocumentKind;
use crate::render::{sanitize_value, CompiledArtifact};
use crate::sources::{extract_resume_text, resolve_job_text, JobText, ResumeText};
use crate::state::AppState;

pub const MISSING_JOB_TEXT: &str = "Please provide either a Job Description or a Job Link.";

/// Runs one request end to end. Either a complete PDF or an error; never a partial result.
pub async fn run_pipeline(
    state: &AppState,
    kind: DocumentKind,
    request: GenerationRequest,
) -> Result<CompiledArtifact, AppError> {
    let request_id = Uuid::new_v4();
    info!("[{request_id}] Generating {kind}");

    let GenerationRequest {
        job_desc,
        job_link,
        old_resume,
    } = request;

    // The two inputs are independent; fetch the link while the PDF is parsed.
    let (job, resume) = tokio::join!(
        resolve_job_text(job_desc.as_deref(), job_link.as_deref(), &state.fetcher),
        extract_resume_text(old_resume),
    );
    log_inputs(request_id, &job, &resume);

    if job.is_empty() {
        return Err(AppError::Validation(MISSING_JOB_TEXT.to_string()));
    }

    let content = generate_content(&state.llm, kind, resume.text(), job.text()).await?;

    let context = content
        .template_context()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize content: {e}")))?;
    let source = state
        .templates
        .render(kind, &state.personal, &sanitize_value(context))?;

    let artifact = state
        .compiler
        .compile(kind, content.company_name(), &source)
        .await?;

    info!("[{request_id}] Finished {kind}: {}", artifact.filename);
    Ok(artifact)
}

fn log_inputs(request_id: Uuid, job: &JobText, resume: &ResumeText) {
    match job {
        JobText::Description(text) => {
            info!("[{request_id}] Job text from description ({} chars)", text.chars().count())
        }
        JobText::Link { url, text } => {
            info!("[{request_id}] Job text from {url} ({} chars)", text.chars().count())
        }
        JobText::FetchFailed { url, reason } => {
            warn!("[{request_id}] Job link {url} unusable: {reason}")
        }
        JobText::Absent => info!("[{request_id}] No job text supplied"),
    }

    match resume {
        ResumeText::Absent => info!("[{request_id}] No old resume uploaded"),
        ResumeText::Extracted(text) => {
            info!("[{request_id}] Old resume text: {} chars", text.chars().count())
        }
        ResumeText::Failed { reason } => {
            warn!("[{request_id}] Old resume unreadable, continuing without it: {reason}")
        }
    }
}
