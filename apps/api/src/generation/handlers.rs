//! Axum route handlers for the Generation API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::errors::AppError;
use crate::generation::form::GenerationRequest;
use crate::generation::pipeline::run_pipeline;
use crate::models::DocumentKind;
use crate::render::CompiledArtifact;
use crate::state::AppState;

/// POST /generate
///
/// Multipart form: `job_desc`, `job_link`, `old_resume`. Returns the tailored resume PDF.
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request = GenerationRequest::from_multipart(multipart).await?;
    let artifact = run_pipeline(&state, DocumentKind::Resume, request).await?;
    Ok(pdf_response(artifact))
}

/// POST /generate_cover_letter
///
/// Same form as `/generate`. Returns the cover letter PDF.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let request = GenerationRequest::from_multipart(multipart).await?;
    let artifact = run_pipeline(&state, DocumentKind::CoverLetter, request).await?;
    Ok(pdf_response(artifact))
}

fn pdf_response(artifact: CompiledArtifact) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", artifact.filename),
            ),
        ],
        artifact.pdf,
    )
        .into_response()
}
