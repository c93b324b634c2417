//! Multipart form shared by both generation endpoints.

use axum::extract::Multipart;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

/// Inputs of one generation request. Blank fields are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub job_desc: Option<String>,
    pub job_link: Option<String>,
    pub old_resume: Option<Bytes>,
}

impl GenerationRequest {
    /// Reads `job_desc`, `job_link` and `old_resume`; other fields are skipped.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut request = GenerationRequest::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "job_desc" => request.job_desc = non_blank(field.text().await?),
                "job_link" => request.job_link = non_blank(field.text().await?),
                "old_resume" => {
                    let bytes = field.bytes().await?;
                    request.old_resume = (!bytes.is_empty()).then_some(bytes);
                }
                other => debug!("Ignoring unknown form field '{other}'"),
            }
        }

        Ok(request)
    }
}

fn non_blank(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}
