//! Resume-Text Extractor: best-effort plain text from an uploaded PDF.

use bytes::Bytes;
use tracing::{info, warn};

/// Outcome of reading the uploaded resume. Only `Extracted` carries text.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeText {
    Absent,
    Extracted(String),
    Failed { reason: String },
}

impl ResumeText {
    pub fn text(&self) -> &str {
        match self {
            ResumeText::Extracted(text) => text,
            ResumeText::Absent | ResumeText::Failed { .. } => "",
        }
    }
}

/// Extracts page text from the upload, in page order. Pages without text contribute nothing.
///
/// Parsing runs on the blocking pool; a parser error or panic is logged and reported as
/// `Failed` rather than failing the request.
pub async fn extract_resume_text(upload: Option<Bytes>) -> ResumeText {
    let Some(bytes) = upload.filter(|b| !b.is_empty()) else {
        return ResumeText::Absent;
    };
    let size = bytes.len();

    match tokio::task::spawn_blocking(move || extract_pages(&bytes)).await {
        Ok(Ok(text)) => {
            info!(
                "Extracted {} characters from uploaded resume ({size} bytes)",
                text.chars().count()
            );
            ResumeText::Extracted(text)
        }
        Ok(Err(e)) => {
            warn!("Error reading PDF ({size} bytes): {e}");
            ResumeText::Failed {
                reason: e.to_string(),
            }
        }
        Err(e) => {
            warn!("PDF extraction aborted ({size} bytes): {e}");
            ResumeText::Failed {
                reason: "PDF parser aborted".to_string(),
            }
        }
    }
}

fn extract_pages(bytes: &[u8]) -> Result<String, pdf_extract::OutputError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)?;
    Ok(pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}
