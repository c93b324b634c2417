//! Compiler Invoker: runs the LaTeX toolchain against rendered source in a private
//! working directory and returns the PDF bytes.
//!
//! Each compilation gets a fresh directory under `work_root` named
//! `{kind}_{slug}_<random>`, so concurrent requests for the same company never share
//! files. The directory is a [`tempfile::TempDir`]: it is removed when `compile`
//! returns, whether the build succeeded, failed or timed out.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::models::DocumentKind;

/// Slug used when the company name has no ASCII alphanumerics.
pub const FALLBACK_SLUG: &str = "Company";
const MAX_SLUG_CHARS: usize = 48;
/// Lines of the compiler log echoed into our own log on failure.
const LOG_TAIL_LINES: usize = 15;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to create working directory: {0}")]
    WorkDir(#[source] std::io::Error),

    #[error("failed to write LaTeX source: {0}")]
    WriteSource(#[source] std::io::Error),

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for the compiler: {0}")]
    Wait(#[source] std::io::Error),

    #[error("compiler pass {pass} timed out after {secs}s")]
    Timeout { pass: u32, secs: u64 },

    #[error("compiler pass {pass} exited with status {code:?}")]
    Exit { pass: u32, code: Option<i32> },

    #[error("compiler produced no PDF: {0}")]
    MissingOutput(#[source] std::io::Error),

    #[error("compiler produced an empty PDF")]
    EmptyOutput,
}

/// A compiled document, held in memory once its working directory is gone.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    /// Download name, e.g. `Resume_AcmeCorp.pdf`.
    pub filename: String,
    pub pdf: Bytes,
}

/// Runs an external LaTeX compiler a fixed number of passes per document.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: String,
    base_args: Vec<String>,
    passes: u32,
    timeout: Duration,
    work_root: PathBuf,
}

impl LatexCompiler {
    /// Arguments for `pdflatex`: never stop for terminal input.
    pub fn pdflatex_args() -> Vec<String> {
        vec!["-interaction=nonstopmode".to_string()]
    }

    pub fn new(
        program: impl Into<String>,
        base_args: Vec<String>,
        passes: u32,
        timeout: Duration,
        work_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            program: program.into(),
            base_args,
            passes: passes.max(1),
            timeout,
            work_root: work_root.into(),
        }
    }

    /// Writes `source` to a fresh directory and compiles it.
    ///
    /// Every pass runs `program base_args -output-directory <dir> <file>.tex` with stdout
    /// discarded. Any non-zero exit, timeout or missing output fails the whole build.
    pub async fn compile(
        &self,
        kind: DocumentKind,
        company_name: &str,
        source: &str,
    ) -> Result<CompiledArtifact, CompileError> {
        let slug = company_slug(company_name);
        let stem = format!("{}_{slug}", kind.file_tag());

        let work_dir = tempfile::Builder::new()
            .prefix(&format!("{}_{slug}_", kind.template_name()))
            .tempdir_in(&self.work_root)
            .map_err(CompileError::WorkDir)?;
        let dir = work_dir.path();

        let tex_path = dir.join(format!("{stem}.tex"));
        tokio::fs::write(&tex_path, source)
            .await
            .map_err(CompileError::WriteSource)?;

        for pass in 1..=self.passes {
            if let Err(e) = self.run_pass(dir, &tex_path, pass).await {
                log_compiler_output(&dir.join(format!("{stem}.log"))).await;
                return Err(e);
            }
        }

        let pdf = tokio::fs::read(dir.join(format!("{stem}.pdf")))
            .await
            .map_err(CompileError::MissingOutput)?;
        if pdf.is_empty() {
            return Err(CompileError::EmptyOutput);
        }

        info!(
            "Compiled {stem}.pdf ({} bytes, {} pass(es))",
            pdf.len(),
            self.passes
        );

        Ok(CompiledArtifact {
            filename: format!("{stem}.pdf"),
            pdf: Bytes::from(pdf),
        })
    }

    async fn run_pass(&self, dir: &Path, tex_path: &Path, pass: u32) -> Result<(), CompileError> {
        debug!("Running {} pass {pass}/{} in {}", self.program, self.passes, dir.display());

        let child = Command::new(&self.program)
            .args(&self.base_args)
            .arg("-output-directory")
            .arg(dir)
            .arg(tex_path)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| CompileError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CompileError::Timeout {
                pass,
                secs: self.timeout.as_secs(),
            })?
            .map_err(CompileError::Wait)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                warn!("Compiler stderr: {}", stderr.trim());
            }
            return Err(CompileError::Exit {
                pass,
                code: output.status.code(),
            });
        }

        Ok(())
    }
}

/// Reduces a company name to ASCII alphanumerics for file and directory names.
/// Falls back to [`FALLBACK_SLUG`] when nothing is left.
pub fn company_slug(company_name: &str) -> String {
    let slug: String = company_name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_SLUG_CHARS)
        .collect();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

async fn log_compiler_output(log_path: &Path) {
    let Ok(log) = tokio::fs::read_to_string(log_path).await else {
        return;
    };
    let lines: Vec<&str> = log.lines().collect();
    let tail = lines[lines.len().saturating_sub(LOG_TAIL_LINES)..].join("\n");
    warn!("LaTeX compilation failed, log tail:\n{tail}");
}
