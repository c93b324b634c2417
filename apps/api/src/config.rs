use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
    /// JSON file holding the static personal-info record.
    pub personal_info_path: PathBuf,
    /// Directory with `resume.tex` / `cover_letter.tex`. Built-in templates when unset.
    pub templates_dir: Option<PathBuf>,
    pub latex_bin: String,
    pub latex_passes: u32,
    pub latex_timeout_secs: u64,
    pub fetch_timeout_secs: u64,
    /// Parent directory for per-request compilation directories.
    pub work_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            llm_api_url: std::env::var("LLM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 120)?,
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            personal_info_path: std::env::var("PERSONAL_INFO_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("personal_info.json")),
            templates_dir: std::env::var("TEMPLATES_DIR").ok().map(PathBuf::from),
            latex_bin: std::env::var("LATEX_BIN").unwrap_or_else(|_| "pdflatex".to_string()),
            latex_passes: parse_env("LATEX_PASSES", 2)?,
            latex_timeout_secs: parse_env("LATEX_TIMEOUT_SECS", 60)?,
            fetch_timeout_secs: parse_env("FETCH_TIMEOUT_SECS", 15)?,
            work_dir: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        };

        ensure!(config.latex_passes >= 1, "LATEX_PASSES must be at least 1");
        ensure!(
            config.latex_timeout_secs >= 1,
            "LATEX_TIMEOUT_SECS must be at least 1"
        );

        Ok(config)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
/// A set-but-unparseable value is an error rather than a silent default.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by router and pipeline tests. Nothing here touches the network.
    pub fn for_tests(work_dir: PathBuf) -> Self {
        Config {
            groq_api_key: "test-key".to_string(),
            llm_api_url: DEFAULT_API_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            llm_timeout_secs: 5,
            port: 0,
            rust_log: "debug".to_string(),
            personal_info_path: PathBuf::from("personal_info.json"),
            templates_dir: None,
            latex_bin: "false".to_string(),
            latex_passes: 2,
            latex_timeout_secs: 5,
            fetch_timeout_secs: 2,
            work_dir,
            max_upload_bytes: 1024 * 1024,
        }
    }
}
