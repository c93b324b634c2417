use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::models::PersonalInfo;
use crate::render::{LatexCompiler, Templates};
use crate::sources::PageFetcher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once in `main`; read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub fetcher: PageFetcher,
    pub templates: Arc<Templates>,
    pub personal: Arc<PersonalInfo>,
    pub compiler: Arc<LatexCompiler>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State with built-in templates, sample personal info and the given model and compiler.
    pub fn for_tests(
        llm: LlmClient,
        compiler_program: &str,
        compiler_args: Vec<String>,
        work_root: &std::path::Path,
    ) -> Self {
        let config = Config::for_tests(work_root.to_path_buf());
        let compiler = LatexCompiler::new(
            compiler_program,
            compiler_args,
            config.latex_passes,
            std::time::Duration::from_secs(config.latex_timeout_secs),
            work_root,
        );
        AppState {
            llm,
            fetcher: PageFetcher::new(std::time::Duration::from_secs(config.fetch_timeout_secs))
                .expect("test HTTP client"),
            templates: Arc::new(Templates::builtin().expect("built-in templates")),
            personal: Arc::new(PersonalInfo::sample()),
            compiler: Arc::new(compiler),
            config,
        }
    }
}
