//! Document Renderer: binds personal info and sanitized content against a LaTeX template.
//!
//! Templates use `\BLOCK{ }`, `\VAR{ }` and `\#{ }` instead of Jinja's braces-and-percent
//! delimiters, which collide with LaTeX grouping and comments. Line statements start with
//! `%%`, line comments with `%#`.

use std::path::Path;

use anyhow::Context;
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{DocumentKind, PersonalInfo};

const RESUME_TEMPLATE: &str = include_str!("../../templates/resume.tex");
const COVER_LETTER_TEMPLATE: &str = include_str!("../../templates/cover_letter.tex");

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{template}' failed to render: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },

    #[error("render context for '{0}' is not a JSON object")]
    InvalidContext(&'static str),

    #[error("failed to build render context: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The two document templates, parsed once at startup and shared read-only.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// Templates compiled into the binary from `templates/`.
    pub fn builtin() -> Result<Self, minijinja::Error> {
        Self::from_sources(
            RESUME_TEMPLATE.to_string(),
            COVER_LETTER_TEMPLATE.to_string(),
        )
    }

    /// Loads `resume.tex` and `cover_letter.tex` from `dir`.
    pub fn load_dir(dir: &Path) -> anyhow::Result<Self> {
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read template {}", path.display()))
        };
        let resume = read("resume.tex")?;
        let cover_letter = read("cover_letter.tex")?;
        Self::from_sources(resume, cover_letter)
            .with_context(|| format!("Invalid template in {}", dir.display()))
    }

    /// Parses both templates. Syntax errors surface here rather than per request.
    pub fn from_sources(resume: String, cover_letter: String) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_syntax(latex_syntax()?);
        env.set_trim_blocks(true);
        // A template key the model output lacks is an error, never an empty string.
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template_owned(DocumentKind::Resume.template_name(), resume)?;
        env.add_template_owned(DocumentKind::CoverLetter.template_name(), cover_letter)?;
        Ok(Self { env })
    }

    /// Renders `kind` with the personal-info keys merged under the content keys.
    /// `content` must already be sanitized.
    pub fn render(
        &self,
        kind: DocumentKind,
        personal: &PersonalInfo,
        content: &Value,
    ) -> Result<String, RenderError> {
        let name = kind.template_name();

        let Value::Object(fields) = content else {
            return Err(RenderError::InvalidContext(name));
        };
        let mut context = match serde_json::to_value(personal)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        context.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));

        self.env
            .get_template(name)
            .and_then(|template| template.render(&context))
            .map_err(|source| RenderError::Render {
                template: name,
                source,
            })
    }
}

fn latex_syntax() -> Result<SyntaxConfig, minijinja::Error> {
    SyntaxConfig::builder()
        .block_delimiters("\\BLOCK{", "}")
        .variable_delimiters("\\VAR{", "}")
        .comment_delimiters("\\#{", "}")
        .line_statement_prefix("%%")
        .line_comment_prefix("%#")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::cover_letter::SAMPLE_COVER_LETTER_JSON;
    use crate::models::resume::SAMPLE_RESUME_JSON;
    use crate::render::sanitize::sanitize_value;

    fn templates() -> Templates {
        Templates::builtin().expect("built-in templates parse")
    }

    #[test]
    fn test_resume_contains_sanitized_company_and_ordered_bullets() {
        let mut content: Value = serde_json::from_str(SAMPLE_RESUME_JSON).unwrap();
        content["experience"][0]["company"] = Value::from("Smith & Wesson_Labs");
        let content = sanitize_value(content);

        let source = templates()
            .render(DocumentKind::Resume, &PersonalInfo::sample(), &content)
            .unwrap();

        assert!(source.contains(r"Smith \& Wesson\_Labs"));
        let bullets = [
            r"Cut nightly batch runtime by 40\% with incremental loads",
            r"Built a \$2M forecasting model in Python",
            "Migrated 120 jobs to Airflow",
            "Predicted churn with 0.91 AUC",
            "Served predictions via FastAPI",
        ];
        let positions: Vec<usize> = bullets
            .iter()
            .map(|b| source.find(b).unwrap_or_else(|| panic!("missing bullet {b}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "bullets out of order");
    }

    #[test]
    fn test_resume_includes_personal_info_and_skills() {
        let content = sanitize_value(serde_json::from_str(SAMPLE_RESUME_JSON).unwrap());
        let source = templates()
            .render(DocumentKind::Resume, &PersonalInfo::sample(), &content)
            .unwrap();

        assert!(source.contains("Jane Doe"));
        assert!(source.contains("linkedin.com/in/janedoe"));
        assert!(source.contains(r"\textbf{ML / AI:} scikit-learn, PyTorch"));
        assert!(source.contains("State University"));
        assert!(!source.contains("\\VAR{"), "unrendered variable left in output");
    }

    #[test]
    fn test_resume_without_points_skips_itemize() {
        let mut content: Value = serde_json::from_str(SAMPLE_RESUME_JSON).unwrap();
        content["experience"][0]["points"] = Value::Array(vec![]);
        content["projects"] = Value::Array(vec![]);
        let source = templates()
            .render(DocumentKind::Resume, &PersonalInfo::sample(), &content)
            .unwrap();

        let experience = &source[source.find(r"\section{Experience}").unwrap()
            ..source.find(r"\section{Projects}").unwrap()];
        assert!(!experience.contains(r"\begin{itemize}"));
    }

    #[test]
    fn test_missing_key_is_a_render_error() {
        let mut content: Value = serde_json::from_str(SAMPLE_RESUME_JSON).unwrap();
        content.as_object_mut().unwrap().remove("skills");

        let err = templates()
            .render(DocumentKind::Resume, &PersonalInfo::sample(), &content)
            .unwrap_err();
        assert!(matches!(err, RenderError::Render { template: "resume", .. }));
    }

    #[test]
    fn test_non_object_content_is_rejected() {
        let err = templates()
            .render(
                DocumentKind::CoverLetter,
                &PersonalInfo::sample(),
                &Value::from("just text"),
            )
            .unwrap_err();
        assert!(matches!(err, RenderError::InvalidContext("cover_letter")));
    }

    #[test]
    fn test_cover_letter_renders_paragraphs_in_order() {
        let mut content: Value = serde_json::from_str(SAMPLE_COVER_LETTER_JSON).unwrap();
        content["paragraphs"] = serde_json::json!([
            "I am excited to apply.",
            "At Initech I cut costs by 30%.",
            "Thank you for your time."
        ]);
        let content = sanitize_value(content);

        let source = templates()
            .render(DocumentKind::CoverLetter, &PersonalInfo::sample(), &content)
            .unwrap();

        assert!(source.contains("Globex"));
        assert!(source.contains(r"\textbf{Re: Platform Engineer}"));
        let first = source.find("I am excited to apply.").unwrap();
        let second = source.find(r"At Initech I cut costs by 30\%.").unwrap();
        let third = source.find("Thank you for your time.").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_content_keys_override_personal_keys() {
        let template = r"\VAR{name}".to_string();
        let templates = Templates::from_sources(template.clone(), template).unwrap();
        let content = serde_json::json!({"name": "Override"});
        let source = templates
            .render(DocumentKind::Resume, &PersonalInfo::sample(), &content)
            .unwrap();
        assert_eq!(source, "Override");
    }

    #[test]
    fn test_broken_template_fails_at_load() {
        let broken = r"\BLOCK{for x in items}\VAR{x}".to_string();
        assert!(Templates::from_sources(broken, String::new()).is_err());
    }

    #[test]
    fn test_load_dir_reads_both_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("resume.tex"), r"R:\VAR{name}").unwrap();
        std::fs::write(dir.path().join("cover_letter.tex"), r"C:\VAR{company_name}").unwrap();

        let templates = Templates::load_dir(dir.path()).unwrap();
        let source = templates
            .render(
                DocumentKind::CoverLetter,
                &PersonalInfo::sample(),
                &serde_json::json!({"company_name": "Globex"}),
            )
            .unwrap();
        assert_eq!(source, "C:Globex");
    }

    #[test]
    fn test_load_dir_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Templates::load_dir(dir.path()).is_err());
    }
}
