//! Job-Text Resolver: turns the submitted description or job link into bounded plain text.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Node};
use thiserror::Error;
use tracing::{info, warn};

use crate::sources::truncate_chars;

/// Upper bound on job text handed downstream, in characters.
pub const JOB_TEXT_LIMIT: usize = 10_000;

/// Job boards tend to refuse requests without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0";

/// Elements whose text is never visible on the rendered page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Where the job text came from. Failed fetches are kept distinct from absent input
/// so callers can log the difference; both carry empty text.
#[derive(Debug, Clone, PartialEq)]
pub enum JobText {
    Description(String),
    Link { url: String, text: String },
    Absent,
    FetchFailed { url: String, reason: String },
}

impl JobText {
    pub fn text(&self) -> &str {
        match self {
            JobText::Description(text) | JobText::Link { text, .. } => text,
            JobText::Absent | JobText::FetchFailed { .. } => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(u16),
}

/// HTTP client for job posting pages. Every request is bounded by the configured timeout.
#[derive(Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()?,
        })
    }

    /// Fetches the page body as text. Non-2xx responses are errors.
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

/// Resolves the job text for a request.
///
/// Non-blank free text wins. Otherwise the link is fetched and reduced to visible text.
/// Fetch failures are logged and reported as `FetchFailed`, never propagated.
pub async fn resolve_job_text(
    description: Option<&str>,
    link: Option<&str>,
    fetcher: &PageFetcher,
) -> JobText {
    if let Some(description) = description.map(str::trim).filter(|d| !d.is_empty()) {
        return JobText::Description(truncate_chars(description, JOB_TEXT_LIMIT).to_string());
    }

    let Some(url) = link.map(str::trim).filter(|l| !l.is_empty()) else {
        return JobText::Absent;
    };

    let html = match fetcher.fetch(url).await {
        Ok(html) => html,
        Err(e) => {
            warn!("Job link scraping failed for {url}: {e}");
            return JobText::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            };
        }
    };

    let text = html_to_text(&html);
    if text.is_empty() {
        warn!("Job link {url} yielded no visible text");
        return JobText::FetchFailed {
            url: url.to_string(),
            reason: "page has no visible text".to_string(),
        };
    }

    info!("Scraped {} characters of job text from {url}", text.chars().count());
    JobText::Link {
        url: url.to_string(),
        text,
    }
}

/// Reduces an HTML document to its visible text: whitespace collapsed to single spaces,
/// truncated to [`JOB_TEXT_LIMIT`] characters.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::with_capacity(html.len() / 2);
    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            raw.push_str(text);
            raw.push(' ');
        }
    }

    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapsed, JOB_TEXT_LIMIT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{http::StatusCode, routing::get, Router};

    const POSTING: &str = r#"<!DOCTYPE html>
        <html>
          <head><title>Careers</title><style>body { color: red; }</style></head>
          <body>
            <script>window.tracking = "ignore me";</script>
            <h1>Senior   Data
                Engineer</h1>
            <p>Build pipelines in <b>Rust</b> &amp; SQL.</p>
            <noscript>Enable JavaScript</noscript>
          </body>
        </html>"#;

    fn fetcher() -> PageFetcher {
        PageFetcher::new(Duration::from_secs(2)).unwrap()
    }

    /// Serves `POSTING` at `/job` and a 404 at `/gone` on an ephemeral port.
    async fn spawn_job_board() -> String {
        let app = Router::new()
            .route("/job", get(|| async { axum::response::Html(POSTING) }))
            .route("/blank", get(|| async { axum::response::Html("<html><body> </body></html>") }))
            .route("/gone", get(|| async { StatusCode::NOT_FOUND }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_html_to_text_keeps_only_visible_text() {
        let text = html_to_text(POSTING);
        assert_eq!(text, "Senior Data Engineer Build pipelines in Rust & SQL.");
    }

    #[test]
    fn test_html_to_text_truncates() {
        let html = format!("<p>{}</p>", "a".repeat(JOB_TEXT_LIMIT + 500));
        assert_eq!(html_to_text(&html).chars().count(), JOB_TEXT_LIMIT);
    }

    #[tokio::test]
    async fn test_description_takes_priority_over_link() {
        let job = resolve_job_text(
            Some("  Rust engineer wanted  "),
            Some("http://127.0.0.1:9/never-fetched"),
            &fetcher(),
        )
        .await;
        assert_eq!(job, JobText::Description("Rust engineer wanted".to_string()));
    }

    #[tokio::test]
    async fn test_description_is_truncated() {
        let long = "x".repeat(JOB_TEXT_LIMIT * 2);
        let job = resolve_job_text(Some(&long), None, &fetcher()).await;
        assert_eq!(job.text().len(), JOB_TEXT_LIMIT);
    }

    #[tokio::test]
    async fn test_blank_inputs_are_absent() {
        let job = resolve_job_text(Some("   "), Some(""), &fetcher()).await;
        assert_eq!(job, JobText::Absent);
        assert!(job.is_empty());
    }

    #[tokio::test]
    async fn test_link_is_scraped_when_description_missing() {
        let base = spawn_job_board().await;
        let job = resolve_job_text(None, Some(&format!("{base}/job")), &fetcher()).await;
        match &job {
            JobText::Link { text, .. } => assert!(text.contains("Build pipelines in Rust")),
            other => panic!("expected scraped link, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_degrades_to_fetch_failed() {
        let base = spawn_job_board().await;
        let job = resolve_job_text(None, Some(&format!("{base}/gone")), &fetcher()).await;
        assert!(matches!(job, JobText::FetchFailed { .. }));
        assert_eq!(job.text(), "");
    }

    #[tokio::test]
    async fn test_page_without_text_degrades_to_fetch_failed() {
        let base = spawn_job_board().await;
        let job = resolve_job_text(None, Some(&format!("{base}/blank")), &fetcher()).await;
        assert!(matches!(job, JobText::FetchFailed { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_or_invalid_link_degrades_to_fetch_failed() {
        let unreachable = resolve_job_text(None, Some("http://127.0.0.1:9/job"), &fetcher()).await;
        assert!(matches!(unreachable, JobText::FetchFailed { .. }));

        let invalid = resolve_job_text(None, Some("not a url"), &fetcher()).await;
        assert!(matches!(invalid, JobText::FetchFailed { .. }));
    }
}
