use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Static identity block printed on every document.
/// Loaded once at startup and shared read-only across requests.
///
/// Values are inserted into templates verbatim, so they must already be valid LaTeX text
/// (the github value is also used as an `\href` target).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonalInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// LinkedIn handle, without the `linkedin.com/in/` prefix.
    pub linkedin: String,
    pub github: String,
    #[serde(alias = "university")]
    pub degree: String,
}

impl PersonalInfo {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read personal info from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid personal info JSON in {}", path.display()))
    }
}

#[cfg(test)]
impl PersonalInfo {
    pub fn sample() -> Self {
        PersonalInfo {
            name: "Jane Doe".to_string(),
            phone: "555-0100".to_string(),
            email: "jane@example.com".to_string(),
            linkedin: "janedoe".to_string(),
            github: "https://github.com/janedoe".to_string(),
            degree: "Bachelor of Technology, Computer Science".to_string(),
        }
    }
}
