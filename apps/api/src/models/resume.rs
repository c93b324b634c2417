use serde::{Deserialize, Deserializer, Serialize};

/// Structured resume content returned by the model.
///
/// Field names are the template contract: `templates/resume.tex` binds them directly.
/// Unknown keys are ignored; missing keys fail deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeContent {
    /// Company the resume targets. Only used to name the artifact; optional in model output.
    #[serde(default)]
    pub target_company: Option<String>,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Skills,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub location: String,
    pub role: String,
    pub duration: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub technologies: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skills {
    pub analytics: String,
    pub ml_ai: String,
    pub languages: String,
    pub web: String,
    pub tools: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    pub degree: String,
    // Models tend to emit GPAs and graduation years as bare numbers.
    #[serde(deserialize_with = "string_or_number")]
    pub score: String,
}

impl ResumeContent {
    /// Company name used to key the artifact; empty when the model did not identify one.
    pub fn company_name(&self) -> &str {
        self.target_company.as_deref().unwrap_or_default()
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(text) => text,
        Scalar::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
pub(crate) const SAMPLE_RESUME_JSON: &str = r#"{
    "target_company": "Acme & Co",
    "summary": "Data engineer with 5 years of experience building pipelines.",
    "experience": [
        {
            "company": "Initech",
            "location": "Austin, TX",
            "role": "Data Engineer",
            "duration": "2021 -- Present",
            "points": [
                "Cut nightly batch runtime by 40% with incremental loads",
                "Built a $2M forecasting model in Python",
                "Migrated 120 jobs to Airflow"
            ]
        }
    ],
    "projects": [
        {
            "title": "Churn Radar",
            "technologies": "Python, scikit-learn",
            "points": ["Predicted churn with 0.91 AUC", "Served predictions via FastAPI"]
        }
    ],
    "skills": {
        "analytics": "SQL, dbt",
        "ml_ai": "scikit-learn, PyTorch",
        "languages": "Python, Rust",
        "web": "FastAPI, React",
        "tools": "Git, Docker"
    },
    "education": [
        {"institution": "State University", "year": 2020, "degree": "BSc Computer Science", "score": 8.7}
    ]
}"#;
