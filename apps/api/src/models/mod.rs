pub mod cover_letter;
pub mod personal;
pub mod resume;

pub use cover_letter::CoverLetterContent;
pub use personal::PersonalInfo;
pub use resume::ResumeContent;

/// The two documents Tailor can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// Name of the template bound for this document.
    pub fn template_name(self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }

    /// Prefix of the download filename, e.g. `Resume_Acme.pdf`.
    pub fn file_tag(self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "CoverLetter",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_name())
    }
}
