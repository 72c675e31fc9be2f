/// What a piece of text is, as far as the matching pipeline cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Resume,
    JobDescription,
    JobPosting,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::JobDescription => "job_description",
            DocumentKind::JobPosting => "job_posting",
        }
    }
}

/// Raw plain text plus its kind tag. Immutable once created.
#[derive(Debug, Clone)]
pub struct Document {
    kind: DocumentKind,
    text: String,
}

impl Document {
    pub fn new(kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn resume(text: impl Into<String>) -> Self {
        Self::new(DocumentKind::Resume, text)
    }

    pub fn job_description(text: impl Into<String>) -> Self {
        Self::new(DocumentKind::JobDescription, text)
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
