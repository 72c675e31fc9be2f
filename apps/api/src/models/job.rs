use serde::Deserialize;

/// A single read-only entry of the job corpus.
///
/// Column names follow the job dataset CSV (`Job_Title`, `Company_Name`, ...);
/// lowercase snake_case headers are accepted as well. Columns we don't know
/// about (e.g. `Start_Date`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "Job_Title", alias = "job_title", default)]
    pub title: String,
    #[serde(rename = "Company_Name", alias = "company_name", default)]
    pub company: String,
    #[serde(rename = "Location", alias = "location", default)]
    pub location: String,
    #[serde(rename = "Experience", alias = "experience", default)]
    pub experience_range: String,
    #[serde(rename = "CTC", alias = "ctc", default)]
    pub compensation: String,
    #[serde(rename = "Posted", alias = "posted", default)]
    pub posted_date: String,
    #[serde(rename = "Description", alias = "description", default)]
    pub description: String,
}

impl JobPosting {
    /// Text the posting is scored on: title, company and description.
    pub fn feature_text(&self) -> String {
        [
            self.title.as_str(),
            self.company.as_str(),
            self.description.as_str(),
        ]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// A posting together with its computed match score against a resume.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedJob {
    pub posting: JobPosting,
    pub match_score: u32,
}
