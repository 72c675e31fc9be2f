use serde::Serialize;

/// Which feedback path produced the narrative fields of a `MatchResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    RuleBased,
    Semantic,
}

/// Outcome of a single-target match. Either fully produced or not at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub score: u32, // 0 – 100
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub source: FeedbackSource,
}
