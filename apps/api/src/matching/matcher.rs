//! Matcher: the two request-level pipelines.
//!
//! Single-target: normalize → (vectorize, extract skills) → score → feedback.
//! Corpus mode:   analyze the resume once, then rank it against every posting.

use std::sync::Arc;

use anyhow::anyhow;
use tracing::debug;

use crate::errors::AppError;
use crate::matching::feedback::{rule_based_feedback, FeedbackGenerator};
use crate::matching::ranker::JobRanker;
use crate::matching::scorer::{score, ScoringWeights};
use crate::matching::snapshot::EngineSnapshot;
use crate::models::document::Document;
use crate::models::job::RankedJob;
use crate::models::match_result::{FeedbackSource, MatchResult};

/// Matches a resume against one job description.
///
/// The provider call (if any) is started before scoring so it overlaps with
/// it; the score itself is deterministic and provider-independent. Analysis
/// and scoring run on the blocking pool.
pub async fn match_resume(
    snapshot: Arc<EngineSnapshot>,
    feedback: &FeedbackGenerator,
    weights: ScoringWeights,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchResult, AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Job description cannot be empty".to_string(),
        ));
    }
    if resume_text.trim().is_empty() {
        return Err(AppError::InvalidInput("Resume text cannot be empty".to_string()));
    }

    let pending = feedback.spawn_semantic(resume_text, job_description);

    let resume_doc = Document::resume(resume_text);
    let target_doc = Document::job_description(job_description);
    let max_suggestions = feedback.max_suggestions();
    let (score_value, rule_based) = tokio::task::spawn_blocking(move || {
        let resume = snapshot.analyze(&resume_doc);
        let target = snapshot.analyze(&target_doc);
        let breakdown = score(&resume, &target, &weights);
        debug!(
            "Match breakdown: cosine={:.4} skill_overlap={:.4} score={}",
            breakdown.cosine, breakdown.skill_overlap, breakdown.score
        );
        let rule_based = rule_based_feedback(
            &resume.skills,
            &target.skills,
            breakdown.score,
            snapshot.taxonomy(),
            max_suggestions,
        );
        (breakdown.score, rule_based)
    })
    .await
    .map_err(|e| anyhow!("Scoring task failed: {e}"))?;

    let (narrative, source) = match pending {
        Some(pending) => pending.resolve(rule_based).await,
        None => (rule_based, FeedbackSource::RuleBased),
    };

    Ok(MatchResult {
        score: score_value,
        strengths: narrative.strengths,
        weaknesses: narrative.weaknesses,
        suggestions: narrative.suggestions,
        source,
    })
}

/// Ranks the snapshot's corpus against a resume. An empty corpus yields an
/// empty list. CPU-bound: call from a blocking context.
pub fn suggest_jobs(
    snapshot: &EngineSnapshot,
    ranker: &JobRanker,
    weights: &ScoringWeights,
    resume_text: &str,
) -> Vec<RankedJob> {
    let resume = snapshot.analyze(&Document::resume(resume_text));
    let ranked = ranker.rank(&resume, snapshot.postings(), weights);
    debug!(
        "Ranked {} postings, returning {}",
        snapshot.postings().len(),
        ranked.len()
    );
    ranked
}
