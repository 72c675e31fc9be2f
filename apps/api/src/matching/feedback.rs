//! Feedback Generator: strengths, weaknesses and suggestions for a match.
//!
//! The rule-based path is always computed and always available. An optional
//! `FeedbackProvider` (LLM-backed by default) may replace the narrative with
//! richer prose, but only within a fixed time budget: on error, timeout, or an
//! empty answer the rule-based narrative is used. The numeric score never
//! comes from the provider.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{build_feedback_prompt, FEEDBACK_SYSTEM};
use crate::matching::skills::{SkillSet, SkillTaxonomy};
use crate::models::match_result::FeedbackSource;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;
/// Upper bound on strengths/weaknesses taken from a provider answer.
const MAX_NARRATIVE_ITEMS: usize = 10;

const GENERAL_SUGGESTION: &str =
    "Use more specific examples of achievements related to the job requirements";

/// The narrative half of a `MatchResult`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NarrativeFeedback {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl NarrativeFeedback {
    fn is_empty(&self) -> bool {
        self.strengths.is_empty() && self.weaknesses.is_empty() && self.suggestions.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Provider error: {0}")]
    Provider(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Provider trait
// ────────────────────────────────────────────────────────────────────────────

/// External semantic feedback capability: (resume text, target text) → narrative.
/// Fallible; the caller bounds it in time.
#[async_trait]
pub trait FeedbackProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate_feedback(
        &self,
        resume_text: &str,
        target_text: &str,
    ) -> Result<NarrativeFeedback, FeedbackError>;
}

/// Feedback via the LLM client.
pub struct LlmFeedbackProvider(pub LlmClient);

#[async_trait]
impl FeedbackProvider for LlmFeedbackProvider {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn generate_feedback(
        &self,
        resume_text: &str,
        target_text: &str,
    ) -> Result<NarrativeFeedback, FeedbackError> {
        let prompt = build_feedback_prompt(resume_text, target_text);
        let feedback = self
            .0
            .call_json::<NarrativeFeedback>(&prompt, FEEDBACK_SYSTEM)
            .await?;
        Ok(feedback)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rule-based path
// ────────────────────────────────────────────────────────────────────────────

/// Strengths = skills in both sets, weaknesses = target skills the resume
/// lacks, both in taxonomy order. One templated suggestion per weakness,
/// capped at `max_suggestions`.
pub fn rule_based_feedback(
    resume: &SkillSet,
    target: &SkillSet,
    score: u32,
    taxonomy: &SkillTaxonomy,
    max_suggestions: usize,
) -> NarrativeFeedback {
    let strengths = taxonomy.ordered_names(&resume.intersection(target));
    let weaknesses = taxonomy.ordered_names(&target.difference(resume));

    let mut suggestions: Vec<String> = weaknesses
        .iter()
        .take(max_suggestions)
        .map(|skill| format!("Consider highlighting experience with {skill}"))
        .collect();
    if suggestions.is_empty() && score < 100 && max_suggestions > 0 {
        suggestions.push(GENERAL_SUGGESTION.to_string());
    }

    NarrativeFeedback {
        strengths,
        weaknesses,
        suggestions,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct FeedbackGenerator {
    provider: Option<Arc<dyn FeedbackProvider>>,
    timeout: Duration,
    max_suggestions: usize,
}

impl FeedbackGenerator {
    pub fn rule_based_only(max_suggestions: usize) -> Self {
        Self {
            provider: None,
            timeout: Duration::ZERO,
            max_suggestions,
        }
    }

    pub fn with_provider(
        provider: Arc<dyn FeedbackProvider>,
        timeout: Duration,
        max_suggestions: usize,
    ) -> Self {
        Self {
            provider: Some(provider),
            timeout,
            max_suggestions,
        }
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn provider_name(&self) -> Option<&'static str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// Starts the provider call on its own task so scoring can proceed
    /// meanwhile. The time budget starts now. `None` when no provider is set.
    pub fn spawn_semantic(&self, resume_text: &str, target_text: &str) -> Option<PendingFeedback> {
        let provider = self.provider.clone()?;
        let name = provider.name();
        let resume_text = resume_text.to_owned();
        let target_text = target_text.to_owned();
        let handle = tokio::spawn(async move {
            provider
                .generate_feedback(&resume_text, &target_text)
                .await
        });

        Some(PendingFeedback {
            handle,
            deadline: Instant::now() + self.timeout,
            timeout: self.timeout,
            max_suggestions: self.max_suggestions,
            provider: name,
        })
    }
}

/// An in-flight provider call with a fixed deadline.
pub struct PendingFeedback {
    handle: JoinHandle<Result<NarrativeFeedback, FeedbackError>>,
    deadline: Instant,
    timeout: Duration,
    max_suggestions: usize,
    provider: &'static str,
}

impl Drop for PendingFeedback {
    fn drop(&mut self) {
        // An abandoned request must not leave the provider call running.
        self.handle.abort();
    }
}

impl PendingFeedback {
    /// Waits until the deadline at most. Never fails: every provider problem
    /// resolves to `fallback`.
    pub async fn resolve(
        mut self,
        fallback: NarrativeFeedback,
    ) -> (NarrativeFeedback, FeedbackSource) {
        let outcome = tokio::time::timeout_at(self.deadline, &mut self.handle).await;

        match outcome {
            Ok(Ok(Ok(feedback))) => {
                let feedback = sanitize(feedback, self.max_suggestions);
                if feedback.is_empty() {
                    warn!(
                        "Feedback provider '{}' returned no feedback, using rule-based feedback",
                        self.provider
                    );
                    return (fallback, FeedbackSource::RuleBased);
                }
                debug!("Feedback provider '{}' succeeded", self.provider);
                (merge(feedback, fallback), FeedbackSource::Semantic)
            }
            Ok(Ok(Err(e))) => {
                warn!(
                    "Feedback provider '{}' failed: {e}, using rule-based feedback",
                    self.provider
                );
                (fallback, FeedbackSource::RuleBased)
            }
            Ok(Err(join_error)) => {
                warn!(
                    "Feedback provider '{}' task aborted: {join_error}, using rule-based feedback",
                    self.provider
                );
                (fallback, FeedbackSource::RuleBased)
            }
            Err(_) => {
                self.handle.abort();
                warn!(
                    "Feedback provider '{}' timed out after {}ms, using rule-based feedback",
                    self.provider,
                    self.timeout.as_millis()
                );
                (fallback, FeedbackSource::RuleBased)
            }
        }
    }
}

fn clean(items: Vec<String>, cap: usize) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(cap)
        .collect()
}

fn sanitize(feedback: NarrativeFeedback, max_suggestions: usize) -> NarrativeFeedback {
    NarrativeFeedback {
        strengths: clean(feedback.strengths, MAX_NARRATIVE_ITEMS),
        weaknesses: clean(feedback.weaknesses, MAX_NARRATIVE_ITEMS),
        suggestions: clean(feedback.suggestions, max_suggestions),
    }
}

/// Provider fields win; any field the provider left empty keeps the rule-based value.
fn merge(semantic: NarrativeFeedback, rule_based: NarrativeFeedback) -> NarrativeFeedback {
    let pick = |a: Vec<String>, b: Vec<String>| if a.is_empty() { b } else { a };
    NarrativeFeedback {
        strengths: pick(semantic.strengths, rule_based.strengths),
        weaknesses: pick(semantic.weaknesses, rule_based.weaknesses),
        suggestions: pick(semantic.suggestions, rule_based.suggestions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticProvider(NarrativeFeedback);

    #[async_trait]
    impl FeedbackProvider for StaticProvider {
        fn name(&self) -> &'static str {
            "static"
        }

        async fn generate_feedback(
            &self,
            _resume_text: &str,
            _target_text: &str,
        ) -> Result<NarrativeFeedback, FeedbackError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl FeedbackProvider for FailingProvider {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn generate_feedback(
            &self,
            _resume_text: &str,
            _target_text: &str,
        ) -> Result<NarrativeFeedback, FeedbackError> {
            Err(FeedbackError::Provider("upstream unavailable".to_string()))
        }
    }

    struct SlowProvider;

    #[async_trait]
    impl FeedbackProvider for SlowProvider {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn generate_feedback(
            &self,
            _resume_text: &str,
            _target_text: &str,
        ) -> Result<NarrativeFeedback, FeedbackError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(NarrativeFeedback {
                strengths: vec!["too late".to_string()],
                ..Default::default()
            })
        }
    }

    fn taxonomy() -> SkillTaxonomy {
        SkillTaxonomy::builtin().unwrap()
    }

    fn fallback() -> NarrativeFeedback {
        NarrativeFeedback {
            strengths: vec!["Python".to_string()],
            weaknesses: vec!["Kafka".to_string()],
            suggestions: vec!["Consider highlighting experience with Kafka".to_string()],
        }
    }

    #[test]
    fn test_rule_based_strengths_and_weaknesses() {
        let tax = taxonomy();
        let resume = tax.extract("Python developer with AWS and Docker");
        let target = tax.extract("Python developer familiar with AWS and Kafka");
        let feedback = rule_based_feedback(&resume, &target, 70, &tax, 5);
        assert_eq!(feedback.strengths, vec!["Python", "AWS"]);
        assert_eq!(feedback.weaknesses, vec!["Kafka"]);
        assert!(!feedback.weaknesses.contains(&"Docker".to_string()));
        assert_eq!(
            feedback.suggestions,
            vec!["Consider highlighting experience with Kafka"]
        );
    }

    #[test]
    fn test_rule_based_suggestions_are_capped() {
        let tax = taxonomy();
        let resume = SkillSet::default();
        let target = tax.extract("Rust Go Java Kafka Docker Kubernetes Terraform AWS Azure");
        let feedback = rule_based_feedback(&resume, &target, 10, &tax, 3);
        assert!(feedback.weaknesses.len() > 3);
        assert_eq!(feedback.suggestions.len(), 3);
    }

    #[test]
    fn test_rule_based_general_suggestion_without_weaknesses() {
        let tax = taxonomy();
        let skills = tax.extract("Rust");
        let feedback = rule_based_feedback(&skills, &skills, 80, &tax, 5);
        assert!(feedback.weaknesses.is_empty());
        assert_eq!(feedback.suggestions, vec![GENERAL_SUGGESTION]);

        let perfect = rule_based_feedback(&skills, &skills, 100, &tax, 5);
        assert!(perfect.suggestions.is_empty());
    }

    #[test]
    fn test_rule_based_no_skills_anywhere() {
        let tax = taxonomy();
        let feedback =
            rule_based_feedback(&SkillSet::default(), &SkillSet::default(), 0, &tax, 5);
        assert!(feedback.strengths.is_empty());
        assert!(feedback.weaknesses.is_empty());
        assert_eq!(feedback.suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_without_provider_nothing_is_spawned() {
        let generator = FeedbackGenerator::rule_based_only(5);
        assert!(generator.spawn_semantic("resume", "jd").is_none());
        assert!(generator.provider_name().is_none());
    }

    #[tokio::test]
    async fn test_provider_success_is_used() {
        let semantic = NarrativeFeedback {
            strengths: vec!["Strong Python background".to_string()],
            weaknesses: vec![],
            suggestions: vec!["Quantify the AWS migration".to_string()],
        };
        let generator = FeedbackGenerator::with_provider(
            Arc::new(StaticProvider(semantic)),
            Duration::from_secs(5),
            5,
        );
        let pending = generator.spawn_semantic("resume", "jd").unwrap();
        let (feedback, source) = pending.resolve(fallback()).await;
        assert_eq!(source, FeedbackSource::Semantic);
        assert_eq!(feedback.strengths, vec!["Strong Python background"]);
        // Empty provider field falls back to the rule-based one
        assert_eq!(feedback.weaknesses, vec!["Kafka"]);
        assert_eq!(feedback.suggestions, vec!["Quantify the AWS migration"]);
    }

    #[tokio::test]
    async fn test_provider_suggestions_are_capped_and_trimmed() {
        let semantic = NarrativeFeedback {
            strengths: vec![],
            weaknesses: vec![],
            suggestions: vec![" a ".into(), "".into(), "b".into(), "c".into()],
        };
        let generator = FeedbackGenerator::with_provider(
            Arc::new(StaticProvider(semantic)),
            Duration::from_secs(5),
            2,
        );
        let (feedback, _) = generator
            .spawn_semantic("resume", "jd")
            .unwrap()
            .resolve(fallback())
            .await;
        assert_eq!(feedback.suggestions, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_provider_answer_falls_back() {
        let generator = FeedbackGenerator::with_provider(
            Arc::new(StaticProvider(NarrativeFeedback::default())),
            Duration::from_secs(5),
            5,
        );
        let (feedback, source) = generator
            .spawn_semantic("resume", "jd")
            .unwrap()
            .resolve(fallback())
            .await;
        assert_eq!(source, FeedbackSource::RuleBased);
        assert_eq!(feedback, fallback());
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let generator =
            FeedbackGenerator::with_provider(Arc::new(FailingProvider), Duration::from_secs(5), 5);
        let (feedback, source) = generator
            .spawn_semantic("resume", "jd")
            .unwrap()
            .resolve(fallback())
            .await;
        assert_eq!(source, FeedbackSource::RuleBased);
        assert_eq!(feedback, fallback());
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_timeout_falls_back() {
        let generator = FeedbackGenerator::with_provider(
            Arc::new(SlowProvider),
            Duration::from_millis(200),
            5,
        );
        let started = Instant::now();
        let (feedback, source) = generator
            .spawn_semantic("resume", "jd")
            .unwrap()
            .resolve(fallback())
            .await;
        assert_eq!(source, FeedbackSource::RuleBased);
        assert_eq!(feedback, fallback());
        assert!(started.elapsed() < Duration::from_secs(60));
    }

    #[test]
    fn test_narrative_deserializes_with_missing_fields() {
        let parsed: NarrativeFeedback =
            serde_json::from_str(r#"{"strengths": ["Rust"]}"#).unwrap();
        assert_eq!(parsed.strengths, vec!["Rust"]);
        assert!(parsed.weaknesses.is_empty());
        assert!(parsed.suggestions.is_empty());
    }
}
