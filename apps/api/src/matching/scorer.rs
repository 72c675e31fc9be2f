//! Similarity Scorer: blends text similarity and skill overlap into a 0–100 score.
//!
//! score = round(100 × (cosine_weight × cosine + skill_weight × overlap))
//! where
//! - cosine  = dot product of the two L2-normalized TF-IDF vectors, in [0, 1]
//! - overlap = |resume ∩ target skills| / max(1, |target skills|)
//!
//! Rounding is half away from zero (`f64::round`). A target with neither
//! vector terms nor skills scores 0.

use serde::{Deserialize, Serialize};

use crate::matching::skills::SkillSet;
use crate::matching::vectorizer::FeatureVector;

/// Blend weights. Observable in every score, so they live in config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub cosine: f64,
    pub skill_overlap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cosine: 0.6,
            skill_overlap: 0.4,
        }
    }
}

impl ScoringWeights {
    /// Each weight must lie in [0, 1] and together they may not exceed 1.
    pub fn validate(&self) -> Result<(), String> {
        for (label, w) in [("cosine", self.cosine), ("skill_overlap", self.skill_overlap)] {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(format!("{label} weight must be within [0, 1], got {w}"));
            }
        }
        if self.cosine + self.skill_overlap > 1.0 + 1e-9 {
            return Err(format!(
                "weights must sum to at most 1, got {}",
                self.cosine + self.skill_overlap
            ));
        }
        Ok(())
    }
}

/// What a document looks like to the scorer.
#[derive(Debug, Clone, Default)]
pub struct DocumentFeatures {
    pub vector: FeatureVector,
    pub skills: SkillSet,
}

/// The score together with the components it was blended from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub cosine: f64,
    pub skill_overlap: f64,
    pub score: u32,
}

pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    a.dot(b).clamp(0.0, 1.0)
}

pub fn skill_overlap(resume: &SkillSet, target: &SkillSet) -> f64 {
    let matched = resume.intersection(target).len();
    matched as f64 / target.len().max(1) as f64
}

pub fn score(
    resume: &DocumentFeatures,
    target: &DocumentFeatures,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    if target.vector.is_empty() && target.skills.is_empty() {
        return ScoreBreakdown {
            cosine: 0.0,
            skill_overlap: 0.0,
            score: 0,
        };
    }

    let cosine = cosine_similarity(&resume.vector, &target.vector);
    let overlap = skill_overlap(&resume.skills, &target.skills);
    let blended = weights.cosine * cosine + weights.skill_overlap * overlap;
    let score = (blended * 100.0).round().clamp(0.0, 100.0) as u32;

    ScoreBreakdown {
        cosine,
        skill_overlap: overlap,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::normalizer::normalize;
    use crate::matching::skills::SkillTaxonomy;
    use crate::matching::vectorizer::{vectorize, vectorize_with, TermFrequency, Vocabulary};

    fn features(text: &str, vocab: &Vocabulary, taxonomy: &SkillTaxonomy) -> DocumentFeatures {
        DocumentFeatures {
            vector: vectorize(&normalize(text), vocab),
            skills: taxonomy.extract(text),
        }
    }

    fn resume_features(
        text: &str,
        vocab: &Vocabulary,
        taxonomy: &SkillTaxonomy,
    ) -> DocumentFeatures {
        DocumentFeatures {
            vector: vectorize_with(&normalize(text), vocab, TermFrequency::Presence),
            skills: taxonomy.extract(text),
        }
    }

    fn fitted(texts: &[&str]) -> Vocabulary {
        let docs: Vec<_> = texts.iter().map(|t| normalize(t)).collect();
        Vocabulary::fit(&docs)
    }

    #[test]
    fn test_default_weights_are_60_40() {
        let w = ScoringWeights::default();
        assert_eq!(w.cosine, 0.6);
        assert_eq!(w.skill_overlap, 0.4);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn test_weights_validation() {
        let over = ScoringWeights {
            cosine: 0.8,
            skill_overlap: 0.4,
        };
        assert!(over.validate().is_err());
        let negative = ScoringWeights {
            cosine: -0.1,
            skill_overlap: 0.4,
        };
        assert!(negative.validate().is_err());
        let nan = ScoringWeights {
            cosine: f64::NAN,
            skill_overlap: 0.4,
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_empty_target_scores_zero() {
        let resume = DocumentFeatures {
            vector: FeatureVector::default(),
            skills: ["python"].into_iter().collect(),
        };
        let breakdown = score(&resume, &DocumentFeatures::default(), &ScoringWeights::default());
        assert_eq!(breakdown.score, 0);
    }

    #[test]
    fn test_self_match_scores_100() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let text = "Senior Rust engineer with Kafka, Kubernetes and PostgreSQL experience";
        let vocab = fitted(&[text, "Java developer with Spring Boot", "Product designer"]);
        let doc = features(text, &vocab, &taxonomy);
        let breakdown = score(&doc, &doc.clone(), &ScoringWeights::default());
        assert!((breakdown.cosine - 1.0).abs() < 1e-9);
        assert_eq!(breakdown.skill_overlap, 1.0);
        assert_eq!(breakdown.score, 100);
    }

    #[test]
    fn test_overlap_denominator_is_target_skills() {
        let resume: SkillSet = ["python", "aws", "docker"].into_iter().collect();
        let target: SkillSet = ["python", "aws"].into_iter().collect();
        assert_eq!(skill_overlap(&resume, &target), 1.0);
        assert_eq!(skill_overlap(&target, &resume), 2.0 / 3.0);
        assert_eq!(skill_overlap(&resume, &SkillSet::default()), 0.0);
    }

    #[test]
    fn test_skills_only_target() {
        // No vocabulary terms at all, but skills still count
        let resume = DocumentFeatures {
            vector: FeatureVector::default(),
            skills: ["rust", "go"].into_iter().collect(),
        };
        let target = DocumentFeatures {
            vector: FeatureVector::default(),
            skills: ["rust", "kafka"].into_iter().collect(),
        };
        let breakdown = score(&resume, &target, &ScoringWeights::default());
        // 0.4 × 0.5 = 0.2
        assert_eq!(breakdown.score, 20);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let resume = DocumentFeatures {
            vector: FeatureVector::default(),
            skills: ["rust"].into_iter().collect(),
        };
        let target = DocumentFeatures {
            vector: FeatureVector::default(),
            skills: ["rust", "kafka"].into_iter().collect(),
        };
        let weights = ScoringWeights {
            cosine: 0.0,
            skill_overlap: 0.25,
        };
        // 0.25 × 0.5 × 100 = 12.5 → 13
        assert_eq!(score(&resume, &target, &weights).score, 13);
    }

    #[test]
    fn test_python_aws_example_scores_above_50() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let resume_text = "Experienced Python developer with AWS and Docker skills";
        let jd_text = "Looking for a Python developer familiar with AWS";
        let vocab = fitted(&[resume_text, jd_text]);
        let resume = features(resume_text, &vocab, &taxonomy);
        let target = features(jd_text, &vocab, &taxonomy);
        let breakdown = score(&resume, &target, &ScoringWeights::default());
        assert_eq!(breakdown.skill_overlap, 1.0);
        assert!(breakdown.cosine > 0.3, "cosine was {}", breakdown.cosine);
        assert!(breakdown.score > 50, "score was {}", breakdown.score);
    }

    #[test]
    fn test_adding_required_skill_occurrence_does_not_decrease_score() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let jd_text = "Backend engineer: Rust, Kafka and Kubernetes required";
        let base = "Backend engineer shipping Rust services";
        let vocab = fitted(&[jd_text, base, "Frontend developer with React"]);
        let target = features(jd_text, &vocab, &taxonomy);

        let mut resume_text = base.to_string();
        let mut previous = score(
            &resume_features(&resume_text, &vocab, &taxonomy),
            &target,
            &ScoringWeights::default(),
        )
        .score;
        for alias in ["Kafka", "Kubernetes", "Kafka"] {
            resume_text.push(' ');
            resume_text.push_str(alias);
            let current = score(
                &resume_features(&resume_text, &vocab, &taxonomy),
                &target,
                &ScoringWeights::default(),
            )
            .score;
            assert!(current >= previous, "{current} < {previous} after adding {alias}");
            previous = current;
        }
    }

    #[test]
    fn test_repeating_a_present_alias_keeps_the_score() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let jd_text = "Looking for a Python developer familiar with AWS";
        let vocab = fitted(&[
            "Experienced Python developer with AWS and Docker skills",
            jd_text,
        ]);
        let target = features(jd_text, &vocab, &taxonomy);

        let mut resume_text = "Python developer with AWS".to_string();
        let base = score(
            &resume_features(&resume_text, &vocab, &taxonomy),
            &target,
            &ScoringWeights::default(),
        )
        .score;
        for alias in ["AWS", "AWS", "Python", "AWS"] {
            resume_text.push(' ');
            resume_text.push_str(alias);
            let current = score(
                &resume_features(&resume_text, &vocab, &taxonomy),
                &target,
                &ScoringWeights::default(),
            )
            .score;
            assert_eq!(current, base, "score moved after repeating {alias}");
        }
    }

    #[test]
    fn test_score_always_within_bounds() {
        let taxonomy = SkillTaxonomy::builtin().unwrap();
        let texts = [
            "",
            "Python",
            "Rust Rust Rust Kafka",
            "Looking for a senior data scientist with PyTorch and SQL",
            "Graphic designer, Figma, Photoshop",
        ];
        let vocab = fitted(&texts);
        for a in texts {
            for b in texts {
                let s = score(
                    &features(a, &vocab, &taxonomy),
                    &features(b, &vocab, &taxonomy),
                    &ScoringWeights::default(),
                )
                .score;
                assert!(s <= 100);
            }
        }
    }
}
