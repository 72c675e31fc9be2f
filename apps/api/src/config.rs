use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::matching::feedback::DEFAULT_MAX_SUGGESTIONS;
use crate::matching::ranker::DEFAULT_TOP_K;
use crate::matching::scorer::ScoringWeights;
use crate::matching::snapshot::SnapshotSources;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Startup fails if a set variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub job_dataset_path: PathBuf,
    pub skill_taxonomy_path: Option<PathBuf>,
    pub vocabulary_path: Option<PathBuf>,
    /// Absent → rule-based feedback only.
    pub anthropic_api_key: Option<String>,
    pub feedback_timeout: Duration,
    pub top_k: usize,
    /// 0 → Rayon's default pool.
    pub ranker_workers: usize,
    pub max_suggestions: usize,
    pub scoring_weights: ScoringWeights,
    pub max_upload_bytes: usize,
    pub frontend_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = ScoringWeights::default();
        let scoring_weights = ScoringWeights {
            cosine: parse_env("SCORE_COSINE_WEIGHT", defaults.cosine)?,
            skill_overlap: parse_env("SCORE_SKILL_WEIGHT", defaults.skill_overlap)?,
        };
        if let Err(e) = scoring_weights.validate() {
            bail!("Invalid scoring weights: {e}");
        }

        let top_k: usize = parse_env("TOP_K", DEFAULT_TOP_K)?;
        if top_k == 0 {
            bail!("TOP_K must be at least 1");
        }

        Ok(Config {
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            job_dataset_path: optional_env("JOB_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./data/job.csv")),
            skill_taxonomy_path: optional_env("SKILL_TAXONOMY_PATH").map(PathBuf::from),
            vocabulary_path: optional_env("VOCABULARY_PATH").map(PathBuf::from),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            feedback_timeout: Duration::from_millis(parse_env("FEEDBACK_TIMEOUT_MS", 5000)?),
            top_k,
            ranker_workers: parse_env("RANKER_WORKERS", 0)?,
            max_suggestions: parse_env("MAX_SUGGESTIONS", DEFAULT_MAX_SUGGESTIONS)?,
            scoring_weights,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            frontend_url: optional_env("FRONTEND_URL"),
        })
    }

    pub fn snapshot_sources(&self) -> SnapshotSources {
        SnapshotSources {
            job_dataset_path: self.job_dataset_path.clone(),
            skill_taxonomy_path: self.skill_taxonomy_path.clone(),
            vocabulary_path: self.vocabulary_path.clone(),
        }
    }
}

/// Set and non-blank, trimmed.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid value, got '{raw}'")),
        None => Ok(default),
    }
}
