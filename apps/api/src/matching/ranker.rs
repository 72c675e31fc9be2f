//! Job Ranker: scores a resume against every corpus posting and keeps the top K.
//!
//! Postings are scored independently on a bounded Rayon pool (fan-out), then
//! the scores are merged and stably sorted (fan-in): descending by score,
//! ties in corpus order.

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::matching::scorer::{score, DocumentFeatures, ScoringWeights};
use crate::matching::snapshot::IndexedPosting;
use crate::models::job::RankedJob;

pub const DEFAULT_TOP_K: usize = 10;

pub struct JobRanker {
    /// `None` → Rayon's global pool.
    pool: Option<rayon::ThreadPool>,
    top_k: usize,
}

impl JobRanker {
    /// `workers == 0` uses the global Rayon pool.
    pub fn new(workers: usize, top_k: usize) -> Result<Self> {
        let pool = if workers == 0 {
            None
        } else {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .thread_name(|i| format!("job-ranker-{i}"))
                    .build()
                    .context("Failed to build ranker thread pool")?,
            )
        };
        Ok(Self { pool, top_k })
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn rank(
        &self,
        resume: &DocumentFeatures,
        postings: &[IndexedPosting],
        weights: &ScoringWeights,
    ) -> Vec<RankedJob> {
        if postings.is_empty() || self.top_k == 0 {
            return Vec::new();
        }

        let score_all = || -> Vec<u32> {
            postings
                .par_iter()
                .map(|indexed| score(resume, &indexed.features, weights).score)
                .collect()
        };
        let scores = match &self.pool {
            Some(pool) => pool.install(score_all),
            None => score_all(),
        };

        // sort_by is stable: equal scores keep corpus order
        let mut order: Vec<usize> = (0..postings.len()).collect();
        order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
        order.truncate(self.top_k);

        order
            .into_iter()
            .map(|i| RankedJob {
                posting: postings[i].posting.clone(),
                match_score: scores[i],
            })
            .collect()
    }
}
