//! Engine snapshots: the process-wide, read-only matching state.
//!
//! An `EngineSnapshot` bundles the vocabulary, the skill taxonomy and the job
//! corpus with each posting's features precomputed. Snapshots are never
//! mutated: a reload builds a complete new snapshot off to the side and then
//! swaps the `Arc` held by `EngineHandle`. Requests load the `Arc` once at the
//! start (lock-free) and keep scoring against that snapshot even if a swap
//! happens meanwhile.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::corpus::load_postings;
use crate::matching::normalizer::{normalize, TokenSequence};
use crate::matching::scorer::DocumentFeatures;
use crate::matching::skills::SkillTaxonomy;
use crate::matching::vectorizer::{vectorize, vectorize_with, TermFrequency, Vocabulary};
use crate::models::document::{Document, DocumentKind};
use crate::models::job::JobPosting;

/// A corpus posting with its features derived once per snapshot.
#[derive(Debug, Clone)]
pub struct IndexedPosting {
    pub posting: JobPosting,
    pub features: DocumentFeatures,
}

#[derive(Debug)]
pub struct EngineSnapshot {
    generation: u64,
    vocabulary: Vocabulary,
    taxonomy: SkillTaxonomy,
    postings: Vec<IndexedPosting>,
}

impl EngineSnapshot {
    /// Builds a snapshot. Without an explicit `vocabulary` one is fitted over
    /// the postings' feature text.
    pub fn build(
        generation: u64,
        postings: Vec<JobPosting>,
        taxonomy: SkillTaxonomy,
        vocabulary: Option<Vocabulary>,
    ) -> Self {
        let documents: Vec<Document> = postings
            .par_iter()
            .map(|p| Document::new(DocumentKind::JobPosting, p.feature_text()))
            .collect();
        let token_seqs: Vec<TokenSequence> = documents
            .par_iter()
            .map(|d| normalize(d.text()))
            .collect();

        let vocabulary = vocabulary.unwrap_or_else(|| Vocabulary::fit(&token_seqs));

        let postings: Vec<IndexedPosting> = postings
            .into_par_iter()
            .zip(token_seqs.par_iter().zip(documents.par_iter()))
            .map(|(posting, (tokens, document))| {
                let features = DocumentFeatures {
                    vector: vectorize(tokens, &vocabulary),
                    skills: taxonomy.extract(document.text()),
                };
                IndexedPosting { posting, features }
            })
            .collect();

        Self {
            generation,
            vocabulary,
            taxonomy,
            postings,
        }
    }

    /// normalize → (vectorize, extract skills)
    /// Resumes are vectorized with presence tf, everything else with raw tf.
    pub fn analyze(&self, document: &Document) -> DocumentFeatures {
        let tokens = normalize(document.text());
        let mode = match document.kind() {
            DocumentKind::Resume => TermFrequency::Presence,
            DocumentKind::JobDescription | DocumentKind::JobPosting => TermFrequency::Raw,
        };
        let features = DocumentFeatures {
            vector: vectorize_with(&tokens, &self.vocabulary, mode),
            skills: self.taxonomy.extract(document.text()),
        };
        debug!(
            "Analyzed {}: {} tokens, {} vocabulary terms, {} skills",
            document.kind().as_str(),
            tokens.len(),
            features.vector.entries().len(),
            features.skills.len()
        );
        features
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn postings(&self) -> &[IndexedPosting] {
        &self.postings
    }
}

/// Where snapshot inputs come from. Re-read on every reload.
#[derive(Debug, Clone)]
pub struct SnapshotSources {
    pub job_dataset_path: PathBuf,
    pub skill_taxonomy_path: Option<PathBuf>,
    pub vocabulary_path: Option<PathBuf>,
}

impl SnapshotSources {
    pub fn load(&self, generation: u64) -> Result<EngineSnapshot> {
        let postings = load_postings(&self.job_dataset_path)?;
        let taxonomy = match &self.skill_taxonomy_path {
            Some(path) => SkillTaxonomy::load(path)?,
            None => SkillTaxonomy::builtin()?,
        };
        let vocabulary = self
            .vocabulary_path
            .as_deref()
            .map(Vocabulary::load)
            .transpose()?;

        let snapshot = EngineSnapshot::build(generation, postings, taxonomy, vocabulary);
        info!(
            "Built engine snapshot #{}: {} postings, {} vocabulary terms, {} skills",
            snapshot.generation,
            snapshot.postings.len(),
            snapshot.vocabulary.len(),
            snapshot.taxonomy.len()
        );
        Ok(snapshot)
    }
}

/// Atomically swappable reference to the active snapshot.
///
/// Reads are a lock-free `ArcSwap` load. Generations only move forward:
/// installing a snapshot that is not newer than the active one is refused,
/// and reloads run one at a time.
pub struct EngineHandle {
    current: ArcSwap<EngineSnapshot>,
    reload_lock: Mutex<()>,
}

impl EngineHandle {
    pub fn new(initial: EngineSnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn snapshot(&self) -> Arc<EngineSnapshot> {
        self.current.load_full()
    }

    /// Installs `next` if its generation is newer than the active one.
    /// Returns whether it was installed.
    pub fn install(&self, next: EngineSnapshot) -> bool {
        self.install_arc(Arc::new(next))
    }

    fn install_arc(&self, next: Arc<EngineSnapshot>) -> bool {
        let previous = self.current.rcu(|current| {
            if next.generation > current.generation {
                Arc::clone(&next)
            } else {
                Arc::clone(current)
            }
        });
        next.generation > previous.generation
    }

    /// Rebuilds from `sources` as the next generation and swaps it in.
    /// On error the active snapshot stays untouched. Blocking: call from
    /// `spawn_blocking`.
    pub fn reload(&self, sources: &SnapshotSources) -> Result<Arc<EngineSnapshot>> {
        let _guard = self.reload_lock.lock();
        let generation = self.current.load().generation + 1;
        let snapshot = Arc::new(sources.load(generation)?);
        if !self.install_arc(Arc::clone(&snapshot)) {
            bail!("Engine snapshot #{generation} was superseded before it could be installed");
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(title: &str, description: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: "Acme".to_string(),
            description: description.to_string(),
            ..Default::default()
        }
    }

    fn sample_snapshot(generation: u64) -> EngineSnapshot {
        EngineSnapshot::build(
            generation,
            vec![
                posting("Rust Engineer", "Rust, Kafka and Kubernetes"),
                posting("Data Scientist", "Python, SQL, PyTorch"),
            ],
            SkillTaxonomy::builtin().unwrap(),
            None,
        )
    }

    #[test]
    fn test_build_indexes_every_posting_in_order() {
        let snapshot = sample_snapshot(0);
        assert_eq!(snapshot.postings().len(), 2);
        assert_eq!(snapshot.postings()[0].posting.title, "Rust Engineer");
        assert!(snapshot.postings()[0].features.skills.contains("kafka"));
        assert!(snapshot.postings()[1].features.skills.contains("pytorch"));
        assert!(!snapshot.postings()[1].features.vector.is_empty());
    }

    #[test]
    fn test_posting_vectors_only_use_vocabulary_indices() {
        let snapshot = sample_snapshot(0);
        for indexed in snapshot.postings() {
            for (idx, _) in indexed.features.vector.entries() {
                assert!(snapshot.vocabulary().term(*idx).is_some());
            }
        }
    }

    #[test]
    fn test_explicit_vocabulary_is_used() {
        let vocab = Vocabulary::fit(&[normalize("rust")]);
        let snapshot = EngineSnapshot::build(
            0,
            vec![posting("Rust Engineer", "Kafka")],
            SkillTaxonomy::builtin().unwrap(),
            Some(vocab),
        );
        assert_eq!(snapshot.vocabulary().len(), 1);
        assert_eq!(snapshot.postings()[0].features.vector.entries().len(), 1);
    }

    #[test]
    fn test_empty_corpus_builds() {
        let snapshot =
            EngineSnapshot::build(0, vec![], SkillTaxonomy::builtin().unwrap(), None);
        assert!(snapshot.postings().is_empty());
        assert!(snapshot.vocabulary().is_empty());
        let features = snapshot.analyze(&Document::resume("Python and AWS"));
        assert!(features.vector.is_empty());
        assert_eq!(features.skills.len(), 2);
    }

    #[test]
    fn test_install_leaves_held_snapshots_intact() {
        let handle = EngineHandle::new(sample_snapshot(0));
        let held = handle.snapshot();
        assert!(handle.install(EngineSnapshot::build(
            7,
            vec![],
            SkillTaxonomy::builtin().unwrap(),
            None,
        )));
        assert_eq!(held.generation(), 0);
        assert_eq!(held.postings().len(), 2);
        assert_eq!(handle.snapshot().generation(), 7);
        assert!(handle.snapshot().postings().is_empty());
    }

    #[test]
    fn test_older_generation_is_never_installed() {
        let handle = EngineHandle::new(sample_snapshot(0));
        assert!(handle.install(sample_snapshot(2)));
        assert!(!handle.install(sample_snapshot(1)));
        assert!(!handle.install(sample_snapshot(2)));
        assert_eq!(handle.snapshot().generation(), 2);
    }

    #[test]
    fn test_concurrent_reloads_only_move_forward() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("job.csv");
        std::fs::write(&csv, "Job_Title,Company_Name\nRust Engineer,Acme\n").unwrap();
        let sources = SnapshotSources {
            job_dataset_path: csv,
            skill_taxonomy_path: None,
            vocabulary_path: None,
        };
        let handle = EngineHandle::new(sample_snapshot(0));

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    let mut last = 0;
                    for _ in 0..5 {
                        let reloaded = handle.reload(&sources).unwrap();
                        assert!(reloaded.generation() > last);
                        last = reloaded.generation();
                        assert!(handle.snapshot().generation() >= last);
                    }
                });
            }
        });
        assert_eq!(handle.snapshot().generation(), 20);
    }

    #[test]
    fn test_resume_repeats_do_not_change_its_vector() {
        let snapshot = sample_snapshot(0);
        let once = snapshot.analyze(&Document::resume("Rust engineer with Kafka"));
        let repeated =
            snapshot.analyze(&Document::resume("Rust engineer with Kafka Kafka Kafka rust"));
        assert_eq!(once.vector, repeated.vector);
        assert_eq!(once.skills, repeated.skills);

        let target = snapshot.analyze(&Document::job_description("Kafka Kafka Rust"));
        let single = snapshot.analyze(&Document::job_description("Kafka Rust"));
        assert_ne!(target.vector, single.vector);
    }

    #[test]
    fn test_reload_from_sources() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("job.csv");
        std::fs::write(&csv, "Job_Title,Company_Name,Description\nRust Engineer,Acme,Tokio\n")
            .unwrap();
        let sources = SnapshotSources {
            job_dataset_path: csv.clone(),
            skill_taxonomy_path: None,
            vocabulary_path: None,
        };

        let handle = EngineHandle::new(sources.load(0).unwrap());
        assert_eq!(handle.snapshot().postings().len(), 1);

        std::fs::write(&csv, "Job_Title,Company_Name\nA,x\nB,y\n").unwrap();
        let reloaded = handle.reload(&sources).unwrap();
        assert_eq!(reloaded.generation(), 1);
        assert_eq!(handle.snapshot().postings().len(), 2);
    }

    #[test]
    fn test_failed_reload_keeps_active_snapshot() {
        let handle = EngineHandle::new(sample_snapshot(0));
        let sources = SnapshotSources {
            job_dataset_path: PathBuf::from("/definitely/not/here.csv"),
            skill_taxonomy_path: None,
            vocabulary_path: None,
        };
        assert!(handle.reload(&sources).is_err());
        assert_eq!(handle.snapshot().generation(), 0);
        assert_eq!(handle.snapshot().postings().len(), 2);
    }
}
