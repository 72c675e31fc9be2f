//! Feature Vectorizer: TF-IDF weighted, L2-normalized sparse vectors.
//!
//! The `Vocabulary` is fitted once over a reference corpus (offline or at
//! snapshot build) and shared read-only afterwards. Per-request vectorization
//! only looks terms up; terms the vocabulary has never seen contribute nothing.
//!
//! Targets (job descriptions, postings) use raw tf. Resumes use presence tf,
//! so repeating a term in a resume can never pull its vector away from a
//! target.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::matching::normalizer::TokenSequence;

/// On-disk shape of a vocabulary snapshot. `terms[i]` has weight `idf[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyFile {
    terms: Vec<String>,
    idf: Vec<f64>,
}

/// Dense term → index mapping plus per-index inverse document frequency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "VocabularyFile", into = "VocabularyFile")]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f64>,
    index: HashMap<String, u32>,
}

impl TryFrom<VocabularyFile> for Vocabulary {
    type Error = String;

    fn try_from(file: VocabularyFile) -> Result<Self, Self::Error> {
        if file.terms.len() != file.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but {} idf weights",
                file.terms.len(),
                file.idf.len()
            ));
        }
        if let Some(bad) = file.idf.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(format!("idf weights must be finite and non-negative, got {bad}"));
        }
        let mut index = HashMap::with_capacity(file.terms.len());
        for (i, term) in file.terms.iter().enumerate() {
            if index.insert(term.clone(), i as u32).is_some() {
                return Err(format!("duplicate vocabulary term '{term}'"));
            }
        }
        Ok(Self {
            terms: file.terms,
            idf: file.idf,
            index,
        })
    }
}

impl From<Vocabulary> for VocabularyFile {
    fn from(vocab: Vocabulary) -> Self {
        Self {
            terms: vocab.terms,
            idf: vocab.idf,
        }
    }
}

impl Vocabulary {
    /// Fits a vocabulary over a reference corpus.
    ///
    /// Indices are assigned in lexicographic term order so the same corpus
    /// always yields the same snapshot. IDF uses the smoothed form
    /// `ln((1 + N) / (1 + df)) + 1`, which stays positive for terms that
    /// occur in every document.
    pub fn fit<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a TokenSequence>,
    {
        let mut doc_freq: BTreeMap<&'a str, u32> = BTreeMap::new();
        let mut num_docs = 0u32;

        for doc in documents {
            num_docs += 1;
            let unique: HashSet<&'a str> = doc.terms().iter().map(String::as_str).collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let n = num_docs as f64;
        let mut terms = Vec::with_capacity(doc_freq.len());
        let mut idf = Vec::with_capacity(doc_freq.len());
        let mut index = HashMap::with_capacity(doc_freq.len());

        for (i, (term, df)) in doc_freq.into_iter().enumerate() {
            index.insert(term.to_string(), i as u32);
            terms.push(term.to_string());
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
        }

        Self { terms, idf, index }
    }

    /// Loads a JSON vocabulary snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vocabulary file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid vocabulary file {}", path.display()))
    }

    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.index.get(term).copied()
    }

    pub fn idf(&self, index: u32) -> Option<f64> {
        self.idf.get(index as usize).copied()
    }

    pub fn term(&self, index: u32) -> Option<&str> {
        self.terms.get(index as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Sparse TF-IDF vector: `(vocabulary index, weight)` pairs sorted by index,
/// zero weights omitted. Non-empty vectors have unit L2 norm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(u32, f64)>,
}

impl FeatureVector {
    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    /// Dot product via a merge walk over both sorted index lists.
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// How occurrences of a term turn into its tf factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermFrequency {
    /// Occurrence count.
    Raw,
    /// 1 for every present term. Repeating a term leaves the vector unchanged.
    Presence,
}

/// Builds the L2-normalized TF-IDF vector of `tokens` under `vocab`.
/// Weight per term = raw term frequency × IDF.
pub fn vectorize(tokens: &TokenSequence, vocab: &Vocabulary) -> FeatureVector {
    vectorize_with(tokens, vocab, TermFrequency::Raw)
}

/// `vectorize` with an explicit tf mode.
pub fn vectorize_with(
    tokens: &TokenSequence,
    vocab: &Vocabulary,
    mode: TermFrequency,
) -> FeatureVector {
    let mut tf: HashMap<u32, u32> = HashMap::new();
    for term in tokens.iter() {
        if let Some(idx) = vocab.index_of(term) {
            let count = tf.entry(idx).or_insert(0);
            match mode {
                TermFrequency::Raw => *count += 1,
                TermFrequency::Presence => *count = 1,
            }
        }
    }

    let mut entries: Vec<(u32, f64)> = tf
        .into_iter()
        .filter_map(|(idx, count)| {
            let weight = count as f64 * vocab.idf(idx)?;
            (weight > 0.0).then_some((idx, weight))
        })
        .collect();
    entries.sort_unstable_by_key(|(idx, _)| *idx);

    let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
    if norm > 0.0 {
        for (_, w) in entries.iter_mut() {
            *w /= norm;
        }
    }

    FeatureVector { entries }
}
