//! Text Normalizer: turns raw document text into comparable terms.
//!
//! Two views of the same text are produced:
//! - `normalize` → stemmed, stopword-free `TokenSequence` for TF-IDF vectorization
//! - `lexemes`  → case-folded surface tokens for skill alias matching
//!   (no stemming, no stopwords, `+`/`#` kept so `c++` and `c#` survive)
//!
//! Both are pure functions of their input.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}]+").expect("valid regex");
    static ref LEXEME_RE: Regex = Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}+#]*").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = STOPWORD_LIST.iter().copied().collect();
}

/// Tokens shorter than this (in chars) are dropped from the TF-IDF view.
const MIN_TERM_CHARS: usize = 2;

const STOPWORD_LIST: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "don", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where",
    "which", "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    "yourself", "yourselves",
];

/// Ordered sequence of normalized terms derived from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSequence(Vec<String>);

impl TokenSequence {
    pub fn terms(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for TokenSequence {
    fn from(terms: Vec<String>) -> Self {
        Self(terms)
    }
}

fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Case-folds, strips punctuation, drops digit-only and short tokens,
/// removes stopwords and stems what remains (Snowball English), so
/// "developing" and "developer" both become "develop".
pub fn normalize(text: &str) -> TokenSequence {
    let folded = fold(text);
    let terms = WORD_RE
        .find_iter(&folded)
        .map(|m| m.as_str())
        .filter(|token| !token.chars().all(|c| c.is_numeric()))
        .filter(|token| token.chars().count() >= MIN_TERM_CHARS)
        .filter(|token| !is_stopword(token))
        .map(|token| STEMMER.stem(token).into_owned())
        .collect();
    TokenSequence(terms)
}

/// Surface tokens used for phrase matching against skill aliases.
///
/// Separators such as `/`, `.` and `-` split tokens, so "CI/CD" lexes to
/// `["ci", "cd"]` and "Node.js" to `["node", "js"]`; aliases are lexed the
/// same way, which turns them into multi-token phrases.
pub fn lexemes(text: &str) -> Vec<String> {
    let folded = fold(text);
    LEXEME_RE
        .find_iter(&folded)
        .map(|m| m.as_str().to_string())
        .collect()
}
