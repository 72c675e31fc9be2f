// Matching and ranking engine.
// Pipeline: normalize → (vectorize, extract skills) → score → feedback | rank.
// Nothing in here touches HTTP; handlers.rs is the only axum-facing file.

pub mod feedback;
pub mod handlers;
pub mod matcher;
pub mod normalizer;
pub mod prompts;
pub mod ranker;
pub mod scorer;
pub mod skills;
pub mod snapshot;
pub mod vectorizer;
