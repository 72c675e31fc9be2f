use std::sync::Arc;

use crate::config::Config;
use crate::matching::feedback::FeedbackGenerator;
use crate::matching::ranker::JobRanker;
use crate::matching::snapshot::{EngineHandle, SnapshotSources};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Active engine snapshot; swapped wholesale on reload.
    pub engine: Arc<EngineHandle>,
    /// Rule-based feedback, plus the semantic provider when one is configured.
    pub feedback: FeedbackGenerator,
    pub ranker: Arc<JobRanker>,
    pub sources: SnapshotSources,
    pub config: Config,
}
