use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::config::Config;
use crate::extraction::DocumentTextExtractor;
use crate::skills::dictionary::SkillDictionary;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is mutated after startup; analyses share no other state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub dictionary: Arc<SkillDictionary>,
    pub extractor: Arc<DocumentTextExtractor>,
    /// Bounds concurrent PDF extractions, which are the ones that may rasterize and OCR.
    pub ocr_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(
        config: Config,
        dictionary: SkillDictionary,
        extractor: DocumentTextExtractor,
    ) -> Self {
        let ocr_permits = Arc::new(Semaphore::new(config.ocr_max_concurrency.max(1)));
        Self {
            config,
            dictionary: Arc::new(dictionary),
            extractor: Arc::new(extractor),
            ocr_permits,
        }
    }
}
