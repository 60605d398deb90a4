use crate::extraction::TimecardExtractor;
use std::sync::Arc;

/// Shared application state for HTTP handlers
///
/// Built once at startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Vision model client used by the upload endpoint
    pub extractor: Arc<dyn TimecardExtractor>,
}

impl AppState {
    pub fn new(extractor: Arc<dyn TimecardExtractor>) -> Self {
        Self { extractor }
    }
}
