use std::sync::Arc;

use crate::parsing::parser::ResumeParser;
use crate::store::Storage;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Default: MemStorage. A durable backend slots
    /// in behind the same trait.
    pub store: Arc<dyn Storage>,
    /// Pluggable resume parser. Default: LlmResumeParser over the two
    /// provider clients; tests inject a canned implementation.
    pub parser: Arc<dyn ResumeParser>,
}
