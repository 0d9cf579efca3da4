//! Shared, read-only request collaborators.

use std::sync::Arc;

use fatgen_core::{ComplianceRules, ExtractionClient};
use fatgen_pdf::ProcedureRenderer;

/// Everything a handler needs, all injectable so tests can swap in fakes.
/// The rule set and clients are immutable; requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn ExtractionClient>,
    pub renderer: Arc<dyn ProcedureRenderer>,
    pub rules: Arc<ComplianceRules>,
}

impl AppState {
    pub fn new(
        extractor: Arc<dyn ExtractionClient>,
        renderer: Arc<dyn ProcedureRenderer>,
        rules: ComplianceRules,
    ) -> Self {
        Self {
            extractor,
            renderer,
            rules: Arc::new(rules),
        }
    }
}
