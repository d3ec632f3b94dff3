//! Shared application state.

use std::sync::Arc;

use crate::extract::DocumentExtractor;
use crate::predict::SymptomModel;

/// Read-only state shared across requests
///
/// The model is always present; the extractor is `None` when the external
/// Poppler/Tesseract binaries could not be located at startup, in which case
/// the analyzer endpoint reports that instead of failing the whole service.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<SymptomModel>,
    pub extractor: Option<Arc<DocumentExtractor>>,
}

impl AppState {
    /// Create the shared state
    #[must_use]
    pub fn new(model: Arc<SymptomModel>, extractor: Option<Arc<DocumentExtractor>>) -> Self {
        Self { model, extractor }
    }
}
