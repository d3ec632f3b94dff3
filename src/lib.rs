//! A medical lab-report analyzer and symptom checker.
//!
//! Two independent pipelines behind one HTTP shell:
//!
//! - **Symptom Predictor** ([`predict`]): a pretrained decision tree over a
//!   fixed-order binary symptom vector, decoded to a condition name.
//! - **Report Analyzer** ([`extract`] + [`analyze`]): text extraction from
//!   uploaded PDFs/images (direct extraction with an OCR fallback for
//!   scanned documents), then regex-based biomarker parsing flagged against
//!   static reference ranges.
//!
//! The pipelines are plain synchronous code and fully usable without the
//! HTTP layer in [`api`].

pub mod analyze;
pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod predict;

// Re-export the most common types for easier use
pub use analyze::{
    Biomarker, BiomarkerResult, ReportAnalysis, ReportMetadata, Sex, Status, analyze_report,
    analyze_text,
};
pub use config::AppConfig;
pub use error::{MedReportError, Result};
pub use extract::{
    DocumentExtractor, DocumentKind, ExtractedDocument, ExtractionMethod, OcrEngine, PdfBackend,
};
pub use predict::SymptomModel;
