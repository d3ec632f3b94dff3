//! Error handling for `medreport`.

use std::io;

/// Specialized error type for `medreport` operations
#[derive(Debug, thiserror::Error)]
pub enum MedReportError {
    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error loading or validating a model artifact
    #[error("Model error: {0}")]
    Model(String),

    /// Error parsing a JSON artifact
    #[error("Artifact parse error: {0}")]
    Artifact(#[from] serde_json::Error),

    /// A selected symptom is not part of the model vocabulary
    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    /// Prediction requested without any symptoms selected
    #[error("No symptoms selected")]
    NoSymptoms,

    /// Uploaded file is neither a PDF nor a supported image
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// A required external binary could not be located
    #[error("Required binary not found: {0}")]
    MissingBinary(String),

    /// Text extraction failed
    #[error("Could not process document: {0}")]
    Extraction(String),

    /// Encrypted PDF could not be opened, even with an empty password
    #[error("Could not decrypt PDF: {0}")]
    Decryption(String),

    /// OCR engine failure
    #[error("OCR failed: {0}")]
    Ocr(String),
}

/// Result type for `medreport` operations
pub type Result<T> = std::result::Result<T, MedReportError>;
