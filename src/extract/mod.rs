//! Document text extraction.
//!
//! Extraction policy for uploaded lab reports:
//!
//! 1. PDFs get direct text extraction first. If the trimmed text is longer
//!    than the configured threshold (50 characters by default) it is
//!    accepted as-is.
//! 2. Otherwise the document is treated as scanned: every page is
//!    rasterized and run through OCR, and the page texts are concatenated.
//! 3. Images skip straight to OCR.
//!
//! Encrypted PDFs are retried once with an empty password by the PDF
//! backend; anything still locked after that surfaces as a decryption
//! failure. All temporary page images live in a `TempDir` scoped to the
//! single extraction call.

pub mod ocr;
pub mod pdf;

use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::Serialize;
use tempfile::TempDir;

use crate::config::AppConfig;
use crate::error::{MedReportError, Result};
pub use ocr::{OcrEngine, TesseractOcr};
pub use pdf::{PdfBackend, PopplerTools};

/// Kind of uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// A PDF document
    Pdf,
    /// A raster image (PNG or JPEG)
    Image,
}

impl DocumentKind {
    /// Detect the document kind from magic bytes, falling back to the
    /// file name extension
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Result<Self> {
        if bytes.starts_with(b"%PDF-") {
            return Ok(Self::Pdf);
        }
        if bytes.starts_with(&[0x89, b'P', b'N', b'G']) || bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Ok(Self::Image);
        }

        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("png" | "jpg" | "jpeg") => Ok(Self::Image),
            _ => Err(MedReportError::UnsupportedFormat(
                file_name.unwrap_or("unnamed upload").to_string(),
            )),
        }
    }
}

/// How the text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Embedded PDF text, no OCR involved
    DirectText,
    /// Rasterization + OCR
    Ocr,
}

/// Result of a single extraction call
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    /// The extracted raw text
    pub text: String,
    /// How the text was obtained
    pub method: ExtractionMethod,
    /// Number of pages processed
    pub page_count: usize,
}

/// Orchestrates PDF extraction, rasterization, and OCR
pub struct DocumentExtractor {
    pdf: Box<dyn PdfBackend>,
    ocr: Box<dyn OcrEngine>,
    min_direct_text_len: usize,
}

impl DocumentExtractor {
    /// Build an extractor from explicit backends
    #[must_use]
    pub fn new(
        pdf: Box<dyn PdfBackend>,
        ocr: Box<dyn OcrEngine>,
        min_direct_text_len: usize,
    ) -> Self {
        Self {
            pdf,
            ocr,
            min_direct_text_len,
        }
    }

    /// Build an extractor with the real Poppler and Tesseract backends
    ///
    /// # Errors
    /// Fails when any of the external binaries cannot be located.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let poppler = PopplerTools::discover(config.poppler_path.as_deref())?;
        let tesseract = TesseractOcr::discover(config.tesseract_cmd.as_deref())?;
        Ok(Self::new(
            Box::new(poppler),
            Box::new(tesseract),
            config.min_direct_text_len,
        ))
    }

    /// Extract text from an uploaded document
    pub fn extract(&self, bytes: &[u8], kind: DocumentKind) -> Result<ExtractedDocument> {
        let scratch = TempDir::new()?;
        let extension = match kind {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Image => "png",
        };
        let input = scratch.path().join(format!("upload.{extension}"));
        fs::write(&input, bytes)?;

        match kind {
            DocumentKind::Pdf => self.extract_pdf(&scratch, &input),
            DocumentKind::Image => {
                let text = self.ocr.image_to_text(&input)?;
                Ok(ExtractedDocument {
                    text,
                    method: ExtractionMethod::Ocr,
                    page_count: 1,
                })
            }
        }
    }

    fn extract_pdf(&self, scratch: &TempDir, pdf: &Path) -> Result<ExtractedDocument> {
        match self.pdf.extract_text(pdf) {
            Ok(text) if text.trim().len() > self.min_direct_text_len => {
                // pdftotext separates pages with form feeds
                let page_count = text.matches('\u{c}').count().max(1);
                debug!("PDF is text-based, using direct extraction");
                return Ok(ExtractedDocument {
                    text,
                    method: ExtractionMethod::DirectText,
                    page_count,
                });
            }
            Ok(_) => {
                debug!("Direct extraction yielded little content, assuming a scanned PDF");
            }
            Err(err @ MedReportError::Decryption(_)) => return Err(err),
            Err(err @ MedReportError::MissingBinary(_)) => return Err(err),
            Err(err) => {
                warn!("Direct text extraction failed: {err}");
            }
        }

        let pages = self.pdf.rasterize(pdf, scratch.path())?;
        let mut text = String::new();
        for (index, page) in pages.iter().enumerate() {
            debug!("OCR on page {} of {}", index + 1, pages.len());
            text.push_str(&self.ocr.image_to_text(page)?);
            text.push('\n');
        }

        Ok(ExtractedDocument {
            text,
            method: ExtractionMethod::Ocr,
            page_count: pages.len(),
        })
    }
}
