//! OCR engine abstraction over the Tesseract binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{MedReportError, Result};
use crate::extract::pdf::find_binary;

/// An engine that turns a page image into text
///
/// Trait seam so the extraction policy can be tested with a mock engine.
pub trait OcrEngine: Send + Sync {
    /// Run OCR over a single image file
    fn image_to_text(&self, image: &Path) -> Result<String>;
}

/// Tesseract-backed OCR engine
pub struct TesseractOcr {
    cmd: PathBuf,
}

impl TesseractOcr {
    /// Locate the tesseract executable
    ///
    /// An explicit override wins; otherwise `PATH` and the usual install
    /// prefixes are searched.
    pub fn discover(override_cmd: Option<&Path>) -> Result<Self> {
        if let Some(cmd) = override_cmd {
            if !cmd.exists() {
                return Err(MedReportError::MissingBinary(format!(
                    "tesseract not found at {}",
                    cmd.display()
                )));
            }
            return Ok(Self {
                cmd: cmd.to_path_buf(),
            });
        }

        let cmd = find_binary("tesseract", None)?;
        debug!("Using tesseract at {}", cmd.display());
        Ok(Self { cmd })
    }
}

impl OcrEngine for TesseractOcr {
    fn image_to_text(&self, image: &Path) -> Result<String> {
        let output = Command::new(&self.cmd)
            .arg(image)
            .arg("stdout")
            .args(["-l", "eng", "--psm", "6"])
            .output()
            .map_err(|e| MedReportError::Ocr(format!("failed to run tesseract: {e}")))?;

        if !output.status.success() {
            return Err(MedReportError::Ocr(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_override_must_exist() {
        let missing = Path::new("/nonexistent/tesseract");
        assert!(matches!(
            TesseractOcr::discover(Some(missing)),
            Err(MedReportError::MissingBinary(_))
        ));
    }
}
