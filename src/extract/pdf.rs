//! PDF text extraction and page rasterization via the Poppler binaries.
//!
//! `pdftotext` handles text-based PDFs; `pdftoppm` rasterizes scanned ones
//! so the OCR engine can read them page by page. Encrypted PDFs get exactly
//! one retry with an explicit empty user password before a decryption
//! failure is reported.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::debug;

use crate::error::{MedReportError, Result};

/// Install prefixes searched after `PATH`
const BINARY_PREFIXES: [&str; 3] = ["/opt/homebrew/bin", "/usr/local/bin", "/usr/bin"];

/// Locate an external binary
///
/// When `dir` is given (the `POPPLER_PATH` case) the binary must live
/// there; otherwise `PATH` and the usual install prefixes are searched.
pub(crate) fn find_binary(name: &str, dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        let candidate = dir.join(name);
        if candidate.exists() {
            return Ok(candidate);
        }
        return Err(MedReportError::MissingBinary(format!(
            "{name} not found in {}",
            dir.display()
        )));
    }

    if let Some(paths) = env::var_os("PATH") {
        for path in env::split_paths(&paths) {
            let candidate = path.join(name);
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    for prefix in BINARY_PREFIXES {
        let candidate = Path::new(prefix).join(name);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    Err(MedReportError::MissingBinary(name.to_string()))
}

/// Backend for the two PDF operations the extractor needs
///
/// Trait seam so the extraction policy can be tested without Poppler.
pub trait PdfBackend: Send + Sync {
    /// Extract embedded text from a PDF
    fn extract_text(&self, pdf: &Path) -> Result<String>;

    /// Rasterize each page of a PDF into an image under `out_dir`,
    /// returning the page images in page order
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>>;
}

/// Poppler `pdftotext`/`pdftoppm` wrapper
pub struct PopplerTools {
    pdftotext: PathBuf,
    pdftoppm: PathBuf,
}

impl PopplerTools {
    /// Locate the Poppler binaries, preferring an explicit directory
    pub fn discover(poppler_dir: Option<&Path>) -> Result<Self> {
        let pdftotext = find_binary("pdftotext", poppler_dir)?;
        let pdftoppm = find_binary("pdftoppm", poppler_dir)?;
        debug!(
            "Using Poppler binaries {} and {}",
            pdftotext.display(),
            pdftoppm.display()
        );
        Ok(Self { pdftotext, pdftoppm })
    }

    fn run_pdftotext(
        &self,
        pdf: &Path,
        password: Option<&str>,
    ) -> std::result::Result<String, String> {
        let mut cmd = Command::new(&self.pdftotext);
        cmd.arg("-layout");
        if let Some(pw) = password {
            cmd.args(["-upw", pw]);
        }
        cmd.arg(pdf).arg("-");

        let output = cmd.output().map_err(|e| e.to_string())?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).into_owned())
        }
    }

    fn run_pdftoppm(
        &self,
        pdf: &Path,
        prefix: &Path,
        password: Option<&str>,
    ) -> std::result::Result<(), String> {
        let mut cmd = Command::new(&self.pdftoppm);
        cmd.args(["-r", "200", "-png"]);
        if let Some(pw) = password {
            cmd.args(["-upw", pw]);
        }
        cmd.arg(pdf).arg(prefix);

        let output = cmd.output().map_err(|e| e.to_string())?;
        if output.status.success() {
            Ok(())
        } else {
            Err(String::from_utf8_lossy(&output.stderr).into_owned())
        }
    }
}

impl PdfBackend for PopplerTools {
    fn extract_text(&self, pdf: &Path) -> Result<String> {
        match self.run_pdftotext(pdf, None) {
            Ok(text) => Ok(text),
            Err(stderr) if is_encryption_error(&stderr) => {
                debug!("PDF reports encryption; retrying once with an empty password");
                match self.run_pdftotext(pdf, Some("")) {
                    Ok(text) => Ok(text),
                    Err(stderr) if is_encryption_error(&stderr) => Err(
                        MedReportError::Decryption("PDF is password-protected".to_string()),
                    ),
                    Err(stderr) => Err(MedReportError::Extraction(format!(
                        "pdftotext failed: {}",
                        stderr.trim()
                    ))),
                }
            }
            Err(stderr) => Err(MedReportError::Extraction(format!(
                "pdftotext failed: {}",
                stderr.trim()
            ))),
        }
    }

    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let prefix = out_dir.join("page");

        if let Err(stderr) = self.run_pdftoppm(pdf, &prefix, None) {
            if !is_encryption_error(&stderr) {
                return Err(MedReportError::Extraction(format!(
                    "pdftoppm failed: {}",
                    stderr.trim()
                )));
            }
            match self.run_pdftoppm(pdf, &prefix, Some("")) {
                Ok(()) => {}
                Err(stderr) if is_encryption_error(&stderr) => {
                    return Err(MedReportError::Decryption(
                        "PDF is password-protected".to_string(),
                    ));
                }
                Err(stderr) => {
                    return Err(MedReportError::Extraction(format!(
                        "pdftoppm failed: {}",
                        stderr.trim()
                    )));
                }
            }
        }

        // pdftoppm zero-pads page numbers, so lexicographic order is page order
        let mut pages: Vec<PathBuf> = std::fs::read_dir(out_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .collect();
        pages.sort();

        if pages.is_empty() {
            return Err(MedReportError::Extraction(
                "pdftoppm produced no page images".to_string(),
            ));
        }
        Ok(pages)
    }
}

fn is_encryption_error(stderr: &str) -> bool {
    let lower = stderr.to_ascii_lowercase();
    lower.contains("incorrect password")
        || lower.contains("encrypted")
        || lower.contains("copying of text")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_poppler_encryption_messages() {
        assert!(is_encryption_error("Error: Incorrect password"));
        assert!(is_encryption_error(
            "Command Line Error: Incorrect password\n"
        ));
        assert!(is_encryption_error("Error: Document is encrypted"));
        assert!(!is_encryption_error("Error: Couldn't open file"));
    }

    #[test]
    fn missing_binary_reports_the_directory_when_given() {
        let err = find_binary("pdftotext", Some(Path::new("/nonexistent"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent"));
    }

    #[cfg(unix)]
    mod encrypted {
        use std::fs;
        use std::path::Path;

        use tempfile::TempDir;

        use crate::error::MedReportError;
        use crate::extract::pdf::{PdfBackend, PopplerTools};

        fn fake_binary(dir: &Path, name: &str, script: &str) -> std::path::PathBuf {
            use std::os::unix::fs::PermissionsExt;
            let path = dir.join(name);
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path
        }

        /// pdftotext that only unlocks when an empty `-upw` is supplied
        const LOCKED_PDFTOTEXT: &str = "#!/bin/sh\n\
            case \"$*\" in\n\
              *-upw*) printf 'unlocked report text' ;;\n\
              *) echo 'Command Line Error: Incorrect password' >&2; exit 1 ;;\n\
            esac\n";

        /// pdftoppm with the same unlock behavior; writes one page image
        const LOCKED_PDFTOPPM: &str = "#!/bin/sh\n\
            for a in \"$@\"; do last=\"$a\"; done\n\
            case \"$*\" in\n\
              *-upw*) : > \"${last}-1.png\" ;;\n\
              *) echo 'Error: Document is encrypted' >&2; exit 1 ;;\n\
            esac\n";

        const ALWAYS_LOCKED: &str = "#!/bin/sh\n\
            echo 'Command Line Error: Incorrect password' >&2\n\
            exit 1\n";

        fn tools(pdftotext: &str, pdftoppm: &str) -> (TempDir, PopplerTools) {
            let bin = TempDir::new().unwrap();
            fake_binary(bin.path(), "pdftotext", pdftotext);
            fake_binary(bin.path(), "pdftoppm", pdftoppm);
            let tools = PopplerTools::discover(Some(bin.path())).unwrap();
            (bin, tools)
        }

        #[test]
        fn empty_password_retry_unlocks_text_extraction() {
            let (_bin, tools) = tools(LOCKED_PDFTOTEXT, LOCKED_PDFTOPPM);
            let text = tools.extract_text(Path::new("locked.pdf")).unwrap();
            assert_eq!(text, "unlocked report text");
        }

        #[test]
        fn empty_password_retry_unlocks_rasterization() {
            let (_bin, tools) = tools(LOCKED_PDFTOTEXT, LOCKED_PDFTOPPM);
            let out = TempDir::new().unwrap();
            let pages = tools.rasterize(Path::new("locked.pdf"), out.path()).unwrap();
            assert_eq!(pages.len(), 1);
            assert!(pages[0].file_name().unwrap().to_str().unwrap().ends_with(".png"));
        }

        #[test]
        fn still_locked_after_retry_is_a_decryption_failure() {
            let (_bin, tools) = tools(ALWAYS_LOCKED, ALWAYS_LOCKED);
            assert!(matches!(
                tools.extract_text(Path::new("locked.pdf")),
                Err(MedReportError::Decryption(_))
            ));
            let out = TempDir::new().unwrap();
            assert!(matches!(
                tools.rasterize(Path::new("locked.pdf"), out.path()),
                Err(MedReportError::Decryption(_))
            ));
        }
    }
}
