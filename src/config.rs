//! Runtime configuration for `medreport`.

use std::env;
use std::path::PathBuf;

/// Configuration for the analyzer service
///
/// All fields have working defaults; `from_env` overrides them from the
/// environment:
///
/// - `MEDREPORT_MODEL` — path to the symptom model artifact
/// - `MEDREPORT_ADDR` — HTTP bind address
/// - `POPPLER_PATH` — directory holding the `pdftotext`/`pdftoppm` binaries
/// - `MEDREPORT_TESSERACT` — explicit path to the `tesseract` executable
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the serialized symptom model (tree + label encoder + symptoms)
    pub model_path: PathBuf,
    /// Address the HTTP server binds to
    pub bind_addr: String,
    /// Directory containing the Poppler binaries, if not on `PATH`
    pub poppler_path: Option<PathBuf>,
    /// Explicit tesseract executable, if not on `PATH`
    pub tesseract_cmd: Option<PathBuf>,
    /// Minimum trimmed length for direct PDF text extraction to be accepted;
    /// anything at or below this is treated as a scanned document
    pub min_direct_text_len: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("data/symptom_model.json"),
            bind_addr: "0.0.0.0:8080".to_string(),
            poppler_path: None,
            tesseract_cmd: None,
            min_direct_text_len: 50,
        }
    }
}

impl AppConfig {
    /// Build a configuration from the environment, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("MEDREPORT_MODEL") {
            config.model_path = PathBuf::from(path);
        }
        if let Ok(addr) = env::var("MEDREPORT_ADDR") {
            config.bind_addr = addr;
        }
        if let Ok(dir) = env::var("POPPLER_PATH") {
            config.poppler_path = Some(PathBuf::from(dir));
        }
        if let Ok(cmd) = env::var("MEDREPORT_TESSERACT") {
            config.tesseract_cmd = Some(PathBuf::from(cmd));
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_extraction_policy() {
        let config = AppConfig::default();
        assert_eq!(config.min_direct_text_len, 50);
        assert!(config.poppler_path.is_none());
        assert!(config.tesseract_cmd.is_none());
    }
}
