//! Label decoding from classifier output classes to condition names.

use serde::{Deserialize, Serialize};

use crate::error::{MedReportError, Result};

/// Mapping from numeric classifier output back to condition names
///
/// Fitted once at training time; `classes` is ordered so that class `i`
/// decodes to `classes[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Condition names, indexed by class
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Decode a class index into its condition name
    ///
    /// # Errors
    /// Returns a model error if the class index is outside the fitted set.
    pub fn decode(&self, class: usize) -> Result<&str> {
        self.classes
            .get(class)
            .map(String::as_str)
            .ok_or_else(|| {
                MedReportError::Model(format!(
                    "class {class} outside encoder range (have {} classes)",
                    self.classes.len()
                ))
            })
    }

    /// Number of known classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether the encoder has no classes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_in_fitted_order() {
        let encoder = LabelEncoder {
            classes: vec!["Allergy".to_string(), "GERD".to_string()],
        };
        assert_eq!(encoder.decode(0).unwrap(), "Allergy");
        assert_eq!(encoder.decode(1).unwrap(), "GERD");
    }

    #[test]
    fn out_of_range_class_is_an_error() {
        let encoder = LabelEncoder {
            classes: vec!["Allergy".to_string()],
        };
        assert!(encoder.decode(1).is_err());
    }
}
