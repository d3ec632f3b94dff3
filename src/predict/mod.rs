//! Symptom-based condition prediction.
//!
//! A `SymptomModel` bundles the three artifacts produced by offline
//! training: the ordered symptom vocabulary, a decision tree classifier, and
//! the label encoder that maps class indices back to condition names. The
//! bundle is loaded read-only at startup from a single JSON document and is
//! never mutated at runtime.
//!
//! Prediction is deterministic: a selected subset of symptom names is turned
//! into a fixed-order binary vector (1 where selected, 0 otherwise), the
//! tree predicts a class, and the encoder decodes it.

pub mod label;
pub mod tree;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MedReportError, Result};
pub use label::LabelEncoder;
pub use tree::{DecisionTree, TreeNode};

/// Pretrained symptom classifier with its vocabulary and label decoder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomModel {
    /// Symptom names in training-column order
    pub symptoms: Vec<String>,
    /// The decision tree classifier
    pub tree: DecisionTree,
    /// Decoder from class index to condition name
    pub encoder: LabelEncoder,
}

impl SymptomModel {
    /// Load and validate a model artifact from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            MedReportError::Model(format!("cannot open {}: {e}", path.display()))
        })?;
        let model: Self = serde_json::from_reader(BufReader::new(file))?;
        model.validate()?;
        debug!(
            "Loaded symptom model: {} symptoms, {} conditions, {} tree nodes",
            model.symptoms.len(),
            model.encoder.len(),
            model.tree.nodes.len()
        );
        Ok(model)
    }

    /// The ordered symptom vocabulary
    #[must_use]
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    /// Build the fixed-order binary feature vector for a symptom selection
    ///
    /// # Errors
    /// Returns `NoSymptoms` for an empty selection and `UnknownSymptom` for
    /// any name outside the vocabulary.
    pub fn vectorize(&self, selected: &[String]) -> Result<Vec<f32>> {
        if selected.is_empty() {
            return Err(MedReportError::NoSymptoms);
        }

        let mut vector = vec![0.0; self.symptoms.len()];
        for name in selected {
            let index = self
                .symptoms
                .iter()
                .position(|s| s == name)
                .ok_or_else(|| MedReportError::UnknownSymptom(name.clone()))?;
            vector[index] = 1.0;
        }
        Ok(vector)
    }

    /// Predict the condition name for a symptom selection
    pub fn predict(&self, selected: &[String]) -> Result<String> {
        let vector = self.vectorize(selected)?;
        let class = self.tree.predict(&vector)?;
        let condition = self.encoder.decode(class)?;
        debug!("Predicted class {class} ({condition}) from {} symptoms", selected.len());
        Ok(condition.to_string())
    }

    fn validate(&self) -> Result<()> {
        if self.symptoms.is_empty() {
            return Err(MedReportError::Model("empty symptom vocabulary".to_string()));
        }
        if self.encoder.is_empty() {
            return Err(MedReportError::Model("empty label encoder".to_string()));
        }
        self.tree.validate(self.symptoms.len(), self.encoder.len())
    }
}
