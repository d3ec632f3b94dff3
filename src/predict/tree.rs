//! Decision tree inference over a serialized node array.
//!
//! The tree is trained offline and exported as a flat array of nodes.
//! Internal nodes carry a feature index and a split threshold; leaves carry
//! the predicted class index. Prediction walks from node 0, going left when
//! `x[feature] <= threshold`.

use serde::{Deserialize, Serialize};

use crate::error::{MedReportError, Result};

/// A single node of the serialized decision tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Feature index tested at this node; `None` for leaves
    #[serde(default)]
    pub feature: Option<usize>,
    /// Split threshold; values `<= threshold` go left
    #[serde(default)]
    pub threshold: f32,
    /// Index of the left child
    #[serde(default)]
    pub left: usize,
    /// Index of the right child
    #[serde(default)]
    pub right: usize,
    /// Predicted class index; `Some` only for leaves
    #[serde(default)]
    pub class: Option<usize>,
}

/// A pretrained decision tree classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    /// Flat node array; node 0 is the root
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Predict the class index for a feature vector
    ///
    /// # Errors
    /// Returns a model error if the tree references a node or feature index
    /// that does not exist, or if traversal does not terminate.
    pub fn predict(&self, features: &[f32]) -> Result<usize> {
        let mut index = 0;

        // A well-formed tree reaches a leaf in at most `nodes.len()` steps
        for _ in 0..=self.nodes.len() {
            let node = self.nodes.get(index).ok_or_else(|| {
                MedReportError::Model(format!("tree node index {index} out of range"))
            })?;

            if let Some(class) = node.class {
                return Ok(class);
            }

            let feature = node.feature.ok_or_else(|| {
                MedReportError::Model(format!("internal node {index} has no feature index"))
            })?;
            let value = *features.get(feature).ok_or_else(|| {
                MedReportError::Model(format!("feature index {feature} out of range"))
            })?;

            index = if value <= node.threshold {
                node.left
            } else {
                node.right
            };
        }

        Err(MedReportError::Model(
            "tree traversal did not reach a leaf".to_string(),
        ))
    }

    /// Validate node cross-references against the feature and class counts
    pub fn validate(&self, feature_count: usize, class_count: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(MedReportError::Model("tree has no nodes".to_string()));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match (node.feature, node.class) {
                (_, Some(class)) if class >= class_count => {
                    return Err(MedReportError::Model(format!(
                        "leaf {index} references class {class}, but only {class_count} classes exist"
                    )));
                }
                (Some(feature), None) => {
                    if feature >= feature_count {
                        return Err(MedReportError::Model(format!(
                            "node {index} references feature {feature}, but only {feature_count} features exist"
                        )));
                    }
                    if node.left >= self.nodes.len() || node.right >= self.nodes.len() {
                        return Err(MedReportError::Model(format!(
                            "node {index} references a child outside the node array"
                        )));
                    }
                }
                (None, None) => {
                    return Err(MedReportError::Model(format!(
                        "node {index} has neither a feature nor a class"
                    )));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(feature: usize, left: usize, right: usize) -> TreeNode {
        TreeNode {
            feature: Some(feature),
            threshold: 0.5,
            left,
            right,
            class: None,
        }
    }

    fn leaf(class: usize) -> TreeNode {
        TreeNode {
            feature: None,
            threshold: 0.0,
            left: 0,
            right: 0,
            class: Some(class),
        }
    }

    fn two_feature_tree() -> DecisionTree {
        // f0 set -> class 1; else f1 set -> class 2; else class 0
        DecisionTree {
            nodes: vec![split(0, 2, 1), leaf(1), split(1, 4, 3), leaf(2), leaf(0)],
        }
    }

    #[test]
    fn walks_to_the_expected_leaf() {
        let tree = two_feature_tree();
        assert_eq!(tree.predict(&[1.0, 0.0]).unwrap(), 1);
        assert_eq!(tree.predict(&[0.0, 1.0]).unwrap(), 2);
        assert_eq!(tree.predict(&[0.0, 0.0]).unwrap(), 0);
        assert_eq!(tree.predict(&[1.0, 1.0]).unwrap(), 1);
    }

    #[test]
    fn short_feature_vector_is_a_model_error() {
        let tree = two_feature_tree();
        assert!(matches!(
            tree.predict(&[0.0]),
            Err(MedReportError::Model(_))
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_children() {
        let tree = DecisionTree {
            nodes: vec![split(0, 5, 1), leaf(0)],
        };
        assert!(tree.validate(1, 1).is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_class() {
        let tree = DecisionTree {
            nodes: vec![leaf(3)],
        };
        assert!(tree.validate(1, 2).is_err());
    }

    #[test]
    fn leaf_only_json_deserializes_with_defaults() {
        let node: TreeNode = serde_json::from_str(r#"{"class": 2}"#).unwrap();
        assert_eq!(node.class, Some(2));
        assert!(node.feature.is_none());
    }
}
