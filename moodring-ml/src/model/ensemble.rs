//! Gradient-boosted tree ensemble
//!
//! JSON layout, one additive tree list for a multi-class soft-max model:
//!
//! ```json
//! {
//!   "version": "2025.1",
//!   "num_class": 4,
//!   "base_score": 0.5,
//!   "feature_names": ["danceability", "energy", "..."],
//!   "trees": [
//!     { "class": 0, "root": { "feature": "valence", "threshold": 0.4,
//!                             "left": { "leaf": 1.0 }, "right": { "leaf": -0.5 } } }
//!   ]
//! }
//! ```
//!
//! A row takes the left branch when `value < threshold`. The margin of each
//! class is `base_score` plus the leaves reached in that class's trees; the
//! predicted class is the arg-max margin, ties going to the lowest id.

use moodring_common::features::{feature_index, FEATURE_NAMES};
use moodring_common::{Error, FeatureVector, Result};
use serde::Deserialize;
use std::path::Path;

use super::Classifier;

#[derive(Debug, Deserialize)]
struct RawEnsemble {
    version: String,
    num_class: usize,
    #[serde(default = "default_base_score")]
    base_score: f64,
    feature_names: Vec<String>,
    trees: Vec<RawTree>,
}

fn default_base_score() -> f64 {
    0.5
}

#[derive(Debug, Deserialize)]
struct RawTree {
    class: usize,
    root: RawNode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Leaf {
        leaf: f64,
    },
    Split {
        feature: String,
        threshold: f64,
        left: Box<RawNode>,
        right: Box<RawNode>,
    },
}

/// Tree node with the split feature resolved to a column index
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf(f64),
    Split {
        column: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn compile(raw: RawNode) -> Result<Node> {
        match raw {
            RawNode::Leaf { leaf } => Ok(Node::Leaf(leaf)),
            RawNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let column = feature_index(&feature).ok_or_else(|| {
                    Error::Model(format!("split on unknown feature {:?}", feature))
                })?;
                Ok(Node::Split {
                    column,
                    threshold,
                    left: Box::new(Node::compile(*left)?),
                    right: Box::new(Node::compile(*right)?),
                })
            }
        }
    }

    fn evaluate(&self, row: &[f64]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(value) => return *value,
                Node::Split {
                    column,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*column] < *threshold { left } else { right };
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Tree {
    class: usize,
    root: Node,
}

/// Multi-class boosted tree classifier
#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    version: String,
    num_class: usize,
    base_score: f64,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    /// Parse and validate a JSON artifact
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawEnsemble =
            serde_json::from_str(json).map_err(|e| Error::Parse(format!("model artifact: {}", e)))?;
        Self::compile(raw)
    }

    /// Read and validate a JSON artifact from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| Error::Model(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    fn compile(raw: RawEnsemble) -> Result<Self> {
        if raw.num_class < 2 {
            return Err(Error::Model(format!(
                "num_class must be at least 2, got {}",
                raw.num_class
            )));
        }

        if raw.feature_names.len() != FEATURE_NAMES.len()
            || raw.feature_names.iter().zip(FEATURE_NAMES).any(|(a, b)| a != b)
        {
            return Err(Error::Model(format!(
                "feature_names {:?} do not match the expected columns {:?}",
                raw.feature_names, FEATURE_NAMES
            )));
        }

        let mut trees = Vec::with_capacity(raw.trees.len());
        for (i, tree) in raw.trees.into_iter().enumerate() {
            if tree.class >= raw.num_class {
                return Err(Error::Model(format!(
                    "tree {} targets class {} but num_class is {}",
                    i, tree.class, raw.num_class
                )));
            }
            trees.push(Tree {
                class: tree.class,
                root: Node::compile(tree.root)?,
            });
        }

        Ok(Self {
            version: raw.version,
            num_class: raw.num_class,
            base_score: raw.base_score,
            trees,
        })
    }

    /// Per-class raw scores for one row
    pub fn margins(&self, features: &FeatureVector) -> Vec<f64> {
        let row = features.as_slice();
        let mut margins = vec![self.base_score; self.num_class];
        for tree in &self.trees {
            margins[tree.class] += tree.root.evaluate(row);
        }
        margins
    }

    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }
}

impl Classifier for TreeEnsemble {
    fn version(&self) -> &str {
        &self.version
    }

    fn num_classes(&self) -> usize {
        self.num_class
    }

    fn predict_class(&self, features: &FeatureVector) -> Result<usize> {
        let margins = self.margins(features);
        if let Some(class) = margins.iter().position(|m| m.is_nan()) {
            return Err(Error::Model(format!("class {} margin is NaN", class)));
        }

        let mut best = 0;
        for (class, margin) in margins.iter().enumerate().skip(1) {
            if *margin > margins[best] {
                best = class;
            }
        }
        Ok(best)
    }
}
