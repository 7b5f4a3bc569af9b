//! Mood classifier artifacts
//!
//! The classifier is loaded once at startup, validated against its label
//! map, and shared read-only by every request. There is no reload path: a
//! new model means a restart.

pub mod ensemble;
pub mod label_map;

use moodring_common::{Error, FeatureVector, Mood, Result};
use std::path::Path;
use tracing::info;

pub use ensemble::TreeEnsemble;
pub use label_map::LabelMap;

/// Predict contract of a trained mood classifier
///
/// Implementations take the full nine-column feature vector and return an
/// integer class id in `0..num_classes()`.
pub trait Classifier: Send + Sync {
    /// Artifact version, matched against the label map
    fn version(&self) -> &str;

    fn num_classes(&self) -> usize;

    fn predict_class(&self, features: &FeatureVector) -> Result<usize>;
}

/// Loaded classifier plus the table that decodes its output
pub struct MoodModel {
    classifier: Box<dyn Classifier>,
    labels: LabelMap,
}

impl std::fmt::Debug for MoodModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MoodModel")
            .field("version", &self.classifier.version())
            .field("num_classes", &self.classifier.num_classes())
            .field("labels", &self.labels)
            .finish()
    }
}

impl MoodModel {
    /// Pair a classifier with its label map, rejecting mismatched pairs
    pub fn new(classifier: Box<dyn Classifier>, labels: LabelMap) -> Result<Self> {
        labels.validate_for(classifier.version(), classifier.num_classes())?;
        Ok(Self { classifier, labels })
    }

    /// Load the tree ensemble and its label map from disk
    pub fn load(model_path: &Path, label_map_path: &Path) -> Result<Self> {
        let ensemble = TreeEnsemble::from_file(model_path)?;
        info!(
            model = %model_path.display(),
            version = ensemble.version(),
            trees = ensemble.tree_count(),
            "Loaded mood classifier"
        );

        let labels = LabelMap::from_file(label_map_path)?;
        info!(label_map = %label_map_path.display(), "Loaded label map");

        Self::new(Box::new(ensemble), labels)
    }

    pub fn version(&self) -> &str {
        self.classifier.version()
    }

    /// Classify one feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<Mood> {
        let class = self.classifier.predict_class(features)?;
        self.labels
            .label(class)
            .ok_or_else(|| Error::Model(format!("classifier returned unmapped class {}", class)))
    }
}
