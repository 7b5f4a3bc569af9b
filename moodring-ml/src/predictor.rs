//! Mood predictor
//!
//! Turns a caller's feature mapping into one mood label. The mapping may
//! carry any subset of the nine feature columns; the classifier always sees
//! all nine.

use moodring_common::{FeatureVector, Mood, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::debug;

use crate::model::MoodModel;

/// Cheap-to-clone handle over the shared read-only model
#[derive(Debug, Clone)]
pub struct MoodPredictor {
    model: Arc<MoodModel>,
}

impl MoodPredictor {
    pub fn new(model: Arc<MoodModel>) -> Self {
        Self { model }
    }

    pub fn model_version(&self) -> &str {
        self.model.version()
    }

    /// Predict from a JSON feature object
    ///
    /// Missing or `null` features are 0, unrecognized keys are ignored.
    pub fn predict(&self, features: &Map<String, Value>) -> Result<Mood> {
        let vector = FeatureVector::from_json_map(features)?;
        self.predict_vector(&vector)
    }

    pub fn predict_vector(&self, features: &FeatureVector) -> Result<Mood> {
        let mood = self.model.predict(features)?;
        debug!(?features, %mood, "Predicted mood");
        Ok(mood)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Classifier, LabelMap};
    use moodring_common::Error;
    use serde_json::json;

    /// Energetic above 0.5 energy, Calm otherwise
    struct EnergyThreshold;

    impl Classifier for EnergyThreshold {
        fn version(&self) -> &str {
            "energy-threshold"
        }

        fn num_classes(&self) -> usize {
            4
        }

        fn predict_class(&self, features: &FeatureVector) -> Result<usize> {
            Ok(if features.get("energy").unwrap_or(0.0) > 0.5 { 2 } else { 3 })
        }
    }

    fn predictor() -> MoodPredictor {
        let labels = LabelMap::standard("energy-threshold");
        let model = MoodModel::new(Box::new(EnergyThreshold), labels).unwrap();
        MoodPredictor::new(Arc::new(model))
    }

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_predicts_label_from_partial_features() {
        let predictor = predictor();
        assert_eq!(predictor.predict(&as_map(json!({ "energy": 0.9 }))).unwrap(), Mood::Energetic);
        assert_eq!(predictor.predict(&as_map(json!({}))).unwrap(), Mood::Calm);
    }

    #[test]
    fn test_missing_features_match_explicit_zeros() {
        let predictor = predictor();
        let partial = predictor.predict(&as_map(json!({ "valence": 0.7 }))).unwrap();
        let explicit = predictor
            .predict(&as_map(json!({
                "danceability": 0, "energy": 0, "loudness": 0, "speechiness": 0,
                "acousticness": 0, "instrumentalness": 0, "liveness": 0,
                "valence": 0.7, "tempo": 0
            })))
            .unwrap();
        assert_eq!(partial, explicit);
    }

    #[test]
    fn test_non_numeric_feature_is_invalid_input() {
        let predictor = predictor();
        let result = predictor.predict(&as_map(json!({ "tempo": "fast" })));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_clones_share_one_model() {
        let predictor = predictor();
        let clone = predictor.clone();
        assert!(Arc::ptr_eq(&predictor.model, &clone.model));
        assert_eq!(clone.model_version(), "energy-threshold");
    }
}
