//! Audio feature schema consumed by the mood classifier
//!
//! The classifier was trained on exactly nine named features in a fixed
//! column order. Whatever subset a caller supplies, the vector handed to the
//! classifier always carries all nine, in this order, with absent values
//! filled with 0.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Feature names in classifier column order
pub const FEATURE_NAMES: [&str; 9] = [
    "danceability",
    "energy",
    "loudness",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
];

/// Number of classifier input columns
pub const FEATURE_COUNT: usize = FEATURE_NAMES.len();

/// Column index of a feature name
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|n| *n == name)
}

/// Fixed-schema feature vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Build a vector from a caller-supplied JSON object
    ///
    /// - Missing keys and `null` values become 0
    /// - Keys outside the schema are ignored, whatever their value
    /// - A recognized key holding a non-numeric value is rejected
    pub fn from_json_map(map: &Map<String, Value>) -> Result<Self> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, name) in values.iter_mut().zip(FEATURE_NAMES) {
            match map.get(name) {
                None | Some(Value::Null) => {}
                Some(Value::Number(n)) => {
                    *slot = n.as_f64().ok_or_else(|| {
                        Error::InvalidInput(format!("feature {} is not representable as f64", name))
                    })?;
                }
                Some(other) => {
                    return Err(Error::InvalidInput(format!(
                        "feature {} must be a number, got {}",
                        name, other
                    )));
                }
            }
        }
        Ok(Self(values))
    }

    /// Value of a named feature, `None` for names outside the schema
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.0[i])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// (name, value) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let vector = FeatureVector::from_json_map(&as_map(json!({ "energy": 0.8 }))).unwrap();
        assert_eq!(vector.get("energy"), Some(0.8));
        for (name, value) in vector.iter().filter(|(n, _)| *n != "energy") {
            assert_eq!(value, 0.0, "{} should default to 0", name);
        }
    }

    #[test]
    fn test_partial_map_equals_explicit_zeros() {
        let partial = FeatureVector::from_json_map(&as_map(json!({
            "valence": 0.3,
            "tempo": 121.0
        })))
        .unwrap();
        let explicit = FeatureVector::from_json_map(&as_map(json!({
            "danceability": 0, "energy": 0, "loudness": 0, "speechiness": 0,
            "acousticness": 0, "instrumentalness": 0, "liveness": 0,
            "valence": 0.3, "tempo": 121.0
        })))
        .unwrap();
        assert_eq!(partial, explicit);
    }

    #[test]
    fn test_extra_keys_ignored() {
        let vector = FeatureVector::from_json_map(&as_map(json!({
            "loudness": -7.5,
            "key": "C#",
            "mode": 1
        })))
        .unwrap();
        assert_eq!(vector.get("loudness"), Some(-7.5));
        assert_eq!(vector.get("key"), None);
    }

    #[test]
    fn test_null_treated_as_missing() {
        let vector = FeatureVector::from_json_map(&as_map(json!({ "tempo": null }))).unwrap();
        assert_eq!(vector.get("tempo"), Some(0.0));
    }

    #[test]
    fn test_non_numeric_recognized_feature_rejected() {
        let result = FeatureVector::from_json_map(&as_map(json!({ "energy": "high" })));
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_column_order_is_fixed() {
        let vector = FeatureVector::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let names: Vec<_> = vector.iter().map(|(n, _)| n).collect();
        assert_eq!(names, FEATURE_NAMES.to_vec());
        assert_eq!(feature_index("tempo"), Some(8));
        assert_eq!(vector.as_slice()[0], 1.0);
    }
}
