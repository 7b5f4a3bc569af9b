//! Class id → mood label table
//!
//! The classifier emits integer class ids whose meaning was fixed when the
//! model was trained. The table lives in its own TOML artifact next to the
//! model and names the model version it was written for:
//!
//! ```toml
//! model_version = "2025.1"
//!
//! [labels]
//! 0 = "Sad"
//! 1 = "Happy"
//! 2 = "Energetic"
//! 3 = "Calm"
//! ```

use moodring_common::{Error, Mood, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RawLabelMap {
    model_version: String,
    labels: BTreeMap<String, Mood>,
}

/// Versioned class id → mood table
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap {
    model_version: String,
    labels: BTreeMap<usize, Mood>,
}

impl LabelMap {
    /// Encoding used by the original training pipeline
    pub fn standard(model_version: impl Into<String>) -> Self {
        let labels = [Mood::Sad, Mood::Happy, Mood::Energetic, Mood::Calm]
            .into_iter()
            .enumerate()
            .collect();
        Self {
            model_version: model_version.into(),
            labels,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawLabelMap =
            toml::from_str(content).map_err(|e| Error::Parse(format!("label map: {}", e)))?;

        let mut labels = BTreeMap::new();
        for (key, mood) in raw.labels {
            let class: usize = key
                .trim()
                .parse()
                .map_err(|_| Error::Parse(format!("label map key {:?} is not a class id", key)))?;
            labels.insert(class, mood);
        }

        Ok(Self {
            model_version: raw.model_version,
            labels,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Model(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn label(&self, class: usize) -> Option<Mood> {
        self.labels.get(&class).copied()
    }

    /// Check the table against the classifier it will decode
    ///
    /// The version must match and every class id the classifier can emit
    /// must have a label.
    pub fn validate_for(&self, model_version: &str, num_classes: usize) -> Result<()> {
        if self.model_version != model_version {
            return Err(Error::Model(format!(
                "label map was written for model {:?} but the loaded model is {:?}",
                self.model_version, model_version
            )));
        }

        let missing: Vec<usize> = (0..num_classes)
            .filter(|c| !self.labels.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(Error::Model(format!("label map has no label for classes {:?}", missing)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_TOML: &str = r#"
model_version = "2025.1"

[labels]
0 = "Sad"
1 = "Happy"
2 = "Energetic"
3 = "Calm"
"#;

    #[test]
    fn test_parses_standard_table() {
        let map = LabelMap::from_toml_str(STANDARD_TOML).unwrap();
        assert_eq!(map, LabelMap::standard("2025.1"));
        assert_eq!(map.label(0), Some(Mood::Sad));
        assert_eq!(map.label(3), Some(Mood::Calm));
        assert_eq!(map.label(4), None);
    }

    #[test]
    fn test_unknown_mood_name_rejected() {
        let content = "model_version = \"x\"\n[labels]\n0 = \"Angry\"\n";
        assert!(matches!(LabelMap::from_toml_str(content), Err(Error::Parse(_))));
    }

    #[test]
    fn test_non_numeric_key_rejected() {
        let content = "model_version = \"x\"\n[labels]\nzero = \"Sad\"\n";
        assert!(matches!(LabelMap::from_toml_str(content), Err(Error::Parse(_))));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let map = LabelMap::standard("2025.1");
        assert!(map.validate_for("2025.1", 4).is_ok());
        assert!(matches!(map.validate_for("2026.0", 4), Err(Error::Model(_))));
    }

    #[test]
    fn test_missing_class_rejected() {
        let map = LabelMap::standard("v");
        assert!(matches!(map.validate_for("v", 5), Err(Error::Model(_))));
    }
}
