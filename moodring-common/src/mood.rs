//! Mood labels and their semantic axes
//!
//! The label set is closed: four moods split across two orthogonal axes.
//! - Valence: Happy / Sad
//! - Arousal: Energetic / Calm
//!
//! Strings outside this set are not an error anywhere in Moodring; callers
//! that parse free-form labels get `None` and skip the value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Fallback label returned whenever no mood can be determined
pub const UNKNOWN_MOOD: &str = "Unknown";

/// Semantic dimension a mood belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Happy / Sad
    Valence,
    /// Energetic / Calm
    Arousal,
}

/// A single mood label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Calm,
}

impl Mood {
    /// All known moods
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Energetic, Mood::Calm];

    /// Exact wire name of the label
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Sad => "Sad",
            Mood::Energetic => "Energetic",
            Mood::Calm => "Calm",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Mood::Happy | Mood::Sad => Axis::Valence,
            Mood::Energetic | Mood::Calm => Axis::Arousal,
        }
    }

    /// Parse an exact wire name, returning `None` for anything unrecognized
    ///
    /// Matching is case-sensitive: "happy" is not a mood.
    pub fn from_label(label: &str) -> Option<Mood> {
        Mood::ALL.into_iter().find(|m| m.as_str() == label)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mood::from_label(s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown mood label: {:?}", s)))
    }
}
