//! User mood aggregation
//!
//! Reduces a listening history of per-song (or per-chunk) mood labels to one
//! descriptive mood in three phases:
//!
//! 1. **Partition** labels by axis. Anything that is not a known mood,
//!    including the "Unknown" fallback, is dropped.
//! 2. **Vote** within each axis with [`stable_mode`]: the most frequent label
//!    wins, ties going to the label seen first.
//! 3. **Compose** the winners, valence first, joined by `" and "`. A lone
//!    valence winner is paired with its default arousal (Sad with Calm,
//!    Happy with Energetic). A lone arousal winner stands alone.
//!
//! The result depends only on label counts within each axis, so the history
//! order never matters unless two labels tie.

use moodring_common::{Axis, Mood, UNKNOWN_MOOD};
use serde_json::Value;

use crate::error::HistoryError;

/// Keys that may carry the mood name of a history entry
pub const MOOD_FIELDS: [&str; 2] = ["Mood_Name", "mood"];

/// History labels split by axis, in encounter order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisVotes {
    pub valence: Vec<Mood>,
    pub arousal: Vec<Mood>,
}

/// Phase 1: split recognized labels by axis
pub fn partition<I, S>(labels: I) -> AxisVotes
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut votes = AxisVotes::default();
    for mood in labels.into_iter().filter_map(|l| Mood::from_label(l.as_ref())) {
        match mood.axis() {
            Axis::Valence => votes.valence.push(mood),
            Axis::Arousal => votes.arousal.push(mood),
        }
    }
    votes
}

/// Most frequent item, ties broken by first occurrence
///
/// Returns `None` for an empty slice. Deterministic for a given input.
pub fn stable_mode<T: PartialEq + Copy>(items: &[T]) -> Option<T> {
    // (item, count) in first-seen order; axes hold at most two distinct labels
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((*item, 1)),
        }
    }

    let mut winner: Option<(T, usize)> = None;
    for (item, count) in counts {
        if winner.map_or(true, |(_, best)| count > best) {
            winner = Some((item, count));
        }
    }
    winner.map(|(item, _)| item)
}

/// Arousal implied by a valence winner when no arousal label was heard
fn default_arousal(valence: Mood) -> Option<Mood> {
    match valence {
        Mood::Sad => Some(Mood::Calm),
        Mood::Happy => Some(Mood::Energetic),
        _ => None,
    }
}

/// Phase 3: join axis winners into the user-facing string
pub fn compose(valence: Option<Mood>, arousal: Option<Mood>) -> String {
    let arousal = match (valence, arousal) {
        (Some(v), None) => default_arousal(v),
        (_, a) => a,
    };

    let parts: Vec<&str> = [valence, arousal]
        .into_iter()
        .flatten()
        .map(Mood::as_str)
        .collect();

    if parts.is_empty() {
        UNKNOWN_MOOD.to_string()
    } else {
        parts.join(" and ")
    }
}

/// Aggregate a sequence of mood labels into one user mood
///
/// Total over any input: unrecognized labels are skipped and an empty or
/// fully unrecognized history yields "Unknown".
pub fn aggregate<I, S>(history: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let votes = partition(history);
    compose(stable_mode(&votes.valence), stable_mode(&votes.arousal))
}

/// Pull mood labels out of a `/user-mood` request body
///
/// Entries lacking a string mood field are skipped. A history in which no
/// entry carries one is treated like an empty history.
pub fn history_labels(body: &Value) -> Result<Vec<&str>, HistoryError> {
    let history = body
        .get("history")
        .ok_or_else(|| HistoryError::InvalidRequest("missing history field".to_string()))?
        .as_array()
        .ok_or_else(|| HistoryError::InvalidRequest("history is not an array".to_string()))?;

    if history.is_empty() {
        return Err(HistoryError::EmptyInput);
    }

    let labels: Vec<&str> = history
        .iter()
        .filter_map(|entry| {
            MOOD_FIELDS
                .iter()
                .find_map(|field| entry.get(*field).and_then(Value::as_str))
        })
        .collect();

    if labels.is_empty() {
        return Err(HistoryError::InvalidRequest(
            "no history entry carries a mood name".to_string(),
        ));
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_history_is_unknown() {
        assert_eq!(aggregate(Vec::<&str>::new()), "Unknown");
    }

    #[test]
    fn test_only_unrecognized_labels_is_unknown() {
        assert_eq!(aggregate(["Angry", "Unknown", "happy", ""]), "Unknown");
    }

    #[test]
    fn test_lone_sad_pairs_with_calm() {
        assert_eq!(aggregate(["Sad", "Sad", "Happy"]), "Sad and Calm");
    }

    #[test]
    fn test_lone_happy_pairs_with_energetic() {
        assert_eq!(aggregate(["Happy", "Happy", "Sad"]), "Happy and Energetic");
    }

    #[test]
    fn test_both_axes_no_rewrite() {
        assert_eq!(aggregate(["Happy", "Calm", "Calm"]), "Happy and Calm");
        assert_eq!(aggregate(["Sad", "Energetic"]), "Sad and Energetic");
    }

    #[test]
    fn test_lone_arousal_passes_through() {
        assert_eq!(aggregate(["Energetic", "Energetic"]), "Energetic");
        assert_eq!(aggregate(["Calm"]), "Calm");
        assert_eq!(aggregate(["Calm", "Energetic", "Calm", "Unknown"]), "Calm");
    }

    #[test]
    fn test_valence_always_precedes_arousal() {
        assert_eq!(aggregate(["Calm", "Calm", "Sad"]), "Sad and Calm");
        assert_eq!(aggregate(["Energetic", "Happy"]), "Happy and Energetic");
    }

    #[test]
    fn test_unrecognized_labels_do_not_vote() {
        assert_eq!(
            aggregate(["Unknown", "Unknown", "Unknown", "Sad", "Energetic", "Energetic"]),
            "Sad and Energetic"
        );
    }

    #[test]
    fn test_order_independence() {
        let history = ["Happy", "Calm", "Sad", "Calm", "Happy", "Energetic", "Happy"];
        let expected = aggregate(history);
        assert_eq!(expected, "Happy and Calm");

        // Every rotation and the reversal
        for shift in 0..history.len() {
            let mut rotated = history.to_vec();
            rotated.rotate_left(shift);
            assert_eq!(aggregate(&rotated), expected);
            rotated.reverse();
            assert_eq!(aggregate(&rotated), expected);
        }
    }

    #[test]
    fn test_duplication_preserves_result() {
        let scenarios: [&[&str]; 4] = [
            &["Sad", "Sad", "Happy"],
            &["Happy", "Happy", "Sad"],
            &["Happy", "Calm", "Calm"],
            &["Energetic", "Energetic"],
        ];
        for history in scenarios {
            let doubled: Vec<&str> = history.iter().chain(history.iter()).copied().collect();
            assert_eq!(aggregate(history), aggregate(&doubled), "{:?}", history);
        }
    }

    #[test]
    fn test_ties_go_to_first_seen_label() {
        assert_eq!(aggregate(["Sad", "Happy"]), "Sad and Calm");
        assert_eq!(aggregate(["Happy", "Sad"]), "Happy and Energetic");
        assert_eq!(aggregate(["Happy", "Sad", "Calm", "Energetic"]), "Happy and Calm");
    }

    #[test]
    fn test_ties_are_repeatable() {
        let history = ["Energetic", "Sad", "Calm", "Happy"];
        let first = aggregate(history);
        for _ in 0..100 {
            assert_eq!(aggregate(history), first);
        }
    }

    #[test]
    fn test_stable_mode() {
        assert_eq!(stable_mode::<u8>(&[]), None);
        assert_eq!(stable_mode(&[3]), Some(3));
        assert_eq!(stable_mode(&[1, 2, 2, 1, 3, 2]), Some(2));
        assert_eq!(stable_mode(&[4, 5, 5, 4]), Some(4));
        assert_eq!(stable_mode(&[5, 4, 4, 5]), Some(5));
    }

    #[test]
    fn test_partition_keeps_encounter_order() {
        let votes = partition(["Calm", "Sad", "Noise", "Happy", "Energetic"]);
        assert_eq!(votes.valence, vec![Mood::Sad, Mood::Happy]);
        assert_eq!(votes.arousal, vec![Mood::Calm, Mood::Energetic]);
    }

    #[test]
    fn test_compose_table() {
        assert_eq!(compose(None, None), "Unknown");
        assert_eq!(compose(Some(Mood::Sad), None), "Sad and Calm");
        assert_eq!(compose(Some(Mood::Happy), None), "Happy and Energetic");
        assert_eq!(compose(None, Some(Mood::Energetic)), "Energetic");
        assert_eq!(compose(Some(Mood::Sad), Some(Mood::Energetic)), "Sad and Energetic");
    }

    #[test]
    fn test_history_labels_reads_mood_name() {
        let body = json!({
            "history": [
                { "Mood_Name": "Happy", "Song Name": "a" },
                { "mood": "Calm" },
                { "Song Name": "no mood" },
                { "Mood_Name": 3 }
            ]
        });
        assert_eq!(history_labels(&body).unwrap(), vec!["Happy", "Calm"]);
    }

    #[test]
    fn test_history_labels_rejections() {
        assert!(matches!(
            history_labels(&json!({})),
            Err(HistoryError::InvalidRequest(_))
        ));
        assert!(matches!(
            history_labels(&json!({ "history": "Happy" })),
            Err(HistoryError::InvalidRequest(_))
        ));
        assert!(matches!(
            history_labels(&json!({ "history": [] })),
            Err(HistoryError::EmptyInput)
        ));
        assert!(matches!(
            history_labels(&json!({ "history": [{ "song": "x" }] })),
            Err(HistoryError::InvalidRequest(_))
        ));
    }
}
