//! POST /user-mood
//!
//! Request:  `{ "history": [ { "Mood_Name": "Happy" }, ... ] }`
//! Response: `{ "user_mood": "Happy and Calm" }`
//!
//! Always 200. A missing, empty or malformed history is an uninformative
//! history, not a caller error, and aggregates to "Unknown".

use axum::{body::Bytes, routing::post, Json, Router};
use moodring_common::UNKNOWN_MOOD;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::aggregator::{aggregate, history_labels};
use crate::error::HistoryError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct UserMoodResponse {
    pub user_mood: String,
}

impl UserMoodResponse {
    fn unknown() -> Self {
        Self {
            user_mood: UNKNOWN_MOOD.to_string(),
        }
    }
}

pub async fn user_mood(body: Bytes) -> Json<UserMoodResponse> {
    let request: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "/user-mood body is not JSON, reporting Unknown");
            return Json(UserMoodResponse::unknown());
        }
    };

    let labels = match history_labels(&request) {
        Ok(labels) => labels,
        Err(HistoryError::EmptyInput) => {
            debug!("/user-mood called with empty history");
            return Json(UserMoodResponse::unknown());
        }
        Err(e) => {
            warn!(error = %e, "/user-mood history unusable, reporting Unknown");
            return Json(UserMoodResponse::unknown());
        }
    };

    let user_mood = aggregate(&labels);
    debug!(entries = labels.len(), %user_mood, "Aggregated user mood");

    Json(UserMoodResponse { user_mood })
}

pub fn user_mood_routes() -> Router<AppState> {
    Router::new().route("/user-mood", post(user_mood))
}
