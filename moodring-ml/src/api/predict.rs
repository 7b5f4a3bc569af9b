//! POST /predict-mood
//!
//! Request:  `{ "features": { "energy": 0.8, ... }, "song_name"?: "...", "chunk_number"?: 3 }`
//! Response: `{ "mood": "Energetic" }`, or 400 `{ "mood": "Unknown" }` when
//! the body or its `features` object is unusable.
//!
//! The body is parsed regardless of Content-Type.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PredictError, PredictResult};
use crate::AppState;

/// Successful prediction
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub mood: String,
}

pub async fn predict_mood(
    State(state): State<AppState>,
    body: Bytes,
) -> PredictResult<Json<PredictResponse>> {
    let request: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejected /predict-mood: body is not JSON");
        PredictError::InvalidRequest(format!("body is not JSON: {}", e))
    })?;

    let features = request.get("features").and_then(Value::as_object).ok_or_else(|| {
        warn!("Rejected /predict-mood: missing features object");
        PredictError::InvalidRequest("missing features object".to_string())
    })?;

    // Caller context from the chunk analysis pipeline, trace only
    let song_name = request.get("song_name").and_then(Value::as_str);
    let chunk_number = request.get("chunk_number").and_then(Value::as_u64);

    let mood = state.predictor.predict(features).map_err(|e| {
        warn!(error = %e, song_name, chunk_number, "Prediction failed");
        PredictError::from(e)
    })?;

    debug!(song_name, chunk_number, %mood, "Chunk mood predicted");

    Ok(Json(PredictResponse {
        mood: mood.as_str().to_string(),
    }))
}

pub fn predict_routes() -> Router<AppState> {
    Router::new().route("/predict-mood", post(predict_mood))
}
