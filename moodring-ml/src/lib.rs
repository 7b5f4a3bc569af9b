//! moodring-ml library - mood prediction and aggregation
//!
//! Labels a song (or chunk of audio) with one of four moods from its audio
//! features, and reduces a listening history of such labels to one
//! user-level mood.

pub mod aggregator;
pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod predictor;

pub use crate::error::{PredictError, PredictResult};

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::predictor::MoodPredictor;

/// Application state shared across handlers
///
/// Holds no per-request data; the model behind the predictor is read-only.
#[derive(Clone)]
pub struct AppState {
    pub predictor: MoodPredictor,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(predictor: MoodPredictor) -> Self {
        Self {
            predictor,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::predict_routes())
        .merge(api::user_mood_routes())
        .merge(api::health_routes())
        .merge(api::buildinfo_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Dashboard runs in the browser on another origin
        .layer(CorsLayer::permissive())
}
