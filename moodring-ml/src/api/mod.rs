//! HTTP API handlers for moodring-ml
//!
//! - POST /predict-mood: classify one feature vector
//! - POST /user-mood: aggregate a listening history
//! - GET /health, GET /build_info: diagnostics

pub mod buildinfo;
pub mod health;
pub mod predict;
pub mod user_mood;

pub use buildinfo::buildinfo_routes;
pub use health::health_routes;
pub use predict::predict_routes;
pub use user_mood::user_mood_routes;
