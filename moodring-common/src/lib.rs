//! # Moodring Common Library
//!
//! Shared code for the Moodring services including:
//! - Mood labels and their semantic axes
//! - The fixed audio feature schema
//! - Configuration file loading
//! - Common error types

pub mod config;
pub mod error;
pub mod features;
pub mod mood;

pub use error::{Error, Result};
pub use features::{FeatureVector, FEATURE_NAMES};
pub use mood::{Axis, Mood, UNKNOWN_MOOD};
