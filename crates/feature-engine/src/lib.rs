//! Feature Engineering Engine
//!
//! Builds the fixed 21-column feature vector the trained energy model expects.

mod features;
mod temporal;

pub use features::{FeatureBuilder, FeatureVector, FEATURE_DIMENSION, FEATURE_NAMES};
pub use temporal::HourOfDay;
