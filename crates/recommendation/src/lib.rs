//! Recommendation Engine
//!
//! Derives qualitative annotations from a request, its feature vector and
//! the consumption estimate.

mod engine;

pub use engine::{Annotations, Recommendation, RecommendationEngine, UsageLevel};
