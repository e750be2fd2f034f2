//! Rule-Based Fallback Estimate
//!
//! Closed-form energy consumption estimate used when the trained
//! regressor is missing or fails.

mod rules;

pub use rules::{FallbackEngine, ESTIMATE_MAX, ESTIMATE_MIN};
