//! Energy Prediction Engine
//!
//! Runs the trained regressor on the 21-column feature row and falls back
//! to the closed-form estimate whenever the model is absent or fails.

mod engine;
mod model;
mod onnx;

pub use engine::{PredictionEngine, PredictionResult, PredictionSource};
pub use model::{ModelHandle, Regressor};
pub use onnx::OnnxRegressor;

use thiserror::Error;

/// Errors during model loading or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Model returned an unusable estimate: {0}")]
    InvalidOutput(String),
}
