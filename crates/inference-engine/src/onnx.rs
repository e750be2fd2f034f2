//! ONNX Regressor using tract

use std::path::{Path, PathBuf};

use feature_engine::FEATURE_DIMENSION;
use tracing::debug;
use tract_onnx::prelude::*;

use crate::model::Regressor;
use crate::InferenceError;

/// Optimized tract plan for a single-row regression graph.
///
/// The graph must take one `f32` input of shape `[1, 21]` and produce the
/// estimate as the first element of its first output.
pub struct OnnxRegressor {
    plan: TypedRunnableModel<TypedModel>,
    path: PathBuf,
}

impl OnnxRegressor {
    /// Load and optimize the ONNX model at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(InferenceError::ModelUnavailable(format!(
                "{} not found",
                path.display()
            )));
        }

        debug!("Loading ONNX model from {}", path.display());
        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| InferenceError::ModelLoadError(format!("{}: {e}", path.display())))?;

        Ok(Self {
            plan,
            path: path.to_path_buf(),
        })
    }
}

impl Regressor for OnnxRegressor {
    fn predict(&self, features: &[f64; FEATURE_DIMENSION]) -> Result<f64, InferenceError> {
        let row: Vec<f32> = features.iter().map(|&v| v as f32).collect();
        let input = tract_ndarray::Array2::from_shape_vec((1, FEATURE_DIMENSION), row)
            .map_err(|e| InferenceError::InvalidInputShape {
                expected: format!("[1, {FEATURE_DIMENSION}]"),
                actual: e.to_string(),
            })?;

        let outputs = self
            .plan
            .run(tvec!(Tensor::from(input).into()))
            .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| InferenceError::InvalidOutput("model produced no outputs".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| InferenceError::InvalidOutput(e.to_string()))?;

        view.iter()
            .next()
            .map(|v| f64::from(*v))
            .ok_or_else(|| InferenceError::InvalidOutput("empty output tensor".to_string()))
    }

    fn describe(&self) -> String {
        format!("onnx:{}", self.path.display())
    }
}
