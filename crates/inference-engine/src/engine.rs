//! Prediction Orchestration

use data_validator::PredictionRequest;
use fallback::FallbackEngine;
use feature_engine::FeatureVector;
use serde::Serialize;
use tracing::{debug, warn};

use crate::model::ModelHandle;
use crate::InferenceError;

/// Which path produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    /// Trained regressor
    Model,
    /// Closed-form formula
    Fallback,
}

impl PredictionSource {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionSource::Model => "model",
            PredictionSource::Fallback => "fallback",
        }
    }
}

/// Consumption estimate tagged with its source
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Estimated consumption
    pub value: f64,
    /// Path that produced `value`
    pub source: PredictionSource,
}

/// Model-first predictor with a formula fallback.
///
/// `predict` never fails: a missing model, an inference error or a
/// non-finite model output all resolve to the fallback estimate.
#[derive(Debug, Clone, Default)]
pub struct PredictionEngine {
    model: ModelHandle,
    fallback: FallbackEngine,
}

impl PredictionEngine {
    /// Create an engine around the given model handle
    pub fn new(model: ModelHandle) -> Self {
        Self {
            model,
            fallback: FallbackEngine::new(),
        }
    }

    /// Estimate consumption for one request
    pub fn predict(
        &self,
        features: &FeatureVector,
        request: &PredictionRequest,
    ) -> PredictionResult {
        let result = match self.run_model(features) {
            Ok(value) => {
                debug!("Model prediction: {:.3}", value);
                PredictionResult {
                    value,
                    source: PredictionSource::Model,
                }
            }
            Err(e) => {
                if let InferenceError::ModelUnavailable(_) = e {
                    debug!("No model loaded, using fallback");
                } else {
                    warn!("Model prediction failed: {}", e);
                }
                let value = self.fallback.estimate(request);
                debug!("Fallback prediction: {:.3}", value);
                PredictionResult {
                    value,
                    source: PredictionSource::Fallback,
                }
            }
        };

        metrics::counter!("energy_predictions_total", "source" => result.source.as_str())
            .increment(1);
        result
    }

    fn run_model(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let model = match &self.model {
            ModelHandle::Ready(model) => model,
            ModelHandle::Unavailable => {
                return Err(InferenceError::ModelUnavailable("no model loaded".to_string()))
            }
        };

        let value = model.predict(&features.values())?;
        if !value.is_finite() {
            return Err(InferenceError::InvalidOutput(value.to_string()));
        }
        Ok(value)
    }

    /// Whether a trained model is loaded
    pub fn has_model(&self) -> bool {
        self.model.is_ready()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Regressor;
    use feature_engine::{FeatureBuilder, FEATURE_DIMENSION};
    use std::sync::Mutex;

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _features: &[f64; FEATURE_DIMENSION]) -> Result<f64, InferenceError> {
            Ok(self.0)
        }

        fn describe(&self) -> String {
            "constant".to_string()
        }
    }

    struct Failing;

    impl Regressor for Failing {
        fn predict(&self, _features: &[f64; FEATURE_DIMENSION]) -> Result<f64, InferenceError> {
            Err(InferenceError::InferenceFailed("shape mismatch".to_string()))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    /// Records the row it was called with
    #[derive(Default)]
    struct Recording(Mutex<Option<[f64; FEATURE_DIMENSION]>>);

    impl Regressor for Recording {
        fn predict(&self, features: &[f64; FEATURE_DIMENSION]) -> Result<f64, InferenceError> {
            *self.0.lock().unwrap() = Some(*features);
            Ok(features[0])
        }

        fn describe(&self) -> String {
            "recording".to_string()
        }
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            temperature: 28.0,
            humidity: 60.0,
            occupancy: 8,
            square_footage: 1000.0,
            hvac_on: true,
            lighting_on: true,
            renewable_energy: 2.0,
            holiday: false,
            hour: 19,
        }
    }

    fn predict(engine: &PredictionEngine) -> PredictionResult {
        let request = request();
        let features = FeatureBuilder::new().build(&request);
        engine.predict(&features, &request)
    }

    #[test]
    fn test_no_model_uses_fallback() {
        let engine = PredictionEngine::new(ModelHandle::Unavailable);
        let result = predict(&engine);
        assert_eq!(result.source, PredictionSource::Fallback);
        assert_eq!(result.value, 135.0);
        assert!(!engine.has_model());
    }

    #[test]
    fn test_model_success() {
        let engine = PredictionEngine::new(ModelHandle::ready(Constant(72.5)));
        let result = predict(&engine);
        assert_eq!(result.source, PredictionSource::Model);
        assert_eq!(result.value, 72.5);
    }

    #[test]
    fn test_model_output_is_not_clamped() {
        let engine = PredictionEngine::new(ModelHandle::ready(Constant(210.0)));
        assert_eq!(predict(&engine).value, 210.0);
    }

    #[test]
    fn test_model_failure_falls_back() {
        let engine = PredictionEngine::new(ModelHandle::ready(Failing));
        let result = predict(&engine);
        assert_eq!(result.source, PredictionSource::Fallback);
        assert_eq!(result.value, 135.0);
    }

    #[test]
    fn test_non_finite_model_output_falls_back() {
        for bad in [f64::NAN, f64::INFINITY] {
            let engine = PredictionEngine::new(ModelHandle::ready(Constant(bad)));
            let result = predict(&engine);
            assert_eq!(result.source, PredictionSource::Fallback);
            assert_eq!(result.value, 135.0);
        }
    }

    #[test]
    fn test_model_receives_ordered_row() {
        let recorder = std::sync::Arc::new(Recording::default());
        let engine = PredictionEngine::new(ModelHandle::Ready(recorder.clone()));

        let request = request();
        let features = FeatureBuilder::new().build(&request);
        engine.predict(&features, &request);

        let row = recorder.0.lock().unwrap().expect("model was called");
        assert_eq!(row, features.values());
    }

    #[test]
    fn test_loaded_onnx_model_drives_prediction() {
        let fixture = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/linear_21.onnx");
        let model = ModelHandle::load(fixture);
        assert!(model.is_ready());

        let engine = PredictionEngine::new(model);
        let result = predict(&engine);
        // 2 * 28 + 0.5 * (8 * 3) + 10
        assert_eq!(result.source, PredictionSource::Model);
        assert_eq!(result.value, 78.0);
    }

    #[test]
    fn test_missing_artifact_degrades_to_fallback() {
        let model = ModelHandle::load("/nonexistent/energy_model.onnx");
        assert!(!model.is_ready());
        assert_eq!(predict(&PredictionEngine::new(model)).source, PredictionSource::Fallback);
    }

    #[test]
    fn test_source_strings() {
        assert_eq!(PredictionSource::Model.as_str(), "model");
        assert_eq!(PredictionSource::Fallback.as_str(), "fallback");
        assert_eq!(serde_json::to_string(&PredictionSource::Fallback).unwrap(), "\"fallback\"");
    }
}
