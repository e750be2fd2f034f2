//! Regressor Capability

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use feature_engine::FEATURE_DIMENSION;
use tracing::{info, warn};

use crate::onnx::OnnxRegressor;
use crate::InferenceError;

/// A trained model that maps one ordered feature row to one estimate
pub trait Regressor: Send + Sync {
    /// Predict consumption for a single row of features in training order
    fn predict(&self, features: &[f64; FEATURE_DIMENSION]) -> Result<f64, InferenceError>;

    /// Human-readable identifier for logs
    fn describe(&self) -> String;
}

/// Model availability, resolved once at startup
#[derive(Clone, Default)]
pub enum ModelHandle {
    /// No usable model; every prediction takes the fallback path
    #[default]
    Unavailable,
    /// Loaded model, shared read-only across requests
    Ready(Arc<dyn Regressor>),
}

impl ModelHandle {
    /// Load an ONNX artifact, degrading to [`ModelHandle::Unavailable`] on
    /// any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match OnnxRegressor::load(path) {
            Ok(model) => {
                info!("ML model loaded from {}", path.display());
                Self::ready(model)
            }
            Err(e) => {
                warn!("{} - using fallback prediction formula", e);
                Self::Unavailable
            }
        }
    }

    /// Wrap an already constructed regressor
    pub fn ready(model: impl Regressor + 'static) -> Self {
        Self::Ready(Arc::new(model))
    }

    /// Whether a model is loaded
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str("Unavailable"),
            Self::Ready(model) => f.debug_tuple("Ready").field(&model.describe()).finish(),
        }
    }
}
