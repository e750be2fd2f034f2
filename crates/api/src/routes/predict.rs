//! Prediction Routes

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use data_validator::RawPredictionRequest;
use inference_engine::PredictionSource;
use recommendation::Annotations;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::FailureResponse;
use crate::AppState;

/// Successful prediction body
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub annotations: Annotations,
    /// Path that produced the estimate
    pub source: PredictionSource,
}

type PredictResult = Result<Json<PredictResponse>, (StatusCode, Json<FailureResponse>)>;

fn rejected(reason: impl std::fmt::Display) -> (StatusCode, Json<FailureResponse>) {
    warn!("Rejected prediction request: {}", reason);
    (
        StatusCode::BAD_REQUEST,
        Json(FailureResponse::new(format!("Prediction error: {reason}"))),
    )
}

/// `POST /api/predict`
pub async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RawPredictionRequest>, JsonRejection>,
) -> PredictResult {
    let Json(raw) = body.map_err(|e| rejected(e.body_text()))?;
    debug!("Received prediction request: {:?}", raw);

    let request = raw.validate().map_err(rejected)?;
    let features = state.features.build_checked(&request).map_err(rejected)?;
    let result = state.predictor.predict(&features, &request);
    let annotations = state.advisor.annotate(&request, &features, result.value);

    debug!(
        "Prediction {:.2} ({}) with {} recommendations",
        annotations.prediction,
        result.source.as_str(),
        annotations.recommendations.len()
    );

    Ok(Json(PredictResponse {
        success: true,
        annotations,
        source: result.source,
    }))
}
