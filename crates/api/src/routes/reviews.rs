//! Review Routes

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use storage::{NewReview, ReviewEntry, ReviewStore, StorageError};
use tracing::{error, info, warn};

use super::FailureResponse;
use crate::AppState;

const THANK_YOU: &str = "Thank you for your review!";

/// Submission acknowledgement
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
}

/// Review listing
#[derive(Debug, Serialize)]
pub struct ReviewsResponse {
    pub success: bool,
    pub reviews: Vec<ReviewEntry>,
}

type Failure = (StatusCode, Json<FailureResponse>);

fn storage_failure(e: StorageError) -> Failure {
    error!("Review store error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(FailureResponse::new(e.to_string())),
    )
}

/// Run a blocking store operation on the blocking pool
async fn with_store<T, F>(state: &Arc<AppState>, op: F) -> Result<T, Failure>
where
    F: FnOnce(&ReviewStore) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || op(&state.reviews))
        .await
        .map_err(|e| {
            error!("Review store task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse::new(e.to_string())),
            )
        })?
        .map_err(storage_failure)
}

/// `POST /api/submit-review`
pub async fn submit_review(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewReview>, JsonRejection>,
) -> Result<Json<SubmitResponse>, Failure> {
    let Json(review) = body.map_err(|e| {
        warn!("Rejected review: {}", e.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(FailureResponse::new(e.body_text())),
        )
    })?;

    let entry = with_store(&state, move |store| store.submit(review)).await?;
    info!("Review submitted by {} (rating {})", entry.name, entry.rating);

    Ok(Json(SubmitResponse {
        success: true,
        message: THANK_YOU.to_string(),
    }))
}

/// `GET /api/get-reviews`
pub async fn get_reviews(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReviewsResponse>, Failure> {
    let reviews = with_store(&state, ReviewStore::list).await?;
    Ok(Json(ReviewsResponse {
        success: true,
        reviews,
    }))
}
