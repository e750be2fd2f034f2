//! HTTP Route Handlers

pub mod charts;
pub mod chat;
pub mod predict;
pub mod reviews;

use serde::Serialize;

/// Failure body shared by the prediction and review endpoints
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl FailureResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
