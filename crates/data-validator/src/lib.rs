//! Prediction Request Validation
//!
//! Turns raw JSON prediction records into typed requests. String booleans
//! ("On"/"Off", "Yes"/"No") are resolved here and never travel further.

mod error;
mod request;
mod validator;

pub use error::ValidationError;
pub use request::{PredictionRequest, RawPredictionRequest};
pub use validator::Validator;
