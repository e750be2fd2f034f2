//! Prediction Request Records

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;
use crate::validator::Validator;

/// Prediction record as received on the wire.
///
/// Every field is optional so that a missing field is reported by name
/// instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPredictionRequest {
    #[serde(rename = "Temperature")]
    pub temperature: Option<Value>,
    #[serde(rename = "Humidity")]
    pub humidity: Option<Value>,
    #[serde(rename = "Occupancy")]
    pub occupancy: Option<Value>,
    #[serde(rename = "SquareFootage")]
    pub square_footage: Option<Value>,
    #[serde(rename = "HVACUsage")]
    pub hvac_usage: Option<Value>,
    #[serde(rename = "LightingUsage")]
    pub lighting_usage: Option<Value>,
    #[serde(rename = "RenewableEnergy")]
    pub renewable_energy: Option<Value>,
    #[serde(rename = "Holiday")]
    pub holiday: Option<Value>,
    pub timestamp: Option<Value>,
}

impl RawPredictionRequest {
    /// Validate the record with the default validator
    pub fn validate(&self) -> Result<PredictionRequest, ValidationError> {
        Validator::default().validate(self)
    }
}

/// Validated prediction input.
///
/// Only produced by [`Validator::validate`], so every value is finite and
/// the on/off and yes/no literals have already become booleans.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRequest {
    /// Indoor temperature (°C)
    pub temperature: f64,
    /// Relative humidity (%)
    pub humidity: f64,
    /// Number of occupants
    pub occupancy: u32,
    /// Floor area
    pub square_footage: f64,
    /// HVAC running
    pub hvac_on: bool,
    /// Lighting running
    pub lighting_on: bool,
    /// Renewable share
    pub renewable_energy: f64,
    /// Whether the day is a holiday
    pub holiday: bool,
    /// Hour of day (0-23) taken from the request timestamp
    pub hour: u32,
}

impl TryFrom<&RawPredictionRequest> for PredictionRequest {
    type Error = ValidationError;

    fn try_from(raw: &RawPredictionRequest) -> Result<Self, Self::Error> {
        raw.validate()
    }
}
