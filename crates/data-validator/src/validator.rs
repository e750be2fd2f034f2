//! Field-Level Validation

use chrono::{NaiveDateTime, Timelike};
use serde_json::Value;
use tracing::debug;

use crate::error::ValidationError;
use crate::request::{PredictionRequest, RawPredictionRequest};

/// Accepted timestamp layouts, tried in order
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

const ON_OFF: [&str; 2] = ["On", "Off"];
const YES_NO: [&str; 2] = ["Yes", "No"];

/// Validator for raw prediction records
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Validate a raw record into a typed request
    pub fn validate(
        &self,
        raw: &RawPredictionRequest,
    ) -> Result<PredictionRequest, ValidationError> {
        let temperature = self.number("Temperature", raw.temperature.as_ref())?;
        let humidity = self.number("Humidity", raw.humidity.as_ref())?;
        let occupancy = self.occupancy(raw.occupancy.as_ref())?;
        let square_footage = self.number("SquareFootage", raw.square_footage.as_ref())?;
        let hvac_on = self.choice("HVACUsage", raw.hvac_usage.as_ref(), ON_OFF)?;
        let lighting_on = self.choice("LightingUsage", raw.lighting_usage.as_ref(), ON_OFF)?;
        let renewable_energy = self.number("RenewableEnergy", raw.renewable_energy.as_ref())?;
        let holiday = self.choice("Holiday", raw.holiday.as_ref(), YES_NO)?;
        let hour = self.hour(raw.timestamp.as_ref())?;

        debug!(temperature, occupancy, hour, "validated prediction request");

        Ok(PredictionRequest {
            temperature,
            humidity,
            occupancy,
            square_footage,
            hvac_on,
            lighting_on,
            renewable_energy,
            holiday,
            hour,
        })
    }

    /// Coerce a JSON number or numeric string to a finite float
    pub fn number(
        &self,
        field: &'static str,
        value: Option<&Value>,
    ) -> Result<f64, ValidationError> {
        let value = value
            .filter(|v| !v.is_null())
            .ok_or(ValidationError::MissingField(field))?;

        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        parsed
            .filter(|v| v.is_finite())
            .ok_or_else(|| ValidationError::InvalidNumber {
                field,
                value: value.to_string(),
            })
    }

    /// Occupancy must be a whole, non-negative head count
    pub fn occupancy(&self, value: Option<&Value>) -> Result<u32, ValidationError> {
        let count = self.number("Occupancy", value)?;
        if count < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "Occupancy",
                value: count,
                reason: "must not be negative",
            });
        }
        if count.fract() != 0.0 || count > f64::from(u32::MAX) {
            return Err(ValidationError::OutOfRange {
                field: "Occupancy",
                value: count,
                reason: "must be a whole number",
            });
        }
        Ok(count as u32)
    }

    /// Map a two-valued literal to a boolean; the first literal is `true`
    pub fn choice(
        &self,
        field: &'static str,
        value: Option<&Value>,
        expected: [&'static str; 2],
    ) -> Result<bool, ValidationError> {
        let value = value
            .filter(|v| !v.is_null())
            .ok_or(ValidationError::MissingField(field))?;

        match value.as_str() {
            Some(s) if s == expected[0] => Ok(true),
            Some(s) if s == expected[1] => Ok(false),
            _ => Err(ValidationError::InvalidChoice {
                field,
                value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
                expected,
            }),
        }
    }

    /// Extract the hour of day from the request timestamp
    pub fn hour(&self, value: Option<&Value>) -> Result<u32, ValidationError> {
        let value = value
            .filter(|v| !v.is_null())
            .ok_or(ValidationError::MissingField("timestamp"))?;
        let text = value
            .as_str()
            .ok_or_else(|| ValidationError::InvalidTimestamp(value.to_string()))?;

        TIMESTAMP_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
            .map(|ts| ts.hour())
            .ok_or_else(|| ValidationError::InvalidTimestamp(text.to_string()))
    }
}
