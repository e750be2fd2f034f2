//! Fallback Formula

use data_validator::PredictionRequest;
use tracing::debug;

/// Lower bound of any fallback estimate
pub const ESTIMATE_MIN: f64 = 30.0;
/// Upper bound of any fallback estimate
pub const ESTIMATE_MAX: f64 = 150.0;

const BASE_LOAD: f64 = 50.0;
const REFERENCE_TEMP: f64 = 20.0;
const TEMP_COEFFICIENT: f64 = 1.5;
const PER_OCCUPANT: f64 = 3.0;
const SQFT_DIVISOR: f64 = 50.0;
const HVAC_LOAD: f64 = 20.0;
const LIGHTING_LOAD: f64 = 10.0;
const RENEWABLE_COEFFICIENT: f64 = -0.5;
const HOLIDAY_OFFSET: f64 = -5.0;

/// Deterministic fallback estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackEngine;

impl FallbackEngine {
    /// Create a new fallback engine
    pub fn new() -> Self {
        Self
    }

    /// Estimate consumption from the raw request, clamped to
    /// [`ESTIMATE_MIN`, `ESTIMATE_MAX`]
    pub fn estimate(&self, request: &PredictionRequest) -> f64 {
        let temp_factor = (request.temperature - REFERENCE_TEMP) * TEMP_COEFFICIENT;
        let occupancy_factor = f64::from(request.occupancy) * PER_OCCUPANT;
        let sqft_factor = request.square_footage / SQFT_DIVISOR;
        let hvac_factor = if request.hvac_on { HVAC_LOAD } else { 0.0 };
        let lighting_factor = if request.lighting_on { LIGHTING_LOAD } else { 0.0 };
        let renewable_offset = request.renewable_energy * RENEWABLE_COEFFICIENT;
        let holiday_factor = if request.holiday { HOLIDAY_OFFSET } else { 0.0 };

        // Summation order matches the reference formula.
        let raw = BASE_LOAD
            + temp_factor
            + occupancy_factor
            + sqft_factor
            + hvac_factor
            + lighting_factor
            + renewable_offset
            + holiday_factor;

        let estimate = raw.clamp(ESTIMATE_MIN, ESTIMATE_MAX);
        debug!("Fallback estimate: raw={:.3}, clamped={:.3}", raw, estimate);
        estimate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

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

    #[test]
    fn test_reference_estimate() {
        // 50 + 12 + 24 + 20 + 20 + 10 - 1 + 0
        assert_eq!(FallbackEngine::new().estimate(&request()), 135.0);
    }

    #[test]
    fn test_switches_and_holiday() {
        let engine = FallbackEngine::new();
        let quiet = PredictionRequest {
            hvac_on: false,
            lighting_on: false,
            holiday: true,
            ..request()
        };
        // 135 - 20 - 10 - 5
        assert_eq!(engine.estimate(&quiet), 100.0);
    }

    #[test]
    fn test_clamps_low() {
        let engine = FallbackEngine::new();
        let cold = PredictionRequest {
            temperature: -10.0,
            occupancy: 0,
            square_footage: 0.0,
            hvac_on: false,
            lighting_on: false,
            renewable_energy: 50.0,
            holiday: true,
            ..request()
        };
        assert_eq!(engine.estimate(&cold), ESTIMATE_MIN);
    }

    #[test]
    fn test_clamps_high() {
        let engine = FallbackEngine::new();
        let crowded = PredictionRequest {
            occupancy: 100,
            ..request()
        };
        assert_eq!(engine.estimate(&crowded), ESTIMATE_MAX);
    }

    #[test]
    fn test_estimate_ignores_hour_and_humidity() {
        let engine = FallbackEngine::new();
        let other = PredictionRequest {
            humidity: 5.0,
            hour: 3,
            ..request()
        };
        assert_eq!(engine.estimate(&other), engine.estimate(&request()));
    }

    proptest! {
        #[test]
        fn prop_estimate_within_bounds_and_pure(
            temperature in -1.0e6f64..1.0e6,
            humidity in 0.0f64..100.0,
            occupancy: u32,
            square_footage in -1.0e9f64..1.0e9,
            hvac_on: bool,
            lighting_on: bool,
            renewable_energy in -1.0e9f64..1.0e9,
            holiday: bool,
            hour in 0u32..24,
        ) {
            let req = PredictionRequest {
                temperature,
                humidity,
                occupancy,
                square_footage,
                hvac_on,
                lighting_on,
                renewable_energy,
                holiday,
                hour,
            };
            let engine = FallbackEngine::new();
            let first = engine.estimate(&req);
            prop_assert!((ESTIMATE_MIN..=ESTIMATE_MAX).contains(&first));
            prop_assert_eq!(first, engine.estimate(&req));
        }
    }
}
