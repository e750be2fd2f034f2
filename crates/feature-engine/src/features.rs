//! Feature Vector Assembly

use data_validator::{PredictionRequest, RawPredictionRequest, ValidationError};
use serde::Serialize;
use tracing::debug;

use crate::temporal::HourOfDay;

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 21;

/// Training-time column names, in model input order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "Temperature",
    "Humidity",
    "Occupancy",
    "HVACUsage",
    "LightingUsage",
    "Thermal_Energy_Load",
    "Occupancy_Energy_Load",
    "Environmental_Stress_Level",
    "High_Temp_Regime",
    "High_Occupancy_Regime",
    "HVAC_On_Peak",
    "Temp_Bucket",
    "Recent_Consumption_Level",
    "Load_Consistency",
    "Daily_Usage_Sin",
    "Daily_Usage_Cos",
    "Load_Change_1H",
    "HVAC_Stress",
    "Lighting_Demand_Intensity",
    "Is_Peak_Hour",
    "Short_Term_Trend",
];

/// Load consistency score assumed for a single observation
const LOAD_CONSISTENCY: f64 = 0.8;

/// Feature vector for the energy regressor.
///
/// The model is order-sensitive, not name-sensitive: [`FeatureVector::values`]
/// is the only sanctioned way to hand the row to a model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    #[serde(rename = "Temperature")]
    pub temperature: f64,
    #[serde(rename = "Humidity")]
    pub humidity: f64,
    #[serde(rename = "Occupancy")]
    pub occupancy: f64,
    #[serde(rename = "HVACUsage")]
    pub hvac_usage: f64,
    #[serde(rename = "LightingUsage")]
    pub lighting_usage: f64,
    /// Energy needed for temperature control
    #[serde(rename = "Thermal_Energy_Load")]
    pub thermal_energy_load: f64,
    /// Energy attributed to occupants
    #[serde(rename = "Occupancy_Energy_Load")]
    pub occupancy_energy_load: f64,
    /// Combined temperature and humidity stress
    #[serde(rename = "Environmental_Stress_Level")]
    pub environmental_stress_level: f64,
    #[serde(rename = "High_Temp_Regime")]
    pub high_temp_regime: f64,
    #[serde(rename = "High_Occupancy_Regime")]
    pub high_occupancy_regime: f64,
    #[serde(rename = "HVAC_On_Peak")]
    pub hvac_on_peak: f64,
    /// 0 below 20°C, 1 below 25°C, 2 otherwise
    #[serde(rename = "Temp_Bucket")]
    pub temp_bucket: f64,
    #[serde(rename = "Recent_Consumption_Level")]
    pub recent_consumption_level: f64,
    #[serde(rename = "Load_Consistency")]
    pub load_consistency: f64,
    #[serde(rename = "Daily_Usage_Sin")]
    pub daily_usage_sin: f64,
    #[serde(rename = "Daily_Usage_Cos")]
    pub daily_usage_cos: f64,
    #[serde(rename = "Load_Change_1H")]
    pub load_change_1h: f64,
    #[serde(rename = "HVAC_Stress")]
    pub hvac_stress: f64,
    #[serde(rename = "Lighting_Demand_Intensity")]
    pub lighting_demand_intensity: f64,
    #[serde(rename = "Is_Peak_Hour")]
    pub is_peak_hour: f64,
    #[serde(rename = "Short_Term_Trend")]
    pub short_term_trend: f64,
}

impl FeatureVector {
    /// Feature values in model input order (see [`FEATURE_NAMES`])
    pub fn values(&self) -> [f64; FEATURE_DIMENSION] {
        [
            self.temperature,
            self.humidity,
            self.occupancy,
            self.hvac_usage,
            self.lighting_usage,
            self.thermal_energy_load,
            self.occupancy_energy_load,
            self.environmental_stress_level,
            self.high_temp_regime,
            self.high_occupancy_regime,
            self.hvac_on_peak,
            self.temp_bucket,
            self.recent_consumption_level,
            self.load_consistency,
            self.daily_usage_sin,
            self.daily_usage_cos,
            self.load_change_1h,
            self.hvac_stress,
            self.lighting_demand_intensity,
            self.is_peak_hour,
            self.short_term_trend,
        ]
    }

    /// Named view of the vector, in model input order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }

    /// Whether the request hour fell in the peak window
    pub fn peak_hour(&self) -> bool {
        self.is_peak_hour == 1.0
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Builds feature vectors from validated prediction requests
#[derive(Debug, Clone, Default)]
pub struct FeatureBuilder;

impl FeatureBuilder {
    /// Create a new feature builder
    pub fn new() -> Self {
        Self
    }

    /// Build the feature vector for a validated request
    pub fn build(&self, request: &PredictionRequest) -> FeatureVector {
        let hour = HourOfDay(request.hour);

        let temperature = request.temperature;
        let humidity = request.humidity;
        let occupancy = f64::from(request.occupancy);
        let hvac_usage = indicator(request.hvac_on);
        let lighting_usage = indicator(request.lighting_on);
        let is_peak_hour = indicator(hour.is_peak());

        let temp_bucket = if temperature < 20.0 {
            0.0
        } else if temperature < 25.0 {
            1.0
        } else {
            2.0
        };

        let vector = FeatureVector {
            temperature,
            humidity,
            occupancy,
            hvac_usage,
            lighting_usage,
            thermal_energy_load: temperature * hvac_usage * 1.5,
            occupancy_energy_load: occupancy * 3.0,
            environmental_stress_level: (temperature * humidity) / 100.0,
            high_temp_regime: indicator(temperature > 25.0),
            high_occupancy_regime: indicator(request.occupancy >= 5),
            hvac_on_peak: hvac_usage * is_peak_hour,
            temp_bucket,
            recent_consumption_level: 50.0 + (temperature - 20.0) * 1.5 + occupancy * 3.0,
            load_consistency: LOAD_CONSISTENCY,
            daily_usage_sin: hour.sin(),
            daily_usage_cos: hour.cos(),
            load_change_1h: 0.0,
            hvac_stress: hvac_usage * ((temperature - 22.0).abs() / 10.0),
            lighting_demand_intensity: lighting_usage * occupancy * 0.5,
            is_peak_hour,
            short_term_trend: 0.0,
        };

        debug!(
            "Built feature vector: hour={}, peak={}, stress={:.2}",
            request.hour, vector.is_peak_hour, vector.environmental_stress_level
        );

        vector
    }

    /// Build the vector and reject it if any derived column overflowed.
    ///
    /// Inputs are finite after validation, but products such as
    /// `Temperature * Humidity` can still leave the `f64` range.
    pub fn build_checked(
        &self,
        request: &PredictionRequest,
    ) -> Result<FeatureVector, ValidationError> {
        let vector = self.build(request);
        match vector.named().find(|(_, value)| !value.is_finite()) {
            Some((field, value)) => Err(ValidationError::OutOfRange {
                field,
                value,
                reason: "derived feature is not finite",
            }),
            None => Ok(vector),
        }
    }

    /// Validate a raw record and build its feature vector
    pub fn build_from_raw(
        &self,
        raw: &RawPredictionRequest,
    ) -> Result<FeatureVector, ValidationError> {
        let request = raw.validate()?;
        self.build_checked(&request)
    }
}
