//! Annotation Rules

use data_validator::PredictionRequest;
use feature_engine::FeatureVector;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Rule thresholds
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationThresholds {
    /// Prediction above which usage is "High" (default: 80)
    pub high_usage: f64,
    /// Prediction above which load balancing is advised (default: 85)
    pub load_balancing: f64,
    /// Temperature above which a warmer thermostat is advised (default: 25)
    pub warm_temperature: f64,
    /// Occupancy above which natural lighting is advised (default: 6)
    pub crowded_occupancy: u32,
    /// Renewable share below which more renewables are advised (default: 5)
    pub low_renewable: f64,
    /// Prediction that maps to a perfect efficiency score (default: 50)
    pub efficiency_baseline: f64,
}

impl Default for RecommendationThresholds {
    fn default() -> Self {
        Self {
            high_usage: 80.0,
            load_balancing: 85.0,
            warm_temperature: 25.0,
            crowded_occupancy: 6,
            low_renewable: 5.0,
            efficiency_baseline: 50.0,
        }
    }
}

/// Usage classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UsageLevel {
    High,
    Normal,
}

impl UsageLevel {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UsageLevel::High => "High",
            UsageLevel::Normal => "Normal",
        }
    }
}

/// Energy-saving recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Warm room with HVAC running
    RaiseThermostat,
    /// Crowded room with lights on
    NaturalLighting,
    /// Estimate in the peak band
    LoadBalancing,
    /// Low renewable share
    IncreaseRenewable,
}

impl Recommendation {
    /// Get user-facing message
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::RaiseThermostat => {
                "Consider raising thermostat by 2°C to reduce consumption"
            }
            Recommendation::NaturalLighting => "Use natural lighting when possible",
            Recommendation::LoadBalancing => "Peak usage detected - consider load balancing",
            Recommendation::IncreaseRenewable => "Increase renewable energy usage to reduce costs",
        }
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Annotations returned alongside an estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotations {
    /// Estimate rounded to 2 decimals
    pub prediction: f64,
    pub usage_level: UsageLevel,
    /// 0-100, rounded to 1 decimal
    pub efficiency_score: f64,
    pub recommendations: Vec<Recommendation>,
    pub peak_hour: bool,
    /// Environmental stress level rounded to 2 decimals
    pub comfort_index: f64,
}

/// Round to `decimals` places from the exact binary value.
///
/// Precision formatting is correctly rounded, so 3.775 (stored just below
/// the tie) becomes 3.77 and exact ties go to the even digit.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}

/// Pure rule evaluator
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    thresholds: RecommendationThresholds,
}

impl RecommendationEngine {
    /// Annotate an estimate. Every rule is evaluated independently.
    pub fn annotate(
        &self,
        request: &PredictionRequest,
        features: &FeatureVector,
        prediction: f64,
    ) -> Annotations {
        let t = &self.thresholds;

        let usage_level = if prediction > t.high_usage {
            UsageLevel::High
        } else {
            UsageLevel::Normal
        };
        let efficiency_score = (100.0 - (prediction - t.efficiency_baseline)).clamp(0.0, 100.0);

        let rules = [
            (
                request.temperature > t.warm_temperature && request.hvac_on,
                Recommendation::RaiseThermostat,
            ),
            (
                request.occupancy > t.crowded_occupancy && request.lighting_on,
                Recommendation::NaturalLighting,
            ),
            (prediction > t.load_balancing, Recommendation::LoadBalancing),
            (
                request.renewable_energy < t.low_renewable,
                Recommendation::IncreaseRenewable,
            ),
        ];
        let recommendations: Vec<Recommendation> = rules
            .into_iter()
            .filter_map(|(applies, rec)| applies.then_some(rec))
            .collect();

        debug!(
            "Annotated prediction {:.2}: {} with {} recommendations",
            prediction,
            usage_level.as_str(),
            recommendations.len()
        );

        Annotations {
            prediction: round_to(prediction, 2),
            usage_level,
            efficiency_score: round_to(efficiency_score, 1),
            recommendations,
            peak_hour: features.peak_hour(),
            comfort_index: round_to(features.environmental_stress_level, 2),
        }
    }
}
