//! Dashboard Chart Routes
//!
//! Illustrative series for the dashboard. Not derived from predictions.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LabeledSeries {
    pub labels: Vec<&'static str>,
    pub data: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct TemperatureSeries {
    pub temperature: Vec<u32>,
    pub energy: Vec<u32>,
}

#[derive(Debug, Serialize)]
pub struct OccupancySeries {
    pub occupancy: Vec<u32>,
    pub energy: Vec<u32>,
}

/// Chart payload
#[derive(Debug, Serialize)]
pub struct ChartsResponse {
    pub energy_trend: LabeledSeries,
    pub device_breakdown: LabeledSeries,
    pub temperature_correlation: TemperatureSeries,
    pub occupancy_impact: OccupancySeries,
}

impl ChartsResponse {
    fn sample() -> Self {
        Self {
            energy_trend: LabeledSeries {
                labels: vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                data: vec![75, 82, 78, 85, 88, 72, 70],
            },
            device_breakdown: LabeledSeries {
                labels: vec!["HVAC", "Lighting", "Appliances", "Others"],
                data: vec![45, 20, 25, 10],
            },
            temperature_correlation: TemperatureSeries {
                temperature: (20..=30).step_by(2).collect(),
                energy: vec![65, 70, 75, 82, 88, 95],
            },
            occupancy_impact: OccupancySeries {
                occupancy: (1..=8).collect(),
                energy: vec![60, 65, 68, 72, 76, 80, 84, 88],
            },
        }
    }
}

/// `GET /api/charts-data`
pub async fn charts_data() -> Json<ChartsResponse> {
    Json(ChartsResponse::sample())
}
