//! Time-of-Day Encoding

use std::f64::consts::PI;

/// First hour of the evening peak window (inclusive)
pub const PEAK_START_HOUR: u32 = 18;
/// Last hour of the evening peak window (inclusive)
pub const PEAK_END_HOUR: u32 = 22;

/// Hour of day, local time, no timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourOfDay(pub u32);

impl HourOfDay {
    /// Sine component of the 24h cyclical encoding
    pub fn sin(self) -> f64 {
        (2.0 * PI * f64::from(self.0) / 24.0).sin()
    }

    /// Cosine component of the 24h cyclical encoding
    pub fn cos(self) -> f64 {
        (2.0 * PI * f64::from(self.0) / 24.0).cos()
    }

    /// Whether the hour falls in the 18:00-22:59 peak window
    pub fn is_peak(self) -> bool {
        (PEAK_START_HOUR..=PEAK_END_HOUR).contains(&self.0)
    }
}
