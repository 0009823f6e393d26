//! Aircraft records as they arrive from the feed, and their validated form.

use serde::Deserialize;

/// Label used when a record carries no callsign.
pub const UNKNOWN_FLIGHT: &str = "UNKNOWN FLIGHT";

/// One entry of the feed's `ac` array.
///
/// The feed reports far more fields than these; everything we do not evaluate
/// is ignored on decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAircraft {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    /// Ground speed in knots.
    pub gs: Option<f64>,
    /// Heading in degrees clockwise from true north.
    pub nav_heading: Option<f64>,
    /// Callsign, padded with spaces on the wire.
    pub flight: Option<String>,
}

/// A validated observation, eligible for trajectory projection.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftState {
    pub flight: String,
    pub lat: f64,
    pub lon: f64,
    pub ground_speed: f64,
    pub heading: f64,
}

impl RawAircraft {
    /// The required-fields predicate: position, speed and heading must all be
    /// present and finite. Records failing it are skipped upstream.
    pub fn validate(&self) -> Option<AircraftState> {
        let lat = self.lat.filter(|v| v.is_finite())?;
        let lon = self.lon.filter(|v| v.is_finite())?;
        let ground_speed = self.gs.filter(|v| v.is_finite())?;
        let heading = self.nav_heading.filter(|v| v.is_finite())?;

        let flight = match self.flight.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => f.to_string(),
            _ => UNKNOWN_FLIGHT.to_string(),
        };

        Some(AircraftState {
            flight,
            lat,
            lon,
            ground_speed,
            heading,
        })
    }
}
