//! Dead-reckoning projection of an aircraft's position.

use thiserror::Error;

use crate::aircraft::AircraftState;
use crate::geometry::Point;

/// Knots to nautical miles per hour.
pub const KNOTS_TO_NMH: f64 = 1.15078;

/// Latitude bound beyond which the longitude scale term is unusable.
pub const MAX_PREDICTABLE_LAT: f64 = 89.9;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("latitude {0}° is inside the polar band, longitude projection is undefined there")]
    PolarSingularity(f64),
    #[error("aircraft state contains a non-finite value")]
    NonFiniteInput,
}

/// Projects `state` ahead by `horizon_hours` assuming constant speed and
/// heading.
///
/// One degree of latitude is taken as 60 nm; a degree of longitude shrinks by
/// cos(latitude). The scale term blows up toward the poles, so latitudes at
/// or beyond [`MAX_PREDICTABLE_LAT`] are rejected rather than projected. The
/// happy path never yields a non-finite coordinate.
pub fn predict_position(
    state: &AircraftState,
    horizon_hours: f64,
) -> Result<Point, PredictionError> {
    if !state.lat.is_finite()
        || !state.lon.is_finite()
        || !state.ground_speed.is_finite()
        || !state.heading.is_finite()
        || !horizon_hours.is_finite()
    {
        return Err(PredictionError::NonFiniteInput);
    }
    if state.lat.abs() >= MAX_PREDICTABLE_LAT {
        return Err(PredictionError::PolarSingularity(state.lat));
    }

    let speed_nmh = state.ground_speed * KNOTS_TO_NMH;
    let heading_rad = state.heading.to_radians();
    let lat_rad = state.lat.to_radians();

    let lat_delta = speed_nmh * heading_rad.cos() / 60.0 * horizon_hours;
    let lon_delta = speed_nmh * heading_rad.sin() / (60.0 * lat_rad.cos()) * horizon_hours;

    Ok(Point::new(state.lat + lat_delta, state.lon + lon_delta))
}
