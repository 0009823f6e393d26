//! The watch rectangle and the per-record crossing evaluation.

use tracing::{debug, info, warn};

use crate::aircraft::{AircraftState, RawAircraft};
use crate::alert::{Alert, Approach};
use crate::geometry::{Point, Segment};
use crate::prediction::{predict_position, PredictionError};

/// The fixed rectangle around the point of interest, held as its four named
/// corners. Built once from configuration, never mutated.
#[derive(Debug, Clone)]
pub struct WatchZone {
    pub north_west: Point,
    pub north_east: Point,
    pub south_west: Point,
    pub south_east: Point,
}

impl WatchZone {
    pub fn new(north_west: Point, north_east: Point, south_west: Point, south_east: Point) -> Self {
        Self {
            north_west,
            north_east,
            south_west,
            south_east,
        }
    }

    fn north_edge(&self) -> Segment {
        Segment::new(self.north_west, self.north_east)
    }

    fn east_edge(&self) -> Segment {
        Segment::new(self.south_east, self.north_east)
    }

    fn south_edge(&self) -> Segment {
        Segment::new(self.south_west, self.south_east)
    }

    // The west boundary runs NW to SE, cutting the rectangle diagonally.
    // That is how the deployed zone has always been wired; kept as-is.
    fn west_edge(&self) -> Segment {
        Segment::new(self.north_west, self.south_east)
    }
}

/// Evaluates aircraft states against one [`WatchZone`].
#[derive(Debug, Clone)]
pub struct GeofenceEvaluator {
    zone: WatchZone,
    horizon_hours: f64,
}

impl GeofenceEvaluator {
    pub fn new(zone: WatchZone, horizon_hours: f64) -> Self {
        Self {
            zone,
            horizon_hours,
        }
    }

    /// Projects the aircraft ahead and tests the path against the four zone
    /// edges. `Ok(None)` means the path stays clear of the boundary.
    pub fn evaluate(&self, state: &AircraftState) -> Result<Option<Alert>, PredictionError> {
        let future = predict_position(state, self.horizon_hours)?;

        // Feed longitudes carry the opposite sign from the zone corner
        // table; only the current fix is negated, the projected point keeps
        // the raw-longitude frame.
        let current = Point::new(state.lat, -state.lon);
        let path = Segment::new(current, future);

        let hit_north = path.intersects(&self.zone.north_edge());
        let hit_east = path.intersects(&self.zone.east_edge());
        let hit_south = path.intersects(&self.zone.south_edge());
        let hit_west = path.intersects(&self.zone.west_edge());

        if !(hit_north || hit_east || hit_south || hit_west) {
            return Ok(None);
        }

        // The side label comes from the heading alone; which edge actually
        // fired only selects the north/south vs east/west pair.
        let approach = if hit_north || hit_south {
            if state.heading > 90.0 && state.heading < 270.0 {
                Approach::FromNorth
            } else {
                Approach::FromSouth
            }
        } else if hit_east || hit_west {
            if state.heading > 0.0 && state.heading < 180.0 {
                Approach::FromWest
            } else {
                Approach::FromEast
            }
        } else {
            Approach::Unclassified
        };

        Ok(Some(Alert {
            flight: state.flight.clone(),
            approach,
        }))
    }

    /// Runs one snapshot's records through [`evaluate`](Self::evaluate) in
    /// order. Records failing the required-fields predicate are skipped
    /// silently; projection failures are logged and skipped.
    pub fn evaluate_batch(&self, records: &[RawAircraft]) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for record in records {
            let Some(state) = record.validate() else {
                debug!(flight = ?record.flight, "record missing required fields, skipped");
                continue;
            };

            match self.evaluate(&state) {
                Ok(Some(alert)) => {
                    info!(
                        flight = %state.flight,
                        heading = state.heading,
                        ground_speed = state.ground_speed,
                        "projected path crosses the watch zone"
                    );
                    alerts.push(alert);
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(flight = %state.flight, %err, "record not projectable, skipped");
                }
            }
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The deployed rectangle, matching the default configuration.
    fn zone() -> WatchZone {
        WatchZone::new(
            Point::new(40.778359, -75.370324),
            Point::new(40.781476, -75.286990),
            Point::new(40.697236, -75.293060),
            Point::new(40.702459, -75.253274),
        )
    }

    fn evaluator() -> GeofenceEvaluator {
        GeofenceEvaluator::new(zone(), 3.0 / 60.0)
    }

    fn state(lat: f64, lon: f64, ground_speed: f64, heading: f64) -> AircraftState {
        AircraftState {
            flight: "UAL123".to_string(),
            lat,
            lon,
            ground_speed,
            heading,
        }
    }

    #[test]
    fn inbound_heading_45_alerts_from_the_south() {
        let alert = evaluator()
            .evaluate(&state(40.70, 75.30, 300.0, 45.0))
            .unwrap()
            .expect("path should cross the zone boundary");

        assert_eq!(alert.approach, Approach::FromSouth);
        assert_eq!(alert.to_string(), "UAL123 approaching from the south");
    }

    #[test]
    fn southbound_heading_labels_north() {
        // Same fix, heading flipped past 90: the south edge still fires but
        // the label follows the heading band.
        let alert = evaluator()
            .evaluate(&state(40.70, 75.30, 300.0, 180.0))
            .unwrap()
            .expect("path should cross the zone boundary");

        assert_eq!(alert.approach, Approach::FromNorth);
    }

    #[test]
    fn east_west_crossing_labels_by_heading_band() {
        // Mid-zone latitude, level track: only the east/west edges can fire.
        let west = evaluator()
            .evaluate(&state(40.74, 75.30, 300.0, 90.0))
            .unwrap()
            .expect("eastbound path should cross");
        assert_eq!(west.approach, Approach::FromWest);

        let east = evaluator()
            .evaluate(&state(40.74, 75.30, 300.0, 270.0))
            .unwrap()
            .expect("westbound path should cross");
        assert_eq!(east.approach, Approach::FromEast);
    }

    #[test]
    fn distant_outbound_aircraft_raises_nothing() {
        let result = evaluator()
            .evaluate(&state(45.0, 75.30, 300.0, 0.0))
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn batch_skips_invalid_records_and_keeps_order() {
        let records = vec![
            RawAircraft {
                lat: Some(40.70),
                lon: Some(75.30),
                gs: Some(300.0),
                nav_heading: None, // fails the required-fields predicate
                flight: Some("NOHEAD".to_string()),
            },
            RawAircraft {
                lat: Some(40.70),
                lon: Some(75.30),
                gs: Some(300.0),
                nav_heading: Some(45.0),
                flight: Some("UAL123".to_string()),
            },
            RawAircraft {
                lat: Some(45.0),
                lon: Some(75.30),
                gs: Some(300.0),
                nav_heading: Some(0.0),
                flight: Some("FARAWAY".to_string()),
            },
        ];

        let alerts = evaluator().evaluate_batch(&records);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].flight, "UAL123");
        assert_eq!(alerts[0].approach, Approach::FromSouth);
    }

    #[test]
    fn batch_survives_a_polar_record() {
        let records = vec![RawAircraft {
            lat: Some(90.0),
            lon: Some(75.30),
            gs: Some(300.0),
            nav_heading: Some(45.0),
            flight: Some("POLAR".to_string()),
        }];

        assert!(evaluator().evaluate_batch(&records).is_empty());
    }
}
