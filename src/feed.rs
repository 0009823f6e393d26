//! Snapshot ingestion: download or read one batch document of aircraft
//! records and decode it.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::aircraft::RawAircraft;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("snapshot request failed: {0}")]
    Http(Box<ureq::Error>),
    #[error("unable to read snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to parse snapshot as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected snapshot format: no \"ac\" aircraft list")]
    MissingAircraftList,
}

/// One decoded batch document.
#[derive(Debug)]
pub struct Snapshot {
    pub aircraft: Vec<RawAircraft>,
    /// Feed-reported capture time, when present.
    pub taken_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    ac: Option<Vec<RawAircraft>>,
    /// Milliseconds since the epoch.
    now: Option<f64>,
}

fn decode(body: &str) -> Result<Snapshot, FeedError> {
    let raw: RawSnapshot = serde_json::from_str(body)?;
    let aircraft = raw.ac.ok_or(FeedError::MissingAircraftList)?;
    let taken_at = raw
        .now
        .and_then(|ms| Utc.timestamp_millis_opt(ms as i64).single());

    Ok(Snapshot { aircraft, taken_at })
}

/// Downloads the current snapshot from the feed endpoint.
pub fn fetch(url: &str, timeout: Duration) -> Result<Snapshot, FeedError> {
    debug!(url, "requesting snapshot");

    let body = ureq::get(url)
        .timeout(timeout)
        .call()
        .map_err(|e| FeedError::Http(Box::new(e)))?
        .into_string()?;

    decode(&body)
}

/// Reads a snapshot from a local file.
pub fn load(path: &Path) -> Result<Snapshot, FeedError> {
    debug!(path = %path.display(), "reading snapshot file");
    decode(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_snapshot_with_extra_fields() {
        let snapshot = decode(
            r#"{
                "now": 1700000000000,
                "messages": 48271,
                "ac": [
                    {"hex": "a1b2c3", "flight": "UAL123 ", "lat": 40.7, "lon": -75.3,
                     "gs": 300.0, "nav_heading": 45.0, "alt_baro": 12000},
                    {"hex": "d4e5f6"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.aircraft.len(), 2);
        assert!(snapshot.aircraft[0].validate().is_some());
        assert!(snapshot.aircraft[1].validate().is_none());
        assert_eq!(
            snapshot.taken_at.unwrap(),
            Utc.timestamp_millis_opt(1_700_000_000_000).single().unwrap()
        );
    }

    #[test]
    fn missing_aircraft_list_is_its_own_error() {
        let err = decode(r#"{"now": 1700000000000}"#).unwrap_err();
        assert!(matches!(err, FeedError::MissingAircraftList));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = decode("not json at all").unwrap_err();
        assert!(matches!(err, FeedError::Json(_)));
    }

    #[test]
    fn empty_aircraft_list_is_valid() {
        let snapshot = decode(r#"{"ac": []}"#).unwrap();
        assert!(snapshot.aircraft.is_empty());
        assert!(snapshot.taken_at.is_none());
    }
}
