//! Alert messages and their delivery to the alerting endpoint.

use std::fmt;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::info;

/// Which side the aircraft is coming in from, judged by its heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approach {
    FromNorth,
    FromSouth,
    FromEast,
    FromWest,
    /// Fallback when a crossing cannot be attributed to a side.
    Unclassified,
}

impl fmt::Display for Approach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Approach::FromNorth => write!(f, "approaching from the north"),
            Approach::FromSouth => write!(f, "approaching from the south"),
            Approach::FromEast => write!(f, "approaching from the east"),
            Approach::FromWest => write!(f, "approaching from the west"),
            Approach::Unclassified => write!(f, "approaching."),
        }
    }
}

/// One aircraft whose projected path crosses the watch zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub flight: String,
    pub approach: Approach,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.flight, self.approach)
    }
}

/// The batch's alert lines joined into one message body.
pub fn joined_message(alerts: &[Alert]) -> String {
    alerts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// POSTs the batch's alerts to the endpoint as `{"message": ...}`.
///
/// An empty batch sends nothing.
pub fn deliver(endpoint_url: &str, alerts: &[Alert]) -> Result<()> {
    if alerts.is_empty() {
        return Ok(());
    }

    ureq::post(endpoint_url)
        .send_json(json!({ "message": joined_message(alerts) }))
        .with_context(|| format!("posting alerts to {endpoint_url}"))?;

    info!(count = alerts.len(), "alerts delivered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_lines_read_naturally() {
        let alert = Alert {
            flight: "UAL123".to_string(),
            approach: Approach::FromWest,
        };
        assert_eq!(alert.to_string(), "UAL123 approaching from the west");

        let generic = Alert {
            flight: "UAL123".to_string(),
            approach: Approach::Unclassified,
        };
        assert_eq!(generic.to_string(), "UAL123 approaching.");
    }

    #[test]
    fn message_joins_alerts_line_per_aircraft() {
        let alerts = vec![
            Alert {
                flight: "UAL123".to_string(),
                approach: Approach::FromNorth,
            },
            Alert {
                flight: "DAL456".to_string(),
                approach: Approach::FromEast,
            },
        ];

        assert_eq!(
            joined_message(&alerts),
            "UAL123 approaching from the north\nDAL456 approaching from the east"
        );
    }
}
