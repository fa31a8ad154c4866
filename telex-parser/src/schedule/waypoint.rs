//! Route legs of a schedule line.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fields::{WAYPOINT, bare_time};
use crate::domain::{AirportCode, ScheduleTime};

/// Error returned when a token sequence holds no waypoint at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaypointError {
    #[error("no waypoints found")]
    NoWaypoints,
}

/// An airport on a scheduled route with its arrival and departure times.
///
/// A time printed in the waypoint shape but out of range (such as "2460")
/// leaves its slot empty and is kept verbatim in `invalid_times`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<ScheduleTime>,
    pub airport: AirportCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<ScheduleTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_times: Vec<String>,
}

impl Waypoint {
    /// Parse `time` as this waypoint's departure, or keep it as invalid.
    fn set_departure(&mut self, time: &str) {
        match ScheduleTime::parse(time) {
            Ok(t) => self.departure_time = Some(t),
            Err(e) => {
                debug!(airport = %self.airport, time, error = %e, "out-of-range departure time");
                self.invalid_times.push(time.to_string());
            }
        }
    }
}

/// Parse a single waypoint token such as "TSN/0645", "1305TSN" or
/// "1845(11JUN)TSN/2100".
///
/// Returns `None` when the token is not shaped like a waypoint.
///
/// # Examples
///
/// ```
/// use telex_parser::schedule::extract_waypoint;
///
/// let wp = extract_waypoint("1845(11JUN)TSN/2100").unwrap();
/// assert_eq!(wp.airport.as_str(), "TSN");
/// assert_eq!(wp.arrival_time.unwrap().to_string(), "1845(11JUN)");
/// assert_eq!(wp.departure_time.unwrap().to_string(), "2100");
///
/// let late = extract_waypoint("TSN2460").unwrap();
/// assert_eq!(late.departure_time, None);
/// assert_eq!(late.invalid_times, ["2460"]);
///
/// assert!(extract_waypoint("18451TSN").is_none());
/// ```
pub fn extract_waypoint(token: &str) -> Option<Waypoint> {
    let caps = WAYPOINT.captures(token)?;
    let airport = AirportCode::parse(caps.name("airport")?.as_str()).ok()?;
    let mut waypoint = Waypoint {
        arrival_time: None,
        airport,
        departure_time: None,
        invalid_times: Vec::new(),
    };
    if let Some(arrival) = caps.name("arr_time") {
        match ScheduleTime::parse(arrival.as_str()) {
            Ok(t) => waypoint.arrival_time = Some(t),
            Err(e) => {
                debug!(token, error = %e, "out-of-range arrival time");
                waypoint.invalid_times.push(arrival.as_str().to_string());
            }
        }
    }
    if let Some(departure) = caps.name("dep_time") {
        waypoint.set_departure(departure.as_str());
    }
    Some(waypoint)
}

/// Turn the route tokens of a schedule line into an ordered waypoint list.
///
/// Tokens before the first waypoint are ignored. A token holding only a
/// time sets the departure time of the waypoint before it, or is recorded
/// in that waypoint's `invalid_times` when out of range. Anything else that
/// is not a waypoint is skipped.
///
/// # Examples
///
/// ```
/// use telex_parser::schedule::parse_waypoints;
///
/// let legs = parse_waypoints(&["ICN", "0235", "TSN"]).unwrap();
/// assert_eq!(legs.len(), 2);
/// assert_eq!(legs[0].departure_time.unwrap().to_string(), "0235");
/// assert_eq!(legs[1].airport.as_str(), "TSN");
/// ```
pub fn parse_waypoints(tokens: &[&str]) -> Result<Vec<Waypoint>, WaypointError> {
    let mut waypoints: Vec<Waypoint> = Vec::new();

    for &token in tokens {
        if let (Some(previous), Some(time)) = (waypoints.last_mut(), bare_time(token)) {
            previous.set_departure(time);
            continue;
        }

        match extract_waypoint(token) {
            Some(waypoint) => waypoints.push(waypoint),
            None if waypoints.is_empty() => {}
            None => debug!(token, "skipping unrecognised route token"),
        }
    }

    if waypoints.is_empty() {
        return Err(WaypointError::NoWaypoints);
    }
    Ok(waypoints)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn hhmm()(hour in 0u32..24, minute in 0u32..60) -> String {
            format!("{:02}{:02}", hour, minute)
        }
    }

    proptest! {
        /// "AAA/HHMM" always yields that airport and departure time
        #[test]
        fn airport_with_departure(airport in "[A-Z]{3}", t in hhmm()) {
            let wp = extract_waypoint(&format!("{airport}/{t}")).unwrap();
            prop_assert_eq!(wp.airport.as_str(), airport.as_str());
            prop_assert_eq!(wp.departure_time.map(|d| d.to_string()), Some(t));
        }

        /// Waypoints are kept in encounter order
        #[test]
        fn order_is_preserved(airports in prop::collection::vec("[A-Z]{3}", 1..6)) {
            let tokens: Vec<&str> = airports.iter().map(String::as_str).collect();
            let legs = parse_waypoints(&tokens).unwrap();
            let parsed: Vec<&str> = legs.iter().map(|w| w.airport.as_str()).collect();
            prop_assert_eq!(parsed, tokens);
        }
    }
}
