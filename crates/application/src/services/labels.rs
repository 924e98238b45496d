//! Popup texts for markers

use chrono_tz::Tz;
use domain::{Endpoint, StopVisit, TimePoint};

/// Popup of an endpoint marker, mentioning the departure when known
pub fn endpoint_label(endpoint: Endpoint, departure: Option<TimePoint>, tz: Tz) -> String {
    let when = departure.map(|t| t.format_local(tz));
    match (endpoint, when) {
        (Endpoint::Start, Some(when)) => format!("Start: {when}"),
        (Endpoint::Start, None) => "Start".to_string(),
        (Endpoint::End, Some(when)) => format!("End (departing {when})"),
        (Endpoint::End, None) => "End".to_string(),
    }
}

/// Popup of a stop marker: name, line, heading and local departure time
pub fn stop_label(visit: &StopVisit, tz: Tz) -> String {
    format!(
        "{}\nLine: {}\nHeading: {}\nDeparts: {}",
        visit.name,
        visit.route_id,
        visit.headsign,
        visit.departure.format_local_time(tz)
    )
}
