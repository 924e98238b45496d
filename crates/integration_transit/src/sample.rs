//! Bundled sample response for offline demos

use domain::PlannedTrip;

use crate::error::TransitError;
use crate::models::parse_departures_response;

/// A closest-departures response for three stops in Wrocław
pub const SAMPLE_DEPARTURES_JSON: &str = include_str!("../data/sample_departures.json");

/// The bundled sample as a planned trip
pub fn sample_trip() -> Result<PlannedTrip, TransitError> {
    parse_departures_response(SAMPLE_DEPARTURES_JSON)?.to_planned_trip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses() {
        let trip = sample_trip().unwrap();
        assert_eq!(trip.query.start().to_query_pair(), "51.10900,17.04100");
        assert_eq!(trip.query.limit(), 3);

        let names: Vec<&str> = trip.stops.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Plac Grunwaldzki", "Dominikański", "Renoma"]);
    }
}
