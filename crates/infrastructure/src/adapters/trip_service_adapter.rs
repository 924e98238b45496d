//! Trip service adapter - Implements TripTransportPort using integration_transit

use application::error::ApplicationError;
use application::ports::TripTransportPort;
use async_trait::async_trait;
use domain::{PlannedTrip, StopSequence, TripQuery};
use integration_transit::{
    HttpTripServiceClient, TransitConfig, TransitError, TripServiceClient, sample_trip,
};
use tracing::{debug, instrument, warn};

/// Adapter for the public transport trip service
#[derive(Debug)]
pub struct TripServiceAdapter<C = HttpTripServiceClient> {
    client: C,
}

impl TripServiceAdapter {
    /// Create an adapter with an HTTP client built from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to initialize.
    pub fn from_config(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let client = HttpTripServiceClient::new(config).map_err(map_transit_error)?;
        Ok(Self { client })
    }
}

impl<C: TripServiceClient> TripServiceAdapter<C> {
    /// Wrap an existing client
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// All stops of a single trip, in visit order
    #[instrument(skip(self))]
    pub async fn trip_stops(&self, trip_id: &str) -> Result<StopSequence, ApplicationError> {
        let response = self
            .client
            .trip_details(trip_id)
            .await
            .map_err(map_transit_error)?;
        response.to_stop_sequence().map_err(map_transit_error)
    }
}

/// The bundled sample trip, for demos without a running service
pub fn load_sample_trip() -> Result<PlannedTrip, ApplicationError> {
    sample_trip().map_err(|e| ApplicationError::Internal(format!("bundled sample is invalid: {e}")))
}

/// Map a client error onto the application's error categories
fn map_transit_error(err: TransitError) -> ApplicationError {
    match err {
        TransitError::Http { status, message } => ApplicationError::server(status, message),
        TransitError::RateLimitExceeded { retry_after_secs } => ApplicationError::server(
            429,
            retry_after_secs.map(|secs| format!("retry after {secs} seconds")),
        ),
        TransitError::ConnectionFailed(_)
        | TransitError::Timeout { .. }
        | TransitError::ParseError(_) => ApplicationError::Request(err.to_string()),
        TransitError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        TransitError::InvalidRequest(msg) => ApplicationError::Internal(msg),
    }
}

#[async_trait]
impl<C: TripServiceClient> TripTransportPort for TripServiceAdapter<C> {
    #[instrument(skip(self, query), fields(limit = query.limit()))]
    async fn request_trip(&self, query: &TripQuery) -> Result<StopSequence, ApplicationError> {
        let response = self
            .client
            .closest_departures(query)
            .await
            .map_err(|e| {
                warn!(error = %e, "Trip request failed");
                map_transit_error(e)
            })?;

        let stops = response.to_stop_sequence().map_err(map_transit_error)?;
        debug!(stops = stops.len(), "Trip service returned stops");
        Ok(stops)
    }

    async fn is_available(&self) -> bool {
        self.client.is_healthy().await
    }
}
