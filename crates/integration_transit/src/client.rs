//! Trip service client
//!
//! Talks to the `/public_transport/city/{city}` endpoints of the trip-lookup
//! service: closest departures for a start/end pair and the details of one
//! trip.

use std::time::Duration;

use async_trait::async_trait;
use domain::TripQuery;
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{
    DeparturesResponse, ErrorBody, TripDetailsResponse, parse_departures_response,
    parse_trip_response,
};

/// Trait for trip service clients
#[async_trait]
pub trait TripServiceClient: Send + Sync {
    /// Departures near the start that head towards the end
    async fn closest_departures(&self, query: &TripQuery) -> Result<DeparturesResponse, TransitError>;

    /// All stops of one trip
    async fn trip_details(&self, trip_id: &str) -> Result<TripDetailsResponse, TransitError>;

    /// Check if the trip service is reachable
    async fn is_healthy(&self) -> bool;
}

/// HTTP client for the trip service
#[derive(Debug)]
pub struct HttpTripServiceClient {
    client: Client,
    config: TransitConfig,
}

impl HttpTripServiceClient {
    /// Create a new trip service client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::ConfigurationError)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("tripmap/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configuration this client was built with
    #[must_use]
    pub const fn config(&self) -> &TransitConfig {
        &self.config
    }

    /// Build `{base_url}/public_transport/city/{city}/{segments...}`
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransitError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| TransitError::ConfigurationError(format!("base_url: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| TransitError::ConfigurationError("base_url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["public_transport", "city", self.config.city.as_str()])
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, params: &[(&str, String)]) -> Result<String, TransitError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let response = Self::check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, TransitError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        let body = response.text().await.unwrap_or_default();
        let message = ErrorBody::message_from(&body);
        warn!(status = status.as_u16(), ?message, "Trip service returned an error");
        Err(TransitError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl TripServiceClient for HttpTripServiceClient {
    #[instrument(skip(self, query), fields(start = %query.start(), end = %query.end(), departure = %query.departure()))]
    async fn closest_departures(&self, query: &TripQuery) -> Result<DeparturesResponse, TransitError> {
        let url = self.endpoint(&["closest_departures"])?;
        let params = [
            ("start_coordinates", query.start().to_query_pair()),
            ("end_coordinates", query.end().to_query_pair()),
            ("start_time", query.departure().to_wire()),
            ("limit", query.limit().to_string()),
        ];

        debug!(%url, "Requesting closest departures");
        let body = self.get(url, &params).await?;
        let response = parse_departures_response(&body)?;

        if response.departures.is_empty() {
            warn!("No departures found");
        }
        debug!(count = response.departures.len(), "Departures found");
        Ok(response)
    }

    #[instrument(skip(self))]
    async fn trip_details(&self, trip_id: &str) -> Result<TripDetailsResponse, TransitError> {
        if trip_id.trim().is_empty() {
            return Err(TransitError::InvalidRequest(
                "trip id must not be empty".to_string(),
            ));
        }

        let url = self.endpoint(&["trip", trip_id.trim()])?;
        debug!(%url, "Requesting trip details");
        let body = self.get(url, &[]).await?;
        let response = parse_trip_response(&body)?;

        debug!(stops = response.trip_details.stops.len(), "Trip details found");
        Ok(response)
    }

    async fn is_healthy(&self) -> bool {
        let Ok(url) = Url::parse(&self.config.base_url) else {
            return false;
        };
        self.client.get(url).send().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> HttpTripServiceClient {
        HttpTripServiceClient::new(&TransitConfig::for_testing(base_url)).unwrap()
    }

    #[test]
    fn test_endpoint_layout() {
        let url = client("http://localhost:5000")
            .endpoint(&["closest_departures"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/public_transport/city/Wroclaw/closest_departures"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("http://example.com/api/")
            .endpoint(&["trip", "3_14613060"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.com/api/public_transport/city/Wroclaw/trip/3_14613060"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let url = client("http://localhost:5000")
            .endpoint(&["trip", "a/b"])
            .unwrap();
        assert!(url.as_str().ends_with("/trip/a%2Fb"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = TransitConfig {
            timeout_secs: 0,
            ..TransitConfig::default()
        };
        assert!(matches!(
            HttpTripServiceClient::new(&config),
            Err(TransitError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_trip_id_is_rejected() {
        let result = client("http://localhost:5000").trip_details("  ").await;
        assert!(matches!(result, Err(TransitError::InvalidRequest(_))));
    }
}
