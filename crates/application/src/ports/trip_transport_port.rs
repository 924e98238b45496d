//! Trip transport port
//!
//! The request/response boundary to the trip-lookup service. Adapters map
//! transport failures to [`ApplicationError::Request`] and error statuses to
//! [`ApplicationError::Server`].

use async_trait::async_trait;
use domain::{StopSequence, TripQuery};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for looking up the stops of a trip
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripTransportPort: Send + Sync {
    /// Fetch the stop sequence for a query, in visit order
    async fn request_trip(&self, query: &TripQuery) -> Result<StopSequence, ApplicationError>;

    /// Check if the trip service is reachable
    async fn is_available(&self) -> bool;
}
