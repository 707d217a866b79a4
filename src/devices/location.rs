use async_trait::async_trait;

use crate::domain::Coordinates;
use crate::error::{AdvisorError, DeviceError};

/// Device geolocation. A failure degrades the forms to manual input.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, AdvisorError>;
}

/// A position known up front, e.g. from configuration.
pub struct FixedLocation {
    coordinates: Coordinates,
}

impl FixedLocation {
    pub fn new(coordinates: Coordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinates, AdvisorError> {
        Ok(self.coordinates)
    }
}

/// Stands in when the host has no way to locate itself.
pub struct NoGeolocation;

#[async_trait]
impl LocationProvider for NoGeolocation {
    async fn current_position(&self) -> Result<Coordinates, AdvisorError> {
        Err(DeviceError::GeolocationUnsupported.into())
    }
}

/// Status line shown for a failed lookup.
pub fn failure_status(err: &AdvisorError) -> &'static str {
    match err {
        AdvisorError::Device(DeviceError::GeolocationUnsupported) => "Geolocation not supported",
        _ => "Location not available",
    }
}
