//! Device location access
//!
//! The platform capability is wrapped in a single one-shot async request.
//! Callers only care whether a position came back; the error kinds exist for
//! logging.

use crate::core::geo::LatLng;
use async_trait::async_trait;

/// Why no position could be produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not available on this device")]
    Unavailable,

    #[error("geolocation permission denied")]
    PermissionDenied,

    #[error("geolocation request timed out")]
    Timeout,
}

/// One-shot "where am I" request
#[async_trait]
pub trait GeolocationAdapter: Send + Sync {
    async fn current_position(&self) -> Result<LatLng, GeolocationError>;
}

/// Always answers with the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocation {
    position: LatLng,
}

impl FixedGeolocation {
    pub fn new(position: LatLng) -> Self {
        Self { position }
    }
}

#[async_trait]
impl GeolocationAdapter for FixedGeolocation {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Ok(self.position)
    }
}

/// Stands in for hosts without a location capability
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl GeolocationAdapter for NoGeolocation {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        Err(GeolocationError::Unavailable)
    }
}
