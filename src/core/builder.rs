//! Session builder for fluent configuration
//!
//! Assembles a `MapSyncCoordinator` from a config and the external
//! collaborators. Anything left unset gets the production default: config
//! from the environment, HTTP transport, no geolocation, no surface.

use crate::{
    core::config::ClientConfig,
    data::{
        client::{HttpTransport, Transport},
        filter::FilterCriteria,
    },
    geolocation::{GeolocationAdapter, NoGeolocation},
    sync::{
        coordinator::MapSyncCoordinator,
        surface::{MapSurface, NullSurface},
    },
    Result,
};
use std::sync::Arc;

/// Builder for creating and configuring map sessions
#[derive(Default)]
pub struct SessionBuilder {
    config: Option<ClientConfig>,
    criteria: Option<FilterCriteria>,
    transport: Option<Arc<dyn Transport>>,
    geolocation: Option<Arc<dyn GeolocationAdapter>>,
    surface: Option<Arc<dyn MapSurface>>,
}

impl SessionBuilder {
    /// Create a new SessionBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Start from criteria other than the stock defaults
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_geolocation(mut self, geolocation: Arc<dyn GeolocationAdapter>) -> Self {
        self.geolocation = Some(geolocation);
        self
    }

    pub fn with_surface(mut self, surface: Arc<dyn MapSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Build the session, sharing it so events can be dispatched
    pub fn build(self) -> Result<Arc<MapSyncCoordinator>> {
        let config = match self.config {
            Some(config) => config,
            None => ClientConfig::from_env()?,
        };
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&config)?),
        };
        log::debug!("building map session against {}", config.api_base_url);

        Ok(Arc::new(MapSyncCoordinator::new(
            &config,
            self.criteria.unwrap_or_default(),
            transport,
            self.geolocation.unwrap_or_else(|| Arc::new(NoGeolocation)),
            self.surface.unwrap_or_else(|| Arc::new(NullSurface)),
        )))
    }
}
