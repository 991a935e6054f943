//! # Aquamap
//!
//! The synchronization engine behind a water-refill partner map.
//!
//! A session reconciles the user's filters, the remote partner search, the
//! device position and the map viewport into one consistent set of rendered
//! markers. The tile substrate, the remote service and the location
//! capability are external collaborators reached through the `MapSurface`,
//! `Transport` and `GeolocationAdapter` traits.

pub mod core;
pub mod data;
pub mod geolocation;
pub mod layers;
pub mod prelude;
pub mod runtime;
pub mod sync;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::SessionBuilder,
    config::{ClientConfig, MarkerIconConfig},
    geo::LatLng,
    viewport::{ViewportController, ViewportMode, ViewportState},
};

pub use data::{
    client::{AnnouncementClient, HttpTransport, PartnerQueryClient, QueryError, Transport},
    filter::{Category, FilterCriteria, FilterPatch, FilterState},
    records::{AccessType, AnnouncementRecord, PointRecord},
};

pub use geolocation::{GeolocationAdapter, GeolocationError};

pub use layers::marker::{MarkerDescriptor, MarkerDiff, MarkerPresenter};

pub use sync::{MapEvent, MapSurface, MapSyncCoordinator, SyncOutcome};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// Install `env_logger`, defaulting to `info` for this crate.
///
/// `RUST_LOG` overrides the default filter. Calling it twice is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("aquamap=info");
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Error type alias for convenience
pub type Error = MapError;
