//! Prelude module for common aquamap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use aquamap::prelude::*;`

pub use crate::core::{
    builder::SessionBuilder,
    config::{ClientConfig, MarkerIconConfig},
    geo::LatLng,
    viewport::{ViewportController, ViewportMode, ViewportState},
};

pub use crate::data::{
    client::{AnnouncementClient, HttpTransport, PartnerQueryClient, QueryError, Transport},
    filter::{Category, FilterCriteria, FilterPatch, FilterState},
    records::{AccessType, AnnouncementRecord, PointRecord},
};

pub use crate::geolocation::{
    FixedGeolocation, GeolocationAdapter, GeolocationError, NoGeolocation,
};

pub use crate::layers::marker::{MarkerDescriptor, MarkerDiff, MarkerPresenter, PopupContent};

pub use crate::sync::{
    LogSurface, MapEvent, MapSurface, MapSyncCoordinator, NullSurface, SyncOutcome,
};

pub use crate::runtime::{init_runtime, runtime, spawn, AsyncHandle, AsyncSpawner};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;
