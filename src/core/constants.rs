//! Core constants for the partner map: fallback view, endpoints and marker icon defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Base URL used when `AQUAMAP_API_BASE_URL` is unset or blank.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Environment variable consulted by `ClientConfig::from_env`.
pub const API_BASE_URL_ENV: &str = "AQUAMAP_API_BASE_URL";

/// Path of the partner search endpoint, relative to the base URL.
pub const PARTNERS_PATH: &str = "partners";

/// Path of the announcement feed endpoint, relative to the base URL.
pub const ANNOUNCEMENTS_PATH: &str = "announcements";

/// Fallback map center (Tokyo Station) shown before any location is known.
pub const DEFAULT_CENTER: (f64, f64) = (35.6812, 139.7671);

/// Zoom level of the fallback view.
pub const DEFAULT_ZOOM: u8 = 13;

/// Zoom forced when the map recenters on the user's position.
pub const LOCATE_ZOOM: u8 = 15;

/// Upper zoom bound accepted by the tile substrate.
pub const MAX_ZOOM: u8 = 18;

/// Marker icon default size (regular PNG).
pub const MARKER_ICON_SIZE: (u32, u32) = (25, 41);

/// Anchor inside the icon (hot-spot) in pixel coords.
pub const MARKER_ICON_ANCHOR: (u32, u32) = (12, 41);

/// Popup anchor relative to the icon anchor.
pub const MARKER_POPUP_ANCHOR: (i32, i32) = (1, -34);

/// Directions link template base; `destination=lat,lng` is appended.
pub const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1";

/// User agent sent with every service request.
pub const USER_AGENT: &str = concat!("aquamap/", env!("CARGO_PKG_VERSION"));
