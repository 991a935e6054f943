//! Configuration for a map session
//!
//! Everything here is resolved once during startup and then handed to the
//! components that need it. Nothing in this module is mutated afterwards, so
//! two sessions built from different configs never observe each other.

use crate::core::{
    constants::{
        API_BASE_URL_ENV, DEFAULT_API_BASE_URL, LOCATE_ZOOM, MARKER_ICON_ANCHOR,
        MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR, USER_AGENT,
    },
    viewport::ViewportState,
};
use crate::{MapError, Result};
use reqwest::Url;

/// Icon used for every partner marker
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIconConfig {
    pub icon_url: String,
    pub icon_retina_url: String,
    pub shadow_url: String,
    pub icon_size: (u32, u32),
    pub icon_anchor: (u32, u32),
    pub popup_anchor: (i32, i32),
}

impl MarkerIconConfig {
    /// The stock Leaflet pin served from a CDN
    pub fn leaflet_default() -> Self {
        const BASE: &str = "https://unpkg.com/leaflet@1.9.4/dist/images";
        Self {
            icon_url: format!("{BASE}/marker-icon.png"),
            icon_retina_url: format!("{BASE}/marker-icon-2x.png"),
            shadow_url: format!("{BASE}/marker-shadow.png"),
            icon_size: MARKER_ICON_SIZE,
            icon_anchor: MARKER_ICON_ANCHOR,
            popup_anchor: MARKER_POPUP_ANCHOR,
        }
    }
}

impl Default for MarkerIconConfig {
    fn default() -> Self {
        Self::leaflet_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root of the remote data service; endpoint paths are joined onto it
    pub api_base_url: Url,
    /// View shown before the device position is known
    pub fallback_view: ViewportState,
    /// Zoom applied when recentering on the device position
    pub locate_zoom: u8,
    pub marker_icon: MarkerIconConfig,
    pub user_agent: String,
}

impl ClientConfig {
    /// Resolve the config from the process environment.
    ///
    /// `AQUAMAP_API_BASE_URL` selects the service; when it is unset or blank
    /// the local default endpoint `http://localhost:8000` is used.
    pub fn from_env() -> Result<Self> {
        Self::with_base_url(std::env::var(API_BASE_URL_ENV).ok().as_deref())
    }

    /// Build a config around an optional base URL override
    pub fn with_base_url(base_url: Option<&str>) -> Result<Self> {
        let raw = match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => url,
            _ => {
                log::debug!(
                    "{} not set, falling back to {}",
                    API_BASE_URL_ENV,
                    DEFAULT_API_BASE_URL
                );
                DEFAULT_API_BASE_URL
            }
        };

        Ok(Self {
            api_base_url: parse_base_url(raw)?,
            ..Self::default()
        })
    }

    pub fn fallback_view(mut self, view: ViewportState) -> Self {
        self.fallback_view = view;
        self
    }

    pub fn locate_zoom(mut self, zoom: u8) -> Self {
        self.locate_zoom = zoom;
        self
    }

    pub fn marker_icon(mut self, icon: MarkerIconConfig) -> Self {
        self.marker_icon = icon;
        self
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_base_url
            .join(path)
            .map_err(|e| MapError::Config(format!("invalid endpoint path {path:?}: {e}")))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: parse_base_url(DEFAULT_API_BASE_URL)
                .expect("default base URL is a valid literal"),
            fallback_view: ViewportState::default(),
            locate_zoom: LOCATE_ZOOM,
            marker_icon: MarkerIconConfig::default(),
            user_agent: USER_AGENT.to_string(),
        }
    }
}

/// Parses a base URL and makes sure it ends in `/` so `join` appends paths
fn parse_base_url(raw: &str) -> Result<Url> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    let url = Url::parse(&normalized)
        .map_err(|e| MapError::Config(format!("invalid api base url {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(MapError::Config(format!("api base url {raw:?} cannot be a base")));
    }
    Ok(url)
}
