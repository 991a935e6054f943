use crate::core::{
    constants::{DEFAULT_CENTER, DEFAULT_ZOOM, LOCATE_ZOOM, MAX_ZOOM},
    geo::LatLng,
};
use serde::{Deserialize, Serialize};

/// The map's visible center and zoom level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: u8,
}

impl ViewportState {
    /// Creates a new viewport state, clamping zoom to the supported range
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
        }
    }
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(LatLng::from(DEFAULT_CENTER), DEFAULT_ZOOM)
    }
}

/// Which transition last positioned the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewportMode {
    /// Showing the configured fallback location
    Default,
    /// Centered on a resolved device position
    UserCentered,
}

/// Owns the fallback view and the recenter policy.
///
/// Zoom only changes on the Default → UserCentered transition. Panning and
/// zooming done by the user happen on the rendering surface and are never
/// reported back here, so a later location fix simply recenters again.
#[derive(Debug, Clone)]
pub struct ViewportController {
    fallback: ViewportState,
    locate_zoom: u8,
    mode: ViewportMode,
}

impl ViewportController {
    pub fn new(fallback: ViewportState, locate_zoom: u8) -> Self {
        Self {
            fallback,
            locate_zoom: locate_zoom.min(MAX_ZOOM),
            mode: ViewportMode::Default,
        }
    }

    /// The fixed fallback viewport
    pub fn initial(&self) -> ViewportState {
        self.fallback
    }

    /// Recenters on `coords` at the recenter zoom and enters `UserCentered`
    pub fn on_location_resolved(&mut self, coords: LatLng) -> ViewportState {
        self.mode = ViewportMode::UserCentered;
        ViewportState::new(coords, self.locate_zoom)
    }

    pub fn mode(&self) -> ViewportMode {
        self.mode
    }

    /// Zoom applied by `on_location_resolved`
    pub fn recenter_zoom(&self) -> u8 {
        self.locate_zoom
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ViewportState::default(), LOCATE_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_is_fallback() {
        let controller = ViewportController::default();
        let initial = controller.initial();
        assert_eq!(initial.center, LatLng::from(DEFAULT_CENTER));
        assert_eq!(initial.zoom, DEFAULT_ZOOM);
        assert_eq!(controller.mode(), ViewportMode::Default);
    }

    #[test]
    fn test_location_resolved_recenters_at_locate_zoom() {
        let mut controller = ViewportController::default();
        let here = LatLng::new(34.7025, 135.4959);
        let view = controller.on_location_resolved(here);
        assert_eq!(view.center, here);
        assert_eq!(view.zoom, LOCATE_ZOOM);
        assert_eq!(controller.mode(), ViewportMode::UserCentered);
    }

    #[test]
    fn test_repeated_fix_retriggers_same_transition() {
        let mut controller = ViewportController::default();
        controller.on_location_resolved(LatLng::new(1.0, 1.0));
        let view = controller.on_location_resolved(LatLng::new(2.0, 2.0));
        assert_eq!(view, ViewportState::new(LatLng::new(2.0, 2.0), LOCATE_ZOOM));
        assert_eq!(controller.mode(), ViewportMode::UserCentered);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let controller = ViewportController::new(ViewportState::default(), 40);
        assert_eq!(controller.recenter_zoom(), MAX_ZOOM);
    }
}
