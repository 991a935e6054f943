//! The rendering surface the coordinator drives
//!
//! The tile substrate owns panning, tiles and popups. It only needs to be
//! told where to look, which markers to draw and whether to show the inline
//! error line.

use crate::{
    core::viewport::ViewportState,
    data::records::AnnouncementRecord,
    layers::marker::{MarkerDescriptor, MarkerDiff},
};

/// Receives every state change the coordinator applies.
///
/// Calls arrive in application order while the session state is locked, so
/// implementations must not call back into the coordinator.
pub trait MapSurface: Send + Sync {
    fn set_view(&self, _view: &ViewportState) {}

    /// `diff` is relative to the previous `render_markers` call
    fn render_markers(&self, _markers: &[MarkerDescriptor], _diff: &MarkerDiff) {}

    /// `None` clears the inline error
    fn show_error(&self, _message: Option<&str>) {}

    fn render_announcements(&self, _items: &[AnnouncementRecord]) {}
}

/// Surface that discards everything; used by headless sessions
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl MapSurface for NullSurface {}

/// Surface that writes every update to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSurface;

impl MapSurface for LogSurface {
    fn set_view(&self, view: &ViewportState) {
        log::info!("view -> {} @ z{}", view.center, view.zoom);
    }

    fn render_markers(&self, markers: &[MarkerDescriptor], diff: &MarkerDiff) {
        log::info!(
            "{} markers (+{} -{} ~{})",
            markers.len(),
            diff.added.len(),
            diff.removed.len(),
            diff.updated.len()
        );
        for marker in markers {
            log::debug!("  [{}] {} @ {}", marker.key, marker.label, marker.position);
        }
    }

    fn show_error(&self, message: Option<&str>) {
        if let Some(message) = message {
            log::warn!("inline error: {message}");
        }
    }

    fn render_announcements(&self, items: &[AnnouncementRecord]) {
        for item in items {
            log::info!("announcement {}: {}", item.id, item.title);
        }
    }
}
