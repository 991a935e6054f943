//! Orchestration of filters, queries, geolocation and the rendered map
//!
//! All session state sits behind one mutex that is never held across an
//! `.await`. Every operation locks, reads or bumps what it needs, releases the
//! lock while the network or the device works, then locks again to apply the
//! result. Several operations can therefore be in flight at once while only
//! one of them mutates state at a time.
//!
//! Each point query takes a token from a counter that only grows. A response
//! is applied only if its token is still the most recently issued one, so a
//! slow early query can never overwrite the result of a later one.

use crate::{
    core::{
        config::ClientConfig,
        viewport::{ViewportController, ViewportMode, ViewportState},
    },
    data::{
        client::{AnnouncementClient, PartnerQueryClient, QueryError, Transport},
        filter::{FilterCriteria, FilterPatch, FilterState},
        records::{AnnouncementRecord, PointRecord},
    },
    geolocation::{GeolocationAdapter, GeolocationError},
    layers::marker::{MarkerDescriptor, MarkerDiff, MarkerPresenter},
    runtime::{self, AsyncHandle},
    sync::{
        events::{MapEvent, SyncOutcome},
        surface::MapSurface,
    },
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Inline message for a point query that could not reach the service
pub const NETWORK_ERROR_MESSAGE: &str = "Could not reach the partner service. Please try again.";

/// Inline message for a point query whose response could not be read
pub const DECODE_ERROR_MESSAGE: &str = "The partner service sent an unreadable response.";

fn user_message(err: &QueryError) -> &'static str {
    match err {
        QueryError::Network(_) => NETWORK_ERROR_MESSAGE,
        QueryError::Decode(_) => DECODE_ERROR_MESSAGE,
    }
}

struct SessionState {
    filter: FilterState,
    viewport_controller: ViewportController,
    viewport: ViewportState,
    points: Vec<PointRecord>,
    markers: Vec<MarkerDescriptor>,
    announcements: Vec<AnnouncementRecord>,
    error_message: Option<String>,
    /// Token of the most recently issued point query
    issued: u64,
    /// Token of the most recent point query whose outcome was applied
    settled: u64,
    feed_issued: u64,
}

/// The only stateful component of a map session
pub struct MapSyncCoordinator {
    state: Mutex<SessionState>,
    partners: PartnerQueryClient,
    feed: AnnouncementClient,
    geolocation: Arc<dyn GeolocationAdapter>,
    presenter: MarkerPresenter,
    surface: Arc<dyn MapSurface>,
}

impl MapSyncCoordinator {
    pub fn new(
        config: &ClientConfig,
        criteria: FilterCriteria,
        transport: Arc<dyn Transport>,
        geolocation: Arc<dyn GeolocationAdapter>,
        surface: Arc<dyn MapSurface>,
    ) -> Self {
        let viewport_controller = ViewportController::new(config.fallback_view, config.locate_zoom);
        let viewport = viewport_controller.initial();
        surface.set_view(&viewport);

        Self {
            state: Mutex::new(SessionState {
                filter: FilterState::new(criteria),
                viewport_controller,
                viewport,
                points: Vec::new(),
                markers: Vec::new(),
                announcements: Vec::new(),
                error_message: None,
                issued: 0,
                settled: 0,
                feed_issued: 0,
            }),
            partners: PartnerQueryClient::new(transport.clone()),
            feed: AnnouncementClient::new(transport),
            geolocation,
            presenter: MarkerPresenter::new(config.marker_icon.clone()),
            surface,
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Update the filter; category and checkbox edits re-query immediately.
    ///
    /// An edit that leaves the category and checkboxes as they were issues
    /// no request.
    pub async fn on_filter_changed(&self, patch: FilterPatch) -> SyncOutcome {
        let requery = patch.triggers_requery();
        let (before, criteria) = {
            let mut state = self.state();
            let before = state.filter.criteria().clone();
            (before, state.filter.set(patch))
        };
        log::debug!("filter changed: {:?}", criteria);

        let constraints_moved = before.category != criteria.category
            || before.require_hot != criteria.require_hot
            || before.require_cold != criteria.require_cold;
        if requery && constraints_moved {
            self.requery().await
        } else {
            SyncOutcome::Deferred
        }
    }

    /// Re-query with the current filter without changing it
    pub async fn on_search_requested(&self) -> SyncOutcome {
        self.requery().await
    }

    /// Recenter on the device position; failures leave the view untouched.
    ///
    /// Returns the new viewport when the map moved.
    pub async fn on_locate_requested(&self) -> Option<ViewportState> {
        let position = self.geolocation.current_position().await.and_then(|coords| {
            if coords.is_valid() {
                Ok(coords)
            } else {
                log::warn!("geolocation returned out-of-range position {coords}");
                Err(GeolocationError::Unavailable)
            }
        });
        match position {
            Ok(coords) => {
                let mut state = self.state();
                let view = state.viewport_controller.on_location_resolved(coords);
                state.viewport = view;
                self.surface.set_view(&view);
                log::debug!("recentered on {} @ z{}", view.center, view.zoom);
                Some(view)
            }
            Err(err) => {
                log::debug!("geolocation unavailable, keeping current view: {err}");
                None
            }
        }
    }

    /// Refresh the announcement feed; failures show an empty feed.
    ///
    /// Returns the number of announcements now displayed.
    pub async fn on_view_activated(&self) -> usize {
        let token = {
            let mut state = self.state();
            state.feed_issued += 1;
            state.feed_issued
        };

        let items = match self.feed.fetch().await {
            Ok(items) => items,
            Err(err) => {
                log::debug!("announcement feed unavailable: {err}");
                Vec::new()
            }
        };

        let mut state = self.state();
        if token != state.feed_issued {
            log::debug!("discarding stale announcement feed #{token}");
            return state.announcements.len();
        }
        self.surface.render_announcements(&items);
        state.announcements = items;
        state.announcements.len()
    }

    /// Handle one event to completion
    pub async fn handle(&self, event: MapEvent) {
        log::trace!("handling {event}");
        match event {
            MapEvent::FilterChanged(patch) => {
                self.on_filter_changed(patch).await;
            }
            MapEvent::SearchRequested => {
                self.on_search_requested().await;
            }
            MapEvent::LocateRequested => {
                self.on_locate_requested().await;
            }
            MapEvent::ViewActivated => {
                self.on_view_activated().await;
            }
        }
    }

    /// Fire-and-forget `handle` on the configured async runtime
    pub fn dispatch(self: &Arc<Self>, event: MapEvent) -> crate::Result<Box<dyn AsyncHandle>> {
        let this = Arc::clone(self);
        runtime::spawn(async move { this.handle(event).await })
    }

    async fn requery(&self) -> SyncOutcome {
        let (token, criteria) = {
            let mut state = self.state();
            state.issued += 1;
            (state.issued, state.filter.criteria().clone())
        };
        log::debug!(
            "query #{token} issued with {:?}",
            criteria.to_query_parameters()
        );

        let result = self.partners.fetch(&criteria).await;

        let mut state = self.state();
        if token != state.issued {
            log::debug!("discarding superseded query #{token} (latest #{})", state.issued);
            return SyncOutcome::Superseded { token };
        }
        state.settled = token;

        match result {
            Ok(points) => {
                let markers = self.presenter.present(&points);
                let diff = MarkerDiff::between(&state.markers, &markers);
                log::info!("query #{token} applied: {} partners", points.len());

                if state.error_message.take().is_some() {
                    self.surface.show_error(None);
                }
                self.surface.render_markers(&markers, &diff);
                state.points = points;
                state.markers = markers;
                SyncOutcome::Applied {
                    token,
                    count: state.points.len(),
                }
            }
            Err(err) => {
                log::warn!("query #{token} failed: {err}");
                let message = user_message(&err);
                self.surface.show_error(Some(message));
                state.error_message = Some(message.to_string());
                SyncOutcome::Failed { token }
            }
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.state().filter.criteria().clone()
    }

    /// Parameters the next query would send
    pub fn query_parameters(&self) -> Vec<(&'static str, String)> {
        self.state().filter.to_query_parameters()
    }

    pub fn points(&self) -> Vec<PointRecord> {
        self.state().points.clone()
    }

    pub fn markers(&self) -> Vec<MarkerDescriptor> {
        self.state().markers.clone()
    }

    pub fn viewport(&self) -> ViewportState {
        self.state().viewport
    }

    pub fn viewport_mode(&self) -> ViewportMode {
        self.state().viewport_controller.mode()
    }

    pub fn announcements(&self) -> Vec<AnnouncementRecord> {
        self.state().announcements.clone()
    }

    /// Inline error left by the latest point query, if it failed
    pub fn error_message(&self) -> Option<String> {
        self.state().error_message.clone()
    }

    pub fn issued_token(&self) -> u64 {
        self.state().issued
    }

    pub fn is_query_in_flight(&self) -> bool {
        let state = self.state();
        state.settled < state.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::filter::Category,
        geolocation::{FixedGeolocation, NoGeolocation},
        sync::surface::NullSurface,
    };
    use async_trait::async_trait;

    struct StaticTransport(&'static str);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn get(
            &self,
            _path: &str,
            _params: &[(&'static str, String)],
        ) -> Result<String, QueryError> {
            Ok(self.0.to_string())
        }
    }

    fn coordinator(body: &'static str, geo: Arc<dyn GeolocationAdapter>) -> MapSyncCoordinator {
        MapSyncCoordinator::new(
            &ClientConfig::default(),
            FilterCriteria::default(),
            Arc::new(StaticTransport(body)),
            geo,
            Arc::new(NullSurface),
        )
    }

    #[tokio::test]
    async fn test_text_edit_is_deferred() {
        let coord = coordinator("{}", Arc::new(NoGeolocation));
        let outcome = coord
            .on_filter_changed(FilterPatch::new().query_text("kyoto"))
            .await;
        assert_eq!(outcome, SyncOutcome::Deferred);
        assert_eq!(coord.issued_token(), 0);
        assert_eq!(coord.criteria().query_text, "kyoto");
    }

    #[tokio::test]
    async fn test_category_edit_requeries() {
        let coord = coordinator(r#"{"items": []}"#, Arc::new(NoGeolocation));
        let outcome = coord
            .on_filter_changed(FilterPatch::new().category(Category::University))
            .await;
        assert_eq!(outcome, SyncOutcome::Applied { token: 1, count: 0 });
        assert!(!coord.is_query_in_flight());
    }

    #[tokio::test]
    async fn test_unchanged_checkbox_is_deferred() {
        let coord = coordinator(r#"{"items": []}"#, Arc::new(NoGeolocation));
        let outcome = coord
            .on_filter_changed(FilterPatch::new().category(Category::All).require_cold(true))
            .await;
        assert_eq!(outcome, SyncOutcome::Deferred);
        assert_eq!(coord.issued_token(), 0);
    }

    #[tokio::test]
    async fn test_locate_success_recenters() {
        let here = crate::core::geo::LatLng::new(26.2124, 127.6809);
        let coord = coordinator("{}", Arc::new(FixedGeolocation::new(here)));
        assert_eq!(coord.viewport_mode(), ViewportMode::Default);

        let view = coord.on_locate_requested().await.unwrap();
        assert_eq!(view.center, here);
        assert_eq!(coord.viewport(), view);
        assert_eq!(coord.viewport_mode(), ViewportMode::UserCentered);
    }

    #[tokio::test]
    async fn test_feed_failure_is_empty() {
        let coord = coordinator("not json", Arc::new(NoGeolocation));
        assert_eq!(coord.on_view_activated().await, 0);
        assert!(coord.announcements().is_empty());
        assert_eq!(coord.error_message(), None);
    }
}
