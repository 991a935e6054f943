//! Scripted collaborators shared by the integration tests
#![allow(dead_code)]

use aquamap::{
    core::viewport::ViewportState,
    data::records::AnnouncementRecord,
    layers::marker::{MarkerDescriptor, MarkerDiff},
    ClientConfig, FilterCriteria, GeolocationAdapter, GeolocationError, LatLng, MapSurface,
    MapSyncCoordinator, QueryError, SessionBuilder, Transport,
};
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type Reply = Result<String, QueryError>;

enum Scripted {
    Now(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// Transport that answers from a queue and records every request.
///
/// Once the queue is empty it answers with an empty item list.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<(String, Vec<(&'static str, String)>)>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(Scripted::Now(reply));
    }

    /// Queue a reply that is only delivered once the returned sender fires
    pub fn push_gated(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<(String, Vec<(&'static str, String)>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_params(&self) -> Vec<(&'static str, String)> {
        self.requests().last().map(|(_, p)| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> Reply {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), params.to_vec()));
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Now(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(QueryError::Network("gate dropped".to_string()))),
            None => Ok(r#"{"items": []}"#.to_string()),
        }
    }
}

/// Geolocation that answers from a queue, failing once it runs dry
#[derive(Default)]
pub struct ScriptedGeolocation {
    replies: Mutex<VecDeque<Result<LatLng, GeolocationError>>>,
}

impl ScriptedGeolocation {
    pub fn new(replies: Vec<Result<LatLng, GeolocationError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
        })
    }
}

#[async_trait]
impl GeolocationAdapter for ScriptedGeolocation {
    async fn current_position(&self) -> Result<LatLng, GeolocationError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GeolocationError::Unavailable))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    View(ViewportState),
    Markers(Vec<String>, MarkerDiff),
    Error(Option<String>),
    Announcements(usize),
}

/// Surface that remembers what it was told
#[derive(Default)]
pub struct RecordingSurface {
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Option<String>> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                SurfaceCall::Error(e) => Some(e),
                _ => None,
            })
            .collect()
    }
}

impl MapSurface for RecordingSurface {
    fn set_view(&self, view: &ViewportState) {
        self.calls.lock().unwrap().push(SurfaceCall::View(*view));
    }

    fn render_markers(&self, markers: &[MarkerDescriptor], diff: &MarkerDiff) {
        let keys = markers.iter().map(|m| m.key.clone()).collect();
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Markers(keys, diff.clone()));
    }

    fn show_error(&self, message: Option<&str>) {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Error(message.map(str::to_string)));
    }

    fn render_announcements(&self, items: &[AnnouncementRecord]) {
        self.calls
            .lock()
            .unwrap()
            .push(SurfaceCall::Announcements(items.len()));
    }
}

/// JSON body of a partner search answering with the given ids
pub fn points_body(ids: &[&str]) -> String {
    let items: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            json!({
                "id": id,
                "name": format!("Partner {id}"),
                "address": format!("{} Refill St", i + 1),
                "latitude": 35.0 + i as f64 * 0.01,
                "longitude": 139.0,
                "has_hot": i % 2 == 1,
                "has_cold": true,
                "access_type": if i % 2 == 0 { "free" } else { "ask_staff" },
                "is_new": false
            })
        })
        .collect();
    json!({ "items": items }).to_string()
}

pub fn session(
    transport: Arc<ScriptedTransport>,
    geolocation: Arc<dyn GeolocationAdapter>,
    surface: Arc<RecordingSurface>,
) -> Arc<MapSyncCoordinator> {
    SessionBuilder::new()
        .with_config(ClientConfig::default())
        .with_criteria(FilterCriteria::default())
        .with_transport(transport)
        .with_geolocation(geolocation)
        .with_surface(surface)
        .build()
        .expect("session builds")
}

pub fn marker_keys(session: &MapSyncCoordinator) -> Vec<String> {
    session.markers().into_iter().map(|m| m.key).collect()
}
