use crate::data::filter::FilterPatch;

/// User-facing commands dispatched to a `MapSyncCoordinator`
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A category, checkbox or text control changed
    FilterChanged(FilterPatch),
    /// The explicit "Search" action
    SearchRequested,
    /// The "locate me" action
    LocateRequested,
    /// The view became visible; refreshes the announcement feed
    ViewActivated,
}

impl std::fmt::Display for MapEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapEvent::FilterChanged(_) => write!(f, "filter-changed"),
            MapEvent::SearchRequested => write!(f, "search-requested"),
            MapEvent::LocateRequested => write!(f, "locate-requested"),
            MapEvent::ViewActivated => write!(f, "view-activated"),
        }
    }
}

/// What a re-query did to the displayed point set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The response was current and replaced the point set
    Applied { token: u64, count: usize },
    /// A newer query was issued before this one resolved; its result was dropped
    Superseded { token: u64 },
    /// The query failed; the previous point set stays on screen
    Failed { token: u64 },
    /// The change does not re-query by itself (free-text edits)
    Deferred,
}

impl SyncOutcome {
    pub fn token(&self) -> Option<u64> {
        match self {
            SyncOutcome::Applied { token, .. }
            | SyncOutcome::Superseded { token }
            | SyncOutcome::Failed { token } => Some(*token),
            SyncOutcome::Deferred => None,
        }
    }
}
