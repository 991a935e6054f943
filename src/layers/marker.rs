use crate::{
    core::{config::MarkerIconConfig, constants::DIRECTIONS_BASE_URL, geo::LatLng},
    data::records::PointRecord,
};
use fxhash::{FxHashMap, FxHashSet};
use std::sync::Arc;

/// Suffix appended to the label of partners the service flags as new
pub const NEW_BADGE: &str = "NEW";

/// Popup body of a marker
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub address: String,
    pub open_hours: Option<String>,
    /// `None` when the partner offers neither hot nor cold water
    pub water_types: Option<String>,
    pub access: &'static str,
}

impl PopupContent {
    /// Lines in display order
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.address.clone()];
        if let Some(hours) = &self.open_hours {
            lines.push(format!("Hours: {hours}"));
        }
        if let Some(water) = &self.water_types {
            lines.push(format!("Water: {water}"));
        }
        lines.push(format!("Access: {}", self.access));
        lines
    }
}

/// Renderable form of a partner, keyed by the partner id
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDescriptor {
    pub key: String,
    pub position: LatLng,
    pub label: String,
    pub is_new: bool,
    pub popup: PopupContent,
    pub directions_url: String,
    pub icon: Arc<MarkerIconConfig>,
}

impl MarkerDescriptor {
    pub fn popup_text(&self) -> String {
        let mut text = self.label.clone();
        for line in self.popup.lines() {
            text.push('\n');
            text.push_str(&line);
        }
        text
    }
}

/// Maps point records to marker descriptors.
///
/// The icon is fixed when the presenter is built; there is no shared default
/// to mutate afterwards.
#[derive(Debug, Clone)]
pub struct MarkerPresenter {
    icon: Arc<MarkerIconConfig>,
}

impl MarkerPresenter {
    pub fn new(icon: MarkerIconConfig) -> Self {
        Self {
            icon: Arc::new(icon),
        }
    }

    pub fn icon(&self) -> &MarkerIconConfig {
        &self.icon
    }

    /// Order-preserving, side-effect-free mapping
    pub fn present(&self, records: &[PointRecord]) -> Vec<MarkerDescriptor> {
        records.iter().map(|record| self.present_one(record)).collect()
    }

    pub fn present_one(&self, record: &PointRecord) -> MarkerDescriptor {
        let label = if record.is_new {
            format!("{} [{}]", record.name, NEW_BADGE)
        } else {
            record.name.clone()
        };

        MarkerDescriptor {
            key: record.id.clone(),
            position: record.position(),
            label,
            is_new: record.is_new,
            popup: PopupContent {
                address: record.address.clone(),
                open_hours: record.open_hours.clone(),
                water_types: water_summary(record.has_cold, record.has_hot),
                access: record.access_type.label(),
            },
            directions_url: directions_url(record.position()),
            icon: self.icon.clone(),
        }
    }
}

impl Default for MarkerPresenter {
    fn default() -> Self {
        Self::new(MarkerIconConfig::default())
    }
}

fn water_summary(has_cold: bool, has_hot: bool) -> Option<String> {
    match (has_cold, has_hot) {
        (true, true) => Some("cold & hot".to_string()),
        (true, false) => Some("cold".to_string()),
        (false, true) => Some("hot".to_string()),
        (false, false) => None,
    }
}

/// Directions link to a destination, built only from its coordinates
pub fn directions_url(destination: LatLng) -> String {
    format!("{DIRECTIONS_BASE_URL}&destination={destination}")
}

/// Key-level difference between two rendered marker lists
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerDiff {
    /// Keys only in the new list, in new-list order
    pub added: Vec<String>,
    /// Keys only in the old list, in old-list order
    pub removed: Vec<String>,
    /// Keys in both lists whose descriptor changed
    pub updated: Vec<String>,
    /// Keys in both lists with identical descriptors
    pub retained: usize,
}

impl MarkerDiff {
    pub fn between(previous: &[MarkerDescriptor], next: &[MarkerDescriptor]) -> Self {
        let old: FxHashMap<&str, &MarkerDescriptor> =
            previous.iter().map(|m| (m.key.as_str(), m)).collect();
        let new_keys: FxHashSet<&str> = next.iter().map(|m| m.key.as_str()).collect();

        let mut diff = MarkerDiff::default();
        for marker in next {
            match old.get(marker.key.as_str()) {
                None => diff.added.push(marker.key.clone()),
                Some(prev) if *prev != marker => diff.updated.push(marker.key.clone()),
                Some(_) => diff.retained += 1,
            }
        }
        diff.removed = previous
            .iter()
            .filter(|m| !new_keys.contains(m.key.as_str()))
            .map(|m| m.key.clone())
            .collect();
        diff
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}
