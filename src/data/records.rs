//! Records returned by the remote data service
//!
//! These mirror the JSON shapes of the query and announcement endpoints and
//! are never mutated after decoding; a new fetch replaces them wholesale.

use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// How a visitor gets water at a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    /// Help yourself
    Free,
    /// Ask a member of staff to refill
    AskStaff,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Free => "free",
            AccessType::AskStaff => "ask_staff",
        }
    }

    /// Human label shown in the marker popup
    pub fn label(&self) -> &'static str {
        match self {
            AccessType::Free => "free",
            AccessType::AskStaff => "ask staff",
        }
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discoverable refill partner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_hours: Option<String>,
    pub has_hot: bool,
    pub has_cold: bool,
    pub access_type: AccessType,
    /// Server-computed recency flag
    pub is_new: bool,
}

impl PointRecord {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// One entry of the secondary announcement feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

/// Envelope shared by both endpoints; a missing `items` key decodes as empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}
