use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat >= -90.0
            && self.lat <= 90.0
            && self.lng >= -180.0
            && self.lng <= 180.0
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::str::FromStr for LatLng {
    type Err = crate::MapError;

    /// Parses `"lat,lng"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            crate::MapError::ParseError(format!("expected \"lat,lng\", got {s:?}"))
        })?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| crate::MapError::ParseError(format!("{part:?}: {e}")))
        };
        let coord = LatLng::new(parse(lat)?, parse(lng)?);
        if !coord.is_valid() {
            return Err(crate::MapError::InvalidCoordinates(s.to_string()));
        }
        Ok(coord)
    }
}

impl std::fmt::Display for LatLng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
