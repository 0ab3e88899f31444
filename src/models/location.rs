use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationCategory {
    Museum,
    Restaurant,
    Landmark,
    Activity,
    Shopping,
    Other,
}

impl LocationCategory {
    /// Map a model-provided label onto a category. Only exact lowercase labels
    /// are recognised; anything else becomes `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "museum" => LocationCategory::Museum,
            "restaurant" => LocationCategory::Restaurant,
            "landmark" => LocationCategory::Landmark,
            "activity" => LocationCategory::Activity,
            "shopping" => LocationCategory::Shopping,
            _ => LocationCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::Museum => "museum",
            LocationCategory::Restaurant => "restaurant",
            LocationCategory::Landmark => "landmark",
            LocationCategory::Activity => "activity",
            LocationCategory::Shopping => "shopping",
            LocationCategory::Other => "other",
        }
    }
}

/// A location record exactly as the language model emitted it.
///
/// `category` stays untyped so that non-string labels can be coerced instead
/// of failing the whole record.
#[derive(Debug, Default, Deserialize)]
pub struct RawCandidate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Value>,
    pub address: Option<String>,
}

/// A model-proposed location that has passed validation but is not geocoded.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationCandidate {
    pub name: String,
    pub description: String,
    pub category: LocationCategory,
    pub address: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Returns `None` unless latitude is within [-90, 90] and longitude within
    /// [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
        let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
        (lat_ok && lng_ok).then_some(Self { lat, lng })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdditionalInfo {
    pub opening_hours: Option<String>,
    pub price_range: Option<String>,
    pub estimated_visit_time: Option<String>,
    pub rating: Option<f64>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub name: String,
    pub description: String,
    pub category: LocationCategory,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    pub additional_info: Option<AdditionalInfo>,
    pub photo_url: Option<String>,
}

impl ResolvedLocation {
    pub fn new(candidate: LocationCandidate, address: String, coordinates: Coordinates) -> Self {
        Self {
            name: candidate.name,
            description: candidate.description,
            category: candidate.category,
            address,
            lat: coordinates.lat,
            lng: coordinates.lng,
            additional_info: None,
            photo_url: None,
        }
    }

    /// Coordinates of this location, if they are within range. Locations that
    /// arrive from clients are checked with this before being stored.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}
