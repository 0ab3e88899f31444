use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::location::ResolvedLocation;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripItem {
    pub id: String,
    pub location: ResolvedLocation,
    pub added_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<TripItem>,
}

impl Trip {
    pub fn contains(&self, location: &ResolvedLocation) -> bool {
        self.items.iter().any(|item| {
            item.location.name == location.name && item.location.address == location.address
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripResponse {
    pub success: bool,
    pub trip: Trip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLocationRequest {
    pub location: ResolvedLocation,
    pub trip_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveLocationQuery {
    pub trip_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DefaultTripId {
    pub trip_id: String,
}
