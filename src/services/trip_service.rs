use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;
use log::{debug, info};
use thiserror::Error;
use uuid::Uuid;

use crate::models::location::ResolvedLocation;
use crate::models::trip::{Trip, TripItem};

pub const DEFAULT_TRIP_NAME: &str = "My Trip";

#[derive(Debug, Error, PartialEq)]
pub enum TripError {
    #[error("Trip {0} not found")]
    NotFound(String),
    #[error("Trip storage unavailable: {0}")]
    Storage(String),
}

impl<T> From<PoisonError<T>> for TripError {
    fn from(e: PoisonError<T>) -> Self {
        TripError::Storage(e.to_string())
    }
}

/// In-memory trip registry. Created once at startup with a default trip and
/// shared with handlers through `web::Data`.
pub struct TripStore {
    trips: RwLock<HashMap<String, Trip>>,
    default_trip_id: String,
}

impl Default for TripStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TripStore {
    pub fn new() -> Self {
        let default_trip = Trip {
            id: Uuid::new_v4().to_string(),
            name: DEFAULT_TRIP_NAME.to_string(),
            created_at: Utc::now(),
            items: Vec::new(),
        };
        let default_trip_id = default_trip.id.clone();
        debug!("Created default trip {}", default_trip_id);

        let mut trips = HashMap::new();
        trips.insert(default_trip_id.clone(), default_trip);

        Self {
            trips: RwLock::new(trips),
            default_trip_id,
        }
    }

    pub fn default_trip_id(&self) -> &str {
        &self.default_trip_id
    }

    fn resolve_id<'a>(&'a self, trip_id: Option<&'a str>) -> &'a str {
        trip_id.unwrap_or(self.default_trip_id.as_str())
    }

    /// Snapshot of a trip; `None` selects the default trip.
    pub fn get_trip(&self, trip_id: Option<&str>) -> Result<Trip, TripError> {
        let id = self.resolve_id(trip_id);
        let trips = self.trips.read()?;
        trips
            .get(id)
            .cloned()
            .ok_or_else(|| TripError::NotFound(id.to_string()))
    }

    /// Append a location unless the trip already holds one with the same name
    /// and address. Returns the trip after the (possible) insert.
    pub fn add_location(
        &self,
        location: ResolvedLocation,
        trip_id: Option<&str>,
    ) -> Result<Trip, TripError> {
        let id = self.resolve_id(trip_id);
        let mut trips = self.trips.write()?;
        let trip = trips
            .get_mut(id)
            .ok_or_else(|| TripError::NotFound(id.to_string()))?;

        if trip.contains(&location) {
            debug!("{} is already in trip {}", location.name, id);
            return Ok(trip.clone());
        }

        info!("Adding {} to trip {}", location.name, id);
        trip.items.push(TripItem {
            id: Uuid::new_v4().to_string(),
            location,
            added_at: Utc::now(),
            notes: None,
        });
        Ok(trip.clone())
    }

    /// Remove an item by id. Unknown items are ignored.
    pub fn remove_location(&self, item_id: &str, trip_id: Option<&str>) -> Result<Trip, TripError> {
        let id = self.resolve_id(trip_id);
        let mut trips = self.trips.write()?;
        let trip = trips
            .get_mut(id)
            .ok_or_else(|| TripError::NotFound(id.to_string()))?;

        let before = trip.items.len();
        trip.items.retain(|item| item.id != item_id);
        if trip.items.len() < before {
            info!("Removed item {} from trip {}", item_id, id);
        }
        Ok(trip.clone())
    }
}
