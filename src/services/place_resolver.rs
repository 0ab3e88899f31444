//! Place Resolver
//!
//! Turns validated candidates into geocoded locations. Each candidate is
//! looked up in two tiers:
//!
//! 1. Places text search on `"{name} {address}"`, then field-limited details
//!    for the top hit. This tier carries enrichment (hours, price, rating,
//!    website, photo).
//! 2. Plain geocoding of the raw address, only when tier 1 produced nothing.
//!
//! Failures are isolated per candidate: provider errors are logged and count
//! as a miss, and a miss simply drops that candidate from the batch.

use std::sync::Arc;

use futures::{future, stream, StreamExt};
use log::{debug, info, warn};

use crate::models::location::{AdditionalInfo, LocationCandidate, ResolvedLocation};
use crate::services::google_maps_service::{GeocodeResult, PlaceDetails, PlacesProvider};

/// Dollar-sign ladder for provider price levels; unknown levels get "$$".
pub fn price_range(price_level: i64) -> &'static str {
    match price_level {
        1 => "$",
        2 => "$$",
        3 => "$$$",
        4 => "$$$$",
        _ => "$$",
    }
}

pub struct PlaceResolver {
    places: Arc<dyn PlacesProvider>,
    concurrency: usize,
}

impl PlaceResolver {
    pub fn new(places: Arc<dyn PlacesProvider>, concurrency: usize) -> Self {
        Self {
            places,
            concurrency: concurrency.max(1),
        }
    }

    /// Resolve every candidate independently, keeping only the successes in
    /// their original relative order.
    pub async fn resolve_all(&self, candidates: Vec<LocationCandidate>) -> Vec<ResolvedLocation> {
        let requested = candidates.len();

        let resolved: Vec<ResolvedLocation> = stream::iter(candidates)
            .map(|candidate| self.resolve(candidate))
            .buffered(self.concurrency)
            .filter_map(future::ready)
            .collect()
            .await;

        info!("Resolved {} of {} location(s)", resolved.len(), requested);
        resolved
    }

    pub async fn resolve(&self, candidate: LocationCandidate) -> Option<ResolvedLocation> {
        if let Some(details) = self.search_tier(&candidate).await {
            let location = self.location_from_place(candidate, details);
            if location.is_none() {
                warn!("Place details carried no usable geometry, dropping location");
            }
            return location;
        }

        match self.geocode_tier(&candidate).await {
            Some(result) => {
                let name = candidate.name.clone();
                let location = location_from_geocode(candidate, result);
                if location.is_none() {
                    warn!("Geocode result for {} carried no usable geometry", name);
                }
                location
            }
            None => {
                warn!("Could not resolve location {}", candidate.name);
                None
            }
        }
    }

    async fn search_tier(&self, candidate: &LocationCandidate) -> Option<PlaceDetails> {
        let query = format!("{} {}", candidate.name, candidate.address);

        let hits = match self.places.search_places(&query).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Places search failed for {}: {}", candidate.name, e);
                return None;
            }
        };
        let top_hit = hits.into_iter().next()?;

        match self.places.place_details(&top_hit.place_id).await {
            Ok(details) => details,
            Err(e) => {
                warn!("Place details failed for {}: {}", candidate.name, e);
                None
            }
        }
    }

    async fn geocode_tier(&self, candidate: &LocationCandidate) -> Option<GeocodeResult> {
        debug!("Falling back to geocoding for {}", candidate.name);
        match self.places.geocode(&candidate.address).await {
            Ok(results) => results.into_iter().next(),
            Err(e) => {
                warn!("Geocoding failed for {}: {}", candidate.name, e);
                None
            }
        }
    }

    fn location_from_place(
        &self,
        candidate: LocationCandidate,
        details: PlaceDetails,
    ) -> Option<ResolvedLocation> {
        let coordinates = details.geometry.as_ref()?.coordinates()?;

        let additional_info = AdditionalInfo {
            // first weekday entry only, treated as today's hours
            opening_hours: details
                .opening_hours
                .and_then(|hours| hours.weekday_text.into_iter().next()),
            price_range: details
                .price_level
                .map(|level| price_range(level).to_string()),
            estimated_visit_time: None,
            rating: details.rating.filter(|rating| (1.0..=5.0).contains(rating)),
            website: details.website,
        };
        let photo_url = details
            .photos
            .first()
            .and_then(|photo| self.places.photo_url(&photo.photo_reference));

        let address = details
            .formatted_address
            .unwrap_or_else(|| candidate.address.clone());

        let mut location = ResolvedLocation::new(candidate, address, coordinates);
        location.additional_info = Some(additional_info);
        location.photo_url = photo_url;
        Some(location)
    }
}

fn location_from_geocode(candidate: LocationCandidate, result: GeocodeResult) -> Option<ResolvedLocation> {
    let coordinates = result.geometry.as_ref()?.coordinates()?;
    let address = result
        .formatted_address
        .unwrap_or_else(|| candidate.address.clone());
    Some(ResolvedLocation::new(candidate, address, coordinates))
}
