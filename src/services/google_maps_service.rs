//! Google Maps Places and Geocoding integration
//!
//! Three read-only endpoints are used: text search to find a place by name and
//! address, place details (field limited) for the top hit, and plain address
//! geocoding as a fallback.
//!
//! ## Setup
//! 1. Enable the Places API and the Geocoding API in Google Cloud Console
//! 2. Set the environment variable: `GOOGLE_MAPS_API_KEY=your_api_key_here`

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::config::GoogleMapsSettings;
use crate::models::location::Coordinates;

const DETAIL_FIELDS: &str =
    "name,formatted_address,geometry,opening_hours,price_level,rating,website,business_status,photos";
const PHOTO_MAX_WIDTH: &str = "200";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("{endpoint} returned status {status}: {}", .message.as_deref().unwrap_or("no details"))]
    Status {
        endpoint: &'static str,
        status: String,
        message: Option<String>,
    },
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

impl Geometry {
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.location
            .and_then(|location| Coordinates::new(location.lat, location.lng))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub opening_hours: Option<OpeningHours>,
    pub price_level: Option<i64>,
    pub rating: Option<f64>,
    pub website: Option<String>,
    pub business_status: Option<String>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    status: String,
    error_message: Option<String>,
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    status: String,
    error_message: Option<String>,
    result: Option<PlaceDetails>,
}

/// Read-only places and geocoding lookups.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceSummary>, PlacesError>;

    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError>;

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, PlacesError>;

    /// Public URL for a photo reference returned by place details.
    fn photo_url(&self, photo_reference: &str) -> Option<String>;
}

#[derive(Clone)]
pub struct GoogleMapsClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

/// Every request URL carries the API key, so it is dropped before the error
/// can be displayed or logged.
fn http_error(e: reqwest::Error) -> PlacesError {
    PlacesError::Http(e.without_url())
}

impl GoogleMapsClient {
    pub fn new(settings: &GoogleMapsSettings, timeout: Option<Duration>) -> Result<Self, PlacesError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build().map_err(http_error)?,
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, PlacesError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Calling Google Maps endpoint {}", path);

        let response = self
            .http_client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(http_error)?
            .error_for_status()
            .map_err(http_error)?;

        response.json().await.map_err(http_error)
    }
}

/// `Ok(true)` when the payload carries data, `Ok(false)` for an empty but
/// successful answer.
fn check_status(
    endpoint: &'static str,
    status: &str,
    error_message: Option<String>,
) -> Result<bool, PlacesError> {
    match status {
        "OK" => Ok(true),
        "ZERO_RESULTS" | "NOT_FOUND" => Ok(false),
        other => Err(PlacesError::Status {
            endpoint,
            status: other.to_string(),
            message: error_message,
        }),
    }
}

#[async_trait]
impl PlacesProvider for GoogleMapsClient {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceSummary>, PlacesError> {
        let envelope: ResultsEnvelope<PlaceSummary> = self
            .get("place/textsearch/json", &[("query", query)])
            .await?;

        if check_status("place text search", &envelope.status, envelope.error_message)? {
            Ok(envelope.results)
        } else {
            Ok(Vec::new())
        }
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        let envelope: DetailsEnvelope = self
            .get(
                "place/details/json",
                &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
            )
            .await?;

        if check_status("place details", &envelope.status, envelope.error_message)? {
            Ok(envelope.result)
        } else {
            Ok(None)
        }
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, PlacesError> {
        let envelope: ResultsEnvelope<GeocodeResult> =
            self.get("geocode/json", &[("address", address)]).await?;

        if check_status("geocode", &envelope.status, envelope.error_message)? {
            Ok(envelope.results)
        } else {
            Ok(Vec::new())
        }
    }

    fn photo_url(&self, photo_reference: &str) -> Option<String> {
        Url::parse_with_params(
            &format!("{}/place/photo", self.base_url),
            &[
                ("maxwidth", PHOTO_MAX_WIDTH),
                ("photoreference", photo_reference),
                ("key", self.api_key.as_str()),
            ],
        )
        .map(String::from)
        .ok()
    }
}
