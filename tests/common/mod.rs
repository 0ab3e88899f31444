use actix_web::{web, App};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use travel_discovery_api::config::Settings;
use travel_discovery_api::middleware::rate_limit::{RateLimitMiddleware, RateLimiter, WINDOW};
use travel_discovery_api::routes;
use travel_discovery_api::services::google_maps_service::{
    GeocodeResult, Geometry, LatLng, PlaceDetails, PlaceSummary, PlacesError, PlacesProvider,
};
use travel_discovery_api::services::llm_client::{ChatCompletion, LlmError};
use travel_discovery_api::services::place_resolver::PlaceResolver;
use travel_discovery_api::services::recommendation_service::RecommendationService;
use travel_discovery_api::services::trip_service::TripStore;

pub const PARIS_REPLY: &str = r#"{
    "chat_response": "Paris has plenty to offer. Here are a few highlights.",
    "locations": [
        {"name": "Louvre Museum", "description": "Home of the Mona Lisa.", "category": "museum", "address": "Rue de Rivoli, 75001 Paris"},
        {"name": "Atlantis Diner", "description": "Does not exist.", "category": "restaurant", "address": "Sunken Street 1"},
        {"name": "Eiffel Tower", "description": "Iron lattice tower.", "category": "landmark", "address": "Champ de Mars, 75007 Paris"},
        {"name": "Half a record", "category": "activity"}
    ]
}"#;

/// Language model stand-in that always answers with the same reply.
pub struct FakeModel {
    reply: Option<String>,
}

impl FakeModel {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl ChatCompletion for FakeModel {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, LlmError> {
        self.reply.clone().ok_or(LlmError::Status {
            status: 500,
            body: "model unavailable".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

/// Places provider with a handful of fixed Paris answers. The Louvre only
/// resolves through text search, the Eiffel Tower only through geocoding.
pub struct FakePlaces {
    search: HashMap<&'static str, &'static str>,
    details: HashMap<&'static str, PlaceDetails>,
    geocode: HashMap<&'static str, GeocodeResult>,
}

fn geometry(lat: f64, lng: f64) -> Option<Geometry> {
    Some(Geometry {
        location: Some(LatLng { lat, lng }),
    })
}

impl FakePlaces {
    pub fn paris() -> Self {
        let mut search = HashMap::new();
        search.insert("Louvre Museum Rue de Rivoli, 75001 Paris", "louvre");

        let mut details = HashMap::new();
        details.insert(
            "louvre",
            PlaceDetails {
                name: Some("Louvre Museum".to_string()),
                formatted_address: Some("Rue de Rivoli, 75001 Paris, France".to_string()),
                geometry: geometry(48.8606, 2.3376),
                price_level: Some(2),
                rating: Some(4.7),
                ..Default::default()
            },
        );

        let mut geocode = HashMap::new();
        geocode.insert(
            "Champ de Mars, 75007 Paris",
            GeocodeResult {
                formatted_address: Some("Champ de Mars, 5 Av. Anatole France, 75007 Paris, France".to_string()),
                geometry: geometry(48.8584, 2.2945),
            },
        );

        Self {
            search,
            details,
            geocode,
        }
    }
}

#[async_trait]
impl PlacesProvider for FakePlaces {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceSummary>, PlacesError> {
        Ok(self
            .search
            .get(query)
            .map(|id| PlaceSummary {
                place_id: id.to_string(),
            })
            .into_iter()
            .collect())
    }

    async fn place_details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        Ok(self.details.get(place_id).cloned())
    }

    async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, PlacesError> {
        Ok(self.geocode.get(address).cloned().into_iter().collect())
    }

    fn photo_url(&self, photo_reference: &str) -> Option<String> {
        Some(format!("https://photos.test/{}", photo_reference))
    }
}

pub fn test_settings() -> Settings {
    Settings::from_lookup(|key| match key {
        "OPENAI_API_KEY" => Some("sk-test-1234567890".to_string()),
        "GOOGLE_MAPS_API_KEY" => Some("maps-test-0987654321".to_string()),
        _ => None,
    })
}

pub struct TestApp {
    pub settings: web::Data<Settings>,
    pub recommender: web::Data<RecommendationService>,
    pub resolver: web::Data<PlaceResolver>,
    pub trips: web::Data<TripStore>,
    pub limiter: Arc<RateLimiter>,
}

impl TestApp {
    pub fn new(model: FakeModel) -> Self {
        let settings = test_settings();
        Self {
            recommender: web::Data::new(RecommendationService::new(Arc::new(model))),
            resolver: web::Data::new(PlaceResolver::new(
                Arc::new(FakePlaces::paris()),
                settings.geocode_concurrency,
            )),
            trips: web::Data::new(TripStore::new()),
            limiter: Arc::new(RateLimiter::new(1000, WINDOW)),
            settings: web::Data::new(settings),
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = web::Data::new(settings);
        self
    }

    pub fn with_rate_limit(mut self, limit: u32) -> Self {
        self.limiter = Arc::new(RateLimiter::new(limit, WINDOW));
        self
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.settings.clone())
            .app_data(self.recommender.clone())
            .app_data(self.resolver.clone())
            .app_data(self.trips.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .wrap(RateLimitMiddleware::new(self.limiter.clone()))
                    .configure(routes::configure),
            )
    }
}

pub fn louvre_json() -> serde_json::Value {
    serde_json::json!({
        "name": "Louvre Museum",
        "description": "Home of the Mona Lisa.",
        "category": "museum",
        "address": "Rue de Rivoli, 75001 Paris, France",
        "lat": 48.8606,
        "lng": 2.3376,
        "additional_info": null,
        "photo_url": null
    })
}
