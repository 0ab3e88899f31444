use std::{io, sync::Arc};

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use travel_discovery_api::config::Settings;
use travel_discovery_api::middleware::rate_limit::{RateLimitMiddleware, RateLimiter, WINDOW};
use travel_discovery_api::routes;
use travel_discovery_api::services::google_maps_service::GoogleMapsClient;
use travel_discovery_api::services::llm_client::OpenAiClient;
use travel_discovery_api::services::place_resolver::PlaceResolver;
use travel_discovery_api::services::recommendation_service::RecommendationService;
use travel_discovery_api::services::trip_service::TripStore;

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .supports_credentials();

    if origins.iter().any(|origin| origin == "*") {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env();
    if settings.openai.api_key.is_empty() {
        warn!("OPENAI_API_KEY is not set, chat requests will fail");
    }
    if settings.google_maps.api_key.is_empty() {
        warn!("GOOGLE_MAPS_API_KEY is not set, locations will not resolve");
    }

    let llm = OpenAiClient::new(&settings.openai, settings.upstream_timeout).map_err(io::Error::other)?;
    let places =
        GoogleMapsClient::new(&settings.google_maps, settings.upstream_timeout).map_err(io::Error::other)?;

    let recommender = web::Data::new(RecommendationService::new(Arc::new(llm)));
    let resolver = web::Data::new(PlaceResolver::new(
        Arc::new(places),
        settings.geocode_concurrency,
    ));
    let trips = web::Data::new(TripStore::new());
    let limiter = Arc::new(RateLimiter::new(settings.max_requests_per_minute, WINDOW));

    let host = settings.host.clone();
    let port = settings.port;
    let settings = web::Data::new(settings);

    info!("Starting travel discovery API on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r - Status: %s - Time: %Ts"))
            .wrap(build_cors(&settings.cors_origins))
            .app_data(settings.clone())
            .app_data(recommender.clone())
            .app_data(resolver.clone())
            .app_data(trips.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .wrap(RateLimitMiddleware::new(limiter.clone()))
                    .configure(routes::configure),
            )
    })
    .bind((host, port))?
    .run()
    .await?;

    info!("Travel discovery API shut down");
    Ok(())
}
