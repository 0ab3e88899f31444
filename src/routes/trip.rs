use actix_web::{web, HttpResponse, Responder};
use log::error;

use crate::models::chat::ErrorResponse;
use crate::models::trip::{AddLocationRequest, DefaultTripId, RemoveLocationQuery, Trip, TripResponse};
use crate::services::trip_service::{TripError, TripStore};

fn trip_result(result: Result<Trip, TripError>) -> HttpResponse {
    match result {
        Ok(trip) => HttpResponse::Ok().json(TripResponse {
            success: true,
            trip,
        }),
        Err(TripError::NotFound(id)) => {
            HttpResponse::NotFound().json(ErrorResponse::with_details("Trip not found", id))
        }
        Err(e) => {
            error!("Trip store error: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new(e.to_string()))
        }
    }
}

pub async fn get_default_trip(store: web::Data<TripStore>) -> impl Responder {
    trip_result(store.get_trip(None))
}

pub async fn get_trip(store: web::Data<TripStore>, path: web::Path<String>) -> impl Responder {
    trip_result(store.get_trip(Some(path.as_str())))
}

pub async fn add_location(
    store: web::Data<TripStore>,
    request: web::Json<AddLocationRequest>,
) -> impl Responder {
    let AddLocationRequest { location, trip_id } = request.into_inner();

    if location.coordinates().is_none() {
        return HttpResponse::BadRequest().json(ErrorResponse::with_details(
            "Invalid location",
            format!("coordinates ({}, {}) are out of range", location.lat, location.lng),
        ));
    }

    trip_result(store.add_location(location, trip_id.as_deref()))
}

pub async fn remove_location(
    store: web::Data<TripStore>,
    path: web::Path<String>,
    query: web::Query<RemoveLocationQuery>,
) -> impl Responder {
    trip_result(store.remove_location(path.as_str(), query.trip_id.as_deref()))
}

pub async fn get_default_trip_id(store: web::Data<TripStore>) -> impl Responder {
    HttpResponse::Ok().json(DefaultTripId {
        trip_id: store.default_trip_id().to_string(),
    })
}
