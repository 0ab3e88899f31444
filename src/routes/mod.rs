use actix_web::{error, web, HttpResponse};

use crate::models::chat::ErrorResponse;

pub mod chat;
pub mod health;
pub mod trip;

/// Mount the `/api` routes. The caller owns the scope and its middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/chat", web::post().to(chat::chat))
        .service(
            web::scope("/trip")
                .route("", web::get().to(trip::get_default_trip))
                .route("/default/id", web::get().to(trip::get_default_trip_id))
                .route("/add-location", web::post().to(trip::add_location))
                .route(
                    "/remove-location/{item_id}",
                    web::delete().to(trip::remove_location),
                )
                .route("/{trip_id}", web::get().to(trip::get_trip)),
        );
}

/// Malformed JSON bodies get the same error envelope as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::with_details("Invalid request", err.to_string()));
        error::InternalError::from_response(err, response).into()
    })
}
