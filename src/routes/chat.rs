use actix_web::{web, HttpResponse, Responder};
use log::{error, info, warn};

use crate::models::chat::{ChatRequest, ChatResponse, ErrorResponse};
use crate::services::map_bounds::compute_bounds;
use crate::services::place_resolver::PlaceResolver;
use crate::services::recommendation_service::RecommendationService;

/// Chat with the travel assistant and get geocoded recommendations back.
pub async fn chat(
    recommender: web::Data<RecommendationService>,
    resolver: web::Data<PlaceResolver>,
    request: web::Json<ChatRequest>,
) -> impl Responder {
    let request = request.into_inner();

    if let Err(reason) = request.validate() {
        warn!("Rejected chat request: {}", reason);
        return HttpResponse::BadRequest()
            .json(ErrorResponse::with_details("Invalid request", reason));
    }

    info!("Processing chat message for city {:?}", request.city);

    let recommendations = match recommender
        .get_recommendations(
            &request.message,
            request.city.as_deref(),
            request.context.as_ref(),
        )
        .await
    {
        Ok(recommendations) => recommendations,
        Err(e) => {
            error!("Chat endpoint error: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Unable to process request"));
        }
    };

    if recommendations.chat_text.trim().is_empty() {
        return HttpResponse::InternalServerError()
            .json(ErrorResponse::new("Failed to generate AI response"));
    }

    let locations = resolver.resolve_all(recommendations.candidates).await;
    let map_bounds = compute_bounds(&locations);

    HttpResponse::Ok().json(ChatResponse {
        success: true,
        chat_response: recommendations.chat_text,
        locations,
        map_bounds,
    })
}
