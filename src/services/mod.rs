pub mod candidate_validator;
pub mod google_maps_service;
pub mod llm_client;
pub mod map_bounds;
pub mod place_resolver;
pub mod recommendation_service;
pub mod trip_service;
