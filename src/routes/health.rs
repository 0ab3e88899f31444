use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::config::Settings;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(settings: web::Data<Settings>) -> impl Responder {
    let mut health = HealthStatus {
        status: "healthy".to_string(),
        services: HashMap::new(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let openai_result = check_api_key("OPENAI_API_KEY", &settings.openai.api_key);
    health
        .services
        .insert("openai".to_string(), openai_result.clone());

    let maps_result = check_api_key("GOOGLE_MAPS_API_KEY", &settings.google_maps.api_key);
    health
        .services
        .insert("google_maps".to_string(), maps_result.clone());

    if openai_result.status != "ok" || maps_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

fn check_api_key(name: &str, key: &str) -> ServiceStatus {
    if key.is_empty() {
        return ServiceStatus {
            status: "error".to_string(),
            details: Some(format!("{} not configured", name)),
        };
    }

    ServiceStatus {
        status: "ok".to_string(),
        details: Some(format!("API key configured ({})", mask_key(key))),
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
