use std::{env, str::FromStr, time::Duration};

use log::warn;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8000;
const CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const OPENAI_TEMPERATURE: f32 = 0.7;
const OPENAI_MAX_TOKENS: u32 = 1000;

const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

const MAX_REQUESTS_PER_MINUTE: u32 = 10;
const GEOCODE_CONCURRENCY: usize = 3;

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct GoogleMapsSettings {
    pub api_key: String,
    pub base_url: String,
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub openai: OpenAiSettings,
    pub google_maps: GoogleMapsSettings,
    pub max_requests_per_minute: u32,
    /// `None` leaves the HTTP client's own default in place.
    pub upstream_timeout: Option<Duration>,
    pub geocode_concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Missing keys take their
    /// defaults; unparseable values are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let string_or = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let cors_origins = string_or("CORS_ORIGINS", CORS_ORIGINS)
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        let upstream_timeout = parse_var::<u64>(&lookup, "UPSTREAM_TIMEOUT_SECS")
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            host: string_or("HOST", HOST),
            port: parse_var(&lookup, "PORT").unwrap_or(PORT),
            cors_origins,
            openai: OpenAiSettings {
                api_key: string_or("OPENAI_API_KEY", ""),
                base_url: string_or("OPENAI_BASE_URL", OPENAI_BASE_URL),
                model: string_or("OPENAI_MODEL", OPENAI_MODEL),
                temperature: parse_var(&lookup, "OPENAI_TEMPERATURE").unwrap_or(OPENAI_TEMPERATURE),
                max_tokens: parse_var(&lookup, "OPENAI_MAX_TOKENS").unwrap_or(OPENAI_MAX_TOKENS),
            },
            google_maps: GoogleMapsSettings {
                api_key: string_or("GOOGLE_MAPS_API_KEY", ""),
                base_url: string_or("GOOGLE_MAPS_BASE_URL", GOOGLE_MAPS_BASE_URL),
            },
            max_requests_per_minute: parse_var(&lookup, "MAX_REQUESTS_PER_MINUTE")
                .unwrap_or(MAX_REQUESTS_PER_MINUTE),
            upstream_timeout,
            geocode_concurrency: parse_var(&lookup, "GEOCODE_CONCURRENCY")
                .unwrap_or(GEOCODE_CONCURRENCY)
                .max(1),
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value {:?} for {}, using default", raw, key);
            None
        }
    }
}
