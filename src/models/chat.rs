use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::location::{MapBounds, ResolvedLocation};

pub const MAX_MESSAGE_CHARS: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub city: Option<String>,
    pub context: Option<RecommendationContext>,
}

impl ChatRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.message.trim().is_empty() {
            return Err("message must not be empty".to_string());
        }
        if self.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(format!(
                "message must be at most {} characters",
                MAX_MESSAGE_CHARS
            ));
        }
        Ok(())
    }
}

/// Hints the client sends along with a chat message. Only the number of
/// previously shown locations is used, so their contents are not inspected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationContext {
    #[serde(default)]
    pub previous_locations: Vec<Value>,
}

impl RecommendationContext {
    pub fn previous_location_count(&self) -> usize {
        self.previous_locations.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub chat_response: String,
    pub locations: Vec<ResolvedLocation>,
    pub map_bounds: Option<MapBounds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            city: None,
            context: None,
        }
    }

    #[test]
    fn test_message_length_limit() {
        assert!(request("Where should I eat in Lisbon?").validate().is_ok());
        assert!(request(&"a".repeat(MAX_MESSAGE_CHARS)).validate().is_ok());
        assert!(request(&"a".repeat(MAX_MESSAGE_CHARS + 1)).validate().is_err());
        // counted in characters, not bytes
        assert!(request(&"é".repeat(MAX_MESSAGE_CHARS)).validate().is_ok());
    }

    #[test]
    fn test_blank_message_rejected() {
        assert!(request("   ").validate().is_err());
    }

    #[test]
    fn test_context_counts_previous_locations() {
        let context: RecommendationContext = serde_json::from_value(serde_json::json!({
            "previous_locations": [{"name": "Louvre"}, {"name": "Orsay"}],
            "unrelated": true
        }))
        .unwrap();
        assert_eq!(context.previous_location_count(), 2);

        let empty: RecommendationContext = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.previous_location_count(), 0);
    }
}
