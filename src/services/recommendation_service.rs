use std::sync::{Arc, LazyLock};

use log::{debug, error, info, warn};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::models::{chat::RecommendationContext, location::LocationCandidate};
use crate::services::candidate_validator::validate_value;
use crate::services::llm_client::{ChatCompletion, LlmError};

pub const SYSTEM_PROMPT: &str = "You are an expert travel assistant. When users ask about places to visit, respond with a conversational message AND provide structured location data.

Requirements:
1. Provide 3-5 specific location recommendations
2. Include exact addresses for geocoding
3. Write engaging descriptions (50-100 words each)
4. Categorize each location (museum, restaurant, landmark, activity, shopping)
5. Consider user's interests and travel style

Response format: JSON with 'chat_response' and 'locations' array. Each location must have: name, description, category, address.
Example categories: museum, restaurant, landmark, activity, shopping, other";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```(?:json|JSON)?\s*(.*?)\s*```\s*$").expect("code fence pattern is valid")
});

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("failed to get AI recommendations: {0}")]
    UpstreamModel(#[from] LlmError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendations {
    pub chat_text: String,
    pub candidates: Vec<LocationCandidate>,
}

/// Both fields may be absent or `null` in model output.
#[derive(Debug, Deserialize)]
struct ModelPayload {
    #[serde(default)]
    chat_response: Option<String>,
    #[serde(default)]
    locations: Option<Vec<Value>>,
}

pub struct RecommendationService {
    llm: Arc<dyn ChatCompletion>,
}

impl RecommendationService {
    pub fn new(llm: Arc<dyn ChatCompletion>) -> Self {
        Self { llm }
    }

    /// Ask the model for recommendations and turn its answer into validated
    /// candidates. Only a failed completion call is an error; unparseable
    /// output degrades to free text with no candidates.
    pub async fn get_recommendations(
        &self,
        user_message: &str,
        city: Option<&str>,
        context: Option<&RecommendationContext>,
    ) -> Result<Recommendations, RecommendationError> {
        let prompt = build_user_prompt(user_message, city, context);

        let content = self
            .llm
            .complete(SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                error!("Language model call failed ({}): {}", self.llm.model_name(), e);
                RecommendationError::from(e)
            })?;
        debug!("Model raw response: {}", content);

        let recommendations = parse_recommendations(&content);
        info!(
            "Model proposed {} valid location(s)",
            recommendations.candidates.len()
        );
        Ok(recommendations)
    }
}

pub fn build_user_prompt(
    user_message: &str,
    city: Option<&str>,
    context: Option<&RecommendationContext>,
) -> String {
    let mut prompt = format!("Current city: {}\n", city.unwrap_or("Not specified"));

    if let Some(count) = context
        .map(RecommendationContext::previous_location_count)
        .filter(|count| *count > 0)
    {
        prompt.push_str(&format!("Previous recommendations: {} locations\n", count));
    }

    prompt.push_str(&format!(
        "User question: {}\n\nProvide travel recommendations in JSON format.",
        user_message
    ));
    prompt
}

/// Parse model output into chat text and candidates.
///
/// Output that is not a JSON object of the expected shape becomes the chat
/// text verbatim with an empty candidate list.
pub fn parse_recommendations(content: &str) -> Recommendations {
    let payload = strip_code_fence(content);

    match serde_json::from_str::<ModelPayload>(payload) {
        Ok(parsed) => {
            let candidates = parsed
                .locations
                .unwrap_or_default()
                .into_iter()
                .filter_map(|raw| {
                    let label = raw.get("name").cloned().unwrap_or(Value::Null);
                    match validate_value(raw) {
                        Ok(candidate) => Some(candidate),
                        Err(e) => {
                            warn!("Dropping invalid location {}: {}", label, e);
                            None
                        }
                    }
                })
                .collect();

            Recommendations {
                chat_text: parsed.chat_response.unwrap_or_default(),
                candidates,
            }
        }
        Err(e) => {
            warn!("Failed to parse JSON from model response: {}", e);
            Recommendations {
                chat_text: content.to_string(),
                candidates: Vec::new(),
            }
        }
    }
}

fn strip_code_fence(content: &str) -> &str {
    CODE_FENCE
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map_or(content, |body| body.as_str())
}
