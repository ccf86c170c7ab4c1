//! reqwest-based analyzer for OpenAI-compatible chat-completions endpoints
//! with image input (Groq by default).

use super::food_table;
use super::{Analysis, AnalyzerError, EstimateSource, ImagePayload, MealAnalyzer, MealEstimate};
use crate::config::AnalyzerConfig;
use crate::models::entry::lenient_u32;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Upper bound accepted for a single meal.
pub const MAX_MEAL_KCAL: u32 = 10_000;

/// Plain-text answers longer than this are not treated as a dish name.
const MAX_DISH_NAME_WORDS: usize = 5;

const PROMPT: &str = "Identify the meal in this photo and estimate its nutrition for the portion shown. \
Reply with a single JSON object and nothing else, using exactly these keys: \
\"name\" (short dish name), \"kcal\" (integer), \"protein\", \"carbs\", \"fat\" (integer grams) \
and \"reasoning\" (one or two sentences explaining the estimate).";

#[derive(Clone, Debug)]
pub struct GroqAnalyzer {
    base_url: String,
    model: String,
    api_key: Option<SecretString>,
    api_key_env: String,
    max_tokens: u32,
    temperature: f32,
    client: reqwest::Client,
}

impl GroqAnalyzer {
    /// Build an analyzer from the config, reading the API key from the
    /// environment variable the config names.
    pub fn from_config(cfg: &AnalyzerConfig) -> Result<Self, AnalyzerError> {
        Self::from_config_with(cfg, |k| std::env::var(k).ok())
    }

    /// Same as [`GroqAnalyzer::from_config`] with an injectable variable
    /// lookup, so tests do not touch the process environment.
    pub fn from_config_with<F>(cfg: &AnalyzerConfig, get: F) -> Result<Self, AnalyzerError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let api_key = get(&cfg.api_key_env)
            .filter(|k| !k.trim().is_empty())
            .map(|k| SecretString::new(k.into()));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key,
            api_key_env: cfg.api_key_env.clone(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_body(&self, image: &ImagePayload, hint: Option<&str>) -> ChatRequest {
        let text = match hint.map(str::trim).filter(|h| !h.is_empty()) {
            Some(h) => format!("{PROMPT}\nAdditional details from the user: {h}"),
            None => PROMPT.to_string(),
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image.data_url(),
                        },
                    },
                ],
            }],
            max_completion_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }

    async fn request(
        &self,
        image: &ImagePayload,
        hint: Option<&str>,
    ) -> Result<MealEstimate, AnalyzerError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AnalyzerError::MissingApiKey(self.api_key_env.clone()))?;

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(key.expose_secret())
            .json(&self.build_body(image, hint))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalyzerError::Status {
                status: status.as_u16(),
                body: body.chars().take(256).collect(),
            });
        }

        let text = resp.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| AnalyzerError::Decode(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AnalyzerError::Decode("response has no message content".into()))?;

        parse_content(&content)
    }
}

#[async_trait]
impl MealAnalyzer for GroqAnalyzer {
    async fn analyze(&self, image: &ImagePayload, hint: Option<&str>) -> Analysis {
        match self.request(image, hint).await {
            Ok(estimate) => {
                info!(
                    name = %estimate.name,
                    kcal = estimate.kcal,
                    source = ?estimate.source,
                    "meal analyzed"
                );
                Analysis::Estimated(estimate)
            }
            Err(reason) => {
                warn!(error = %reason, "meal analysis failed, using fallback estimate");
                Analysis::fallback(reason)
            }
        }
    }
}

// ---- wire types ----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_completion_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: Vec<ContentPart>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// The JSON object the model is asked to produce.
#[derive(Debug, Deserialize)]
struct RawEstimate {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "calories", deserialize_with = "lenient_u32")]
    kcal: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    protein: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    carbs: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    fat: u32,
    #[serde(default)]
    reasoning: Option<String>,
}

impl RawEstimate {
    fn into_estimate(self) -> MealEstimate {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown meal".to_string());

        MealEstimate {
            name,
            kcal: self.kcal.min(MAX_MEAL_KCAL),
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            reasoning: self.reasoning.unwrap_or_default().trim().to_string(),
            description: None,
            source: EstimateSource::Model,
        }
    }
}

/// Map the model's message content to an estimate.
///
/// A JSON object (optionally fenced or surrounded by prose) is read as a
/// structured estimate; a short plain answer is treated as a dish name and
/// looked up in the food table; anything else is a decode error.
pub fn parse_content(content: &str) -> Result<MealEstimate, AnalyzerError> {
    let body = strip_fences(content.trim());
    if body.is_empty() {
        return Err(AnalyzerError::Decode("empty message content".into()));
    }

    if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}'))
        && start < end
    {
        let raw: RawEstimate = serde_json::from_str(&body[start..=end])
            .map_err(|e| AnalyzerError::Decode(format!("estimate is not valid JSON: {e}")))?;
        return Ok(raw.into_estimate());
    }

    let words = body.split_whitespace().count();
    if body.contains('\n') || words > MAX_DISH_NAME_WORDS {
        return Err(AnalyzerError::Decode(format!(
            "unexpected free-text answer: {}",
            body.chars().take(80).collect::<String>()
        )));
    }

    Ok(food_table::estimate_for(body))
}

fn strip_fences(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    // drop the info string (e.g. `json`) on the opening fence line
    let rest = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
