use super::prompt::EXTRACTION_PROMPT;
use crate::config::ExtractionConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// MIME type used when the upload does not declare an image type
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Turns a timecard image into the model's raw text answer.
///
/// `Ok` carries the text as returned (trimmed, fences still present);
/// `Err` carries the reason the call failed.
#[async_trait]
pub trait TimecardExtractor: Send + Sync {
    async fn extract(&self, image: &[u8], mime_type: &str) -> Result<String>;
}

/// Pick the data URL MIME type from an upload's declared content type.
pub fn image_mime_type(content_type: Option<&str>) -> &str {
    match content_type {
        Some(ct) if ct.starts_with("image/") => ct,
        _ => DEFAULT_IMAGE_MIME,
    }
}

/// Encode image bytes as a `data:` URL
pub fn image_data_url(image: &[u8], mime_type: &str) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(image)
    )
}

/// Extractor backed by an OpenAI-compatible chat-completions endpoint
/// (Groq by default).
pub struct ChatCompletionsExtractor {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatCompletionsExtractor {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_config(config: &ExtractionConfig, api_key: impl Into<String>) -> Self {
        Self::new(api_key, config.base_url.clone(), config.model.clone())
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl TimecardExtractor for ChatCompletionsExtractor {
    async fn extract(&self, image: &[u8], mime_type: &str) -> Result<String> {
        info!(
            "Extracting timecard via {} ({} bytes, {})",
            self.model,
            image.len(),
            mime_type
        );

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: EXTRACTION_PROMPT,
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: image_data_url(image, mime_type),
                        },
                    },
                ],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Vision model request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            bail!("Vision model returned {}: {}", status, error_body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to decode vision model response")?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("Vision model response had no message content")?;

        debug!("Vision model returned {} chars", content.len());

        Ok(content.trim().to_string())
    }
}
