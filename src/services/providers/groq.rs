/// Groq completion provider
///
/// Groq exposes an OpenAI-compatible `/chat/completions` endpoint; each prompt is
/// sent as a single user message.
use crate::{
    error::{AppError, AppResult},
    services::providers::{CompletionProvider, CompletionRequest},
};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

const PROVIDER_NAME: &str = "Groq";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatResponse {
    /// Trimmed text of the first choice, if it has any
    fn into_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }
}

#[derive(Clone)]
pub struct GroqProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl GroqProvider {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        let url = format!("{}/chat/completions", self.api_url);
        let body = ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                model = %request.model,
                status = %status,
                body = %body,
                provider = PROVIDER_NAME,
                "Groq request failed"
            );
            return Err(AppError::Provider {
                provider: PROVIDER_NAME,
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::malformed(PROVIDER_NAME, e.without_url()))?;

        let text = chat.into_text().ok_or_else(|| {
            AppError::Generation(format!("{} returned no content", PROVIDER_NAME))
        })?;

        tracing::debug!(
            model = %request.model,
            chars = text.len(),
            provider = PROVIDER_NAME,
            "Completion generated"
        );

        Ok(text)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
