use std::time::Duration;

use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ResponseFormat,
    ResponseFormatJsonSchema,
};
use reqwest::StatusCode;

use crate::{
    config::{parse_llm_provider_model, LlmConfig},
    error::{CompassError, Result},
    llm::provider::ModelRequest,
    llm::schema::ANALYSIS_SCHEMA_NAME,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
const OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
const LMSTUDIO_BASE_URL: &str = "http://localhost:1234/v1";

/// Longest provider error body quoted back in diagnostics.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Markers providers put in error bodies when the key itself is bad. Gemini
/// answers an invalid key with HTTP 400 and `API_KEY_INVALID`.
const REJECTED_KEY_MARKERS: &[&str] = &[
    "api key not valid",
    "api_key_invalid",
    "invalid api key",
    "invalid_api_key",
    "incorrect api key",
];

#[derive(Debug, Clone)]
struct ApiConfig {
    base_url: String,
    model: String,
    timeout_secs: u64,
}

/// Chat-completions client bound to one API key. Built per request so the
/// key is read fresh from the credential store every time.
#[derive(Clone)]
pub(crate) struct LlmApiClient {
    client: reqwest::Client,
    config: ApiConfig,
    api_key: String,
}

impl LlmApiClient {
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(CompassError::Credentials(
                "API key required for this provider".to_string(),
            ));
        }

        let api_config = ApiConfig::from_llm_config(config);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|error| {
                CompassError::Internal(format!("Failed to create LLM HTTP client: {error}"))
            })?;

        Ok(Self {
            client,
            config: api_config,
            api_key: api_key.to_string(),
        })
    }

    /// Issue exactly one chat completion constrained to the request's JSON
    /// schema and return the raw message content. Nothing is retried.
    pub async fn complete_with_schema(&self, request: &ModelRequest) -> Result<String> {
        let chat_request = self.build_request(request)?;
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        tracing::debug!(model = %self.config.model, "Sending mood analysis request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&chat_request)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    CompassError::Provider("LLM request timed out".to_string())
                } else {
                    CompassError::Provider(self.redact(&format!("LLM request failed: {error}")))
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            CompassError::Provider(self.redact(&format!("Failed to read LLM response: {error}")))
        })?;

        if !status.is_success() {
            return Err(self.map_http_error(status, &body));
        }

        let completion: CreateChatCompletionResponse =
            serde_json::from_str(&body).map_err(|error| {
                CompassError::Provider(format!("Failed to parse LLM response: {error}"))
            })?;

        let content = Self::extract_content(completion)?;
        tracing::debug!(response_len = content.len(), "LLM JSON response received");
        Ok(content)
    }

    fn build_request(&self, request: &ModelRequest) -> Result<CreateChatCompletionRequest> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system_instruction.as_str())
                .build()
                .map_err(|error| {
                    CompassError::Internal(format!("Invalid system instruction: {error}"))
                })?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.prompt.as_str())
                .build()
                .map_err(|error| CompassError::Internal(format!("Invalid user prompt: {error}")))?
                .into(),
        ];

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: Some("Mood analysis with wellness tips and recommendations".into()),
                name: ANALYSIS_SCHEMA_NAME.to_string(),
                schema: Some(request.schema.clone()),
                strict: Some(true),
            },
        };

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(self.config.model.clone())
            .messages(messages)
            .response_format(response_format);

        builder.build().map_err(|error| {
            CompassError::Internal(format!("Invalid LLM completion request: {error}"))
        })
    }

    fn extract_content(response: CreateChatCompletionResponse) -> Result<String> {
        let message = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompassError::Provider("LLM response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if message.trim().is_empty() {
            return Err(CompassError::Provider(
                "LLM response contained empty content".to_string(),
            ));
        }

        Ok(message)
    }

    fn map_http_error(&self, status: StatusCode, body: &str) -> CompassError {
        let detail = truncate(&self.redact(body.trim()), MAX_ERROR_BODY_CHARS);

        if is_rejected_key(status, body) {
            return CompassError::Credentials(format!(
                "The model provider rejected the API key ({status}): {detail}"
            ));
        }

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                CompassError::Provider(format!("Rate limit exceeded ({status}): {detail}"))
            }
            _ if status.is_server_error() => {
                CompassError::Provider(format!("Provider server error ({status}): {detail}"))
            }
            _ => CompassError::Provider(format!("LLM API error ({status}): {detail}")),
        }
    }

    fn redact(&self, message: &str) -> String {
        redact_secret(message, &self.api_key)
    }
}

/// A 401/403, or any error body naming an invalid key, means the key was refused.
fn is_rejected_key(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return true;
    }
    let body = body.to_lowercase();
    REJECTED_KEY_MARKERS
        .iter()
        .any(|marker| body.contains(marker))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

/// Replace every occurrence of `secret` in `message`.
pub(crate) fn redact_secret(message: &str, secret: &str) -> String {
    if secret.is_empty() {
        return message.to_string();
    }
    message.replace(secret, "[redacted]")
}

impl ApiConfig {
    fn from_llm_config(config: &LlmConfig) -> Self {
        let (provider, model) = parse_llm_provider_model(&config.model);

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url(provider).to_string());

        let normalized_model = if provider.eq_ignore_ascii_case("local") {
            config.model.clone()
        } else {
            model.to_string()
        };

        Self {
            base_url,
            model: normalized_model,
            timeout_secs: config.timeout_secs,
        }
    }
}

pub(crate) fn default_base_url(provider: &str) -> &'static str {
    match provider.to_lowercase().as_str() {
        "gemini" => GEMINI_BASE_URL,
        "openai" => OPENAI_BASE_URL,
        "openrouter" => OPENROUTER_BASE_URL,
        "ollama" => OLLAMA_BASE_URL,
        "lmstudio" => LMSTUDIO_BASE_URL,
        _ => OPENAI_BASE_URL,
    }
}
