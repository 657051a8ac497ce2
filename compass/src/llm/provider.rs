use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::{parse_llm_provider_model, LlmConfig};
use crate::error::{CompassError, Result};
use crate::llm::api::{default_base_url, LlmApiClient};

/// Everything the model needs for one structured analysis call.
#[derive(Clone)]
pub struct ModelRequest {
    pub system_instruction: String,
    pub prompt: String,
    /// JSON schema the response must conform to.
    pub schema: Value,
    pub api_key: String,
}

impl std::fmt::Debug for ModelRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRequest")
            .field("system_instruction", &self.system_instruction)
            .field("prompt", &self.prompt)
            .field("schema", &self.schema)
            .field("api_key", &"[redacted]")
            .finish()
    }
}

/// The external model boundary.
///
/// One call per invocation, no retries. Implementations return the raw JSON
/// payload; checking it against the schema is the caller's job.
#[async_trait]
pub trait MoodModel: Send + Sync {
    async fn analyze(&self, request: &ModelRequest) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmBackend {
    Gemini,
    OpenAI,
    OpenRouter,
    Ollama,
    LmStudio,
    OpenAICompatible { base_url: String },
    Unavailable { reason: String },
}

impl LlmBackend {
    pub fn name(&self) -> &'static str {
        match self {
            LlmBackend::Gemini => "gemini",
            LlmBackend::OpenAI => "openai",
            LlmBackend::OpenRouter => "openrouter",
            LlmBackend::Ollama => "ollama",
            LlmBackend::LmStudio => "lmstudio",
            LlmBackend::OpenAICompatible { .. } => "openai-compatible",
            LlmBackend::Unavailable { .. } => "unavailable",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmProvider {
    backend: LlmBackend,
    config: Arc<LlmConfig>,
}

impl LlmProvider {
    pub fn new(config: &LlmConfig) -> Self {
        let (provider, _model) = parse_llm_provider_model(&config.model);

        let backend = match provider.to_lowercase().as_str() {
            "gemini" => LlmBackend::Gemini,
            "openai" => LlmBackend::OpenAI,
            "openrouter" => LlmBackend::OpenRouter,
            "ollama" => LlmBackend::Ollama,
            "lmstudio" => LlmBackend::LmStudio,
            _ => {
                if let Some(base_url) = &config.base_url {
                    LlmBackend::OpenAICompatible {
                        base_url: base_url.clone(),
                    }
                } else {
                    LlmBackend::Unavailable {
                        reason: format!("Unknown provider in model: {}", config.model),
                    }
                }
            }
        };

        Self {
            backend,
            config: Arc::new(config.clone()),
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, LlmBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &LlmBackend {
        &self.backend
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Base URL requests are sent to, or `None` when the backend is unavailable.
    pub fn base_url(&self) -> Option<&str> {
        match &self.backend {
            LlmBackend::Unavailable { .. } => None,
            LlmBackend::OpenAICompatible { base_url } => Some(base_url.as_str()),
            _ => Some(
                self.config
                    .base_url
                    .as_deref()
                    .unwrap_or_else(|| default_base_url(self.backend.name())),
            ),
        }
    }
}

#[async_trait]
impl MoodModel for LlmProvider {
    async fn analyze(&self, request: &ModelRequest) -> Result<String> {
        if let LlmBackend::Unavailable { reason } = &self.backend {
            return Err(CompassError::Provider(format!("LLM unavailable: {reason}")));
        }

        let client = LlmApiClient::new(&self.config, &request.api_key)?;
        client.complete_with_schema(request).await
    }
}
