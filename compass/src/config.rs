use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub recommendations: RecommendationConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// LLM configuration for the mood analysis model
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Provider-prefixed model name, e.g. `gemini/gemini-2.5-flash`.
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// Name of the environment variable the API key is read from at request time.
    pub api_key_env: String,
}

/// Bounds of the movie/book count controls. These are dashboard constraints;
/// the orchestrator itself accepts any count.
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    pub max_count: u32,
    pub default_count: u32,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub idle_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_LLM_MODEL.to_string(),
            base_url: None,
            timeout_secs: 60,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_count: 5,
            default_count: 2,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let max_count = parse_env_or("MAX_RECOMMENDATIONS", 5u32).max(1);
        let default_count = parse_env_or("DEFAULT_RECOMMENDATIONS", 2u32).clamp(1, max_count);

        Self {
            server: ServerConfig {
                host: env::var("COMPASS_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("COMPASS_PORT", 3000),
            },
            llm: LlmConfig {
                model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
                base_url: env::var("LLM_BASE_URL").ok().filter(|url| !url.trim().is_empty()),
                timeout_secs: parse_env_or("LLM_TIMEOUT", 60),
                api_key_env: env::var("LLM_API_KEY_ENV")
                    .unwrap_or_else(|_| DEFAULT_API_KEY_ENV.to_string()),
            },
            recommendations: RecommendationConfig {
                max_count,
                default_count,
            },
            session: SessionConfig {
                idle_ttl_secs: parse_env_or("SESSION_IDLE_TTL_SECS", 3600),
                sweep_interval_secs: parse_env_or("SESSION_SWEEP_INTERVAL_SECS", 60),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

pub const DEFAULT_LLM_MODEL: &str = "gemini/gemini-2.5-flash";
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Known LLM providers that expose OpenAI-compatible APIs
pub const KNOWN_LLM_PROVIDERS: &[&str] = &["gemini", "openai", "openrouter", "ollama", "lmstudio"];

/// Parse an LLM model name into (provider, model) tuple.
pub fn parse_llm_provider_model(model: &str) -> (&str, &str) {
    if let Some((prefix, rest)) = model.split_once('/') {
        let prefix_lower = prefix.to_lowercase();
        if KNOWN_LLM_PROVIDERS.contains(&prefix_lower.as_str()) {
            return (prefix, rest);
        }
    }
    // Default to treating the whole string as a local model
    ("local", model)
}
