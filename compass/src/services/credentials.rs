use std::env;

/// Source of the model provider secret, queried once per analysis.
pub trait CredentialStore: Send + Sync {
    /// The API key, or `None` when it is not configured.
    fn api_key(&self) -> Option<String>;

    /// Human-readable description of where the key is expected, used in
    /// error messages. Never contains the key itself.
    fn describe(&self) -> String;
}

/// Reads the key from an environment variable at call time, so a key added
/// to the environment (or `.env`) after startup is picked up.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialStore for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|key| !key.trim().is_empty())
    }

    fn describe(&self) -> String {
        format!("environment variable {}", self.var)
    }
}

/// A fixed key, mainly for embedding the service and for tests.
#[derive(Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = if self.0.is_some() { "set" } else { "missing" };
        f.debug_tuple("StaticCredentials").field(&state).finish()
    }
}

impl CredentialStore for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|key| !key.trim().is_empty())
    }

    fn describe(&self) -> String {
        "static credentials".to_string()
    }
}
