use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::llm::{LlmProvider, MoodModel};
use crate::services::{AnalysisService, CredentialStore};
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionStore>,
    pub analysis: AnalysisService,
    pub credentials: Arc<dyn CredentialStore>,
    /// Reported by the health endpoint.
    pub llm: LlmProvider,
}

impl AppState {
    pub fn new(config: Config, llm: LlmProvider, credentials: Arc<dyn CredentialStore>) -> Self {
        let model: Arc<dyn MoodModel> = Arc::new(llm.clone());
        Self::with_model(config, llm, model, credentials)
    }

    /// Like [`AppState::new`] but analyses go through `model` instead of the
    /// configured provider.
    pub fn with_model(
        config: Config,
        llm: LlmProvider,
        model: Arc<dyn MoodModel>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.session.idle_ttl_secs,
        )));

        Self {
            config: Arc::new(config),
            sessions,
            analysis: AnalysisService::new(model),
            credentials,
            llm,
        }
    }
}
