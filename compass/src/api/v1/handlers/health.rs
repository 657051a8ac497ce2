use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// Health data returned inside the v1 envelope.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub llm: LlmStatus,
    pub credentials: CredentialsStatus,
    /// Number of live sessions.
    pub sessions: usize,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LlmStatus {
    pub status: String,
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Only whether a key is present, never the key.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct CredentialsStatus {
    pub configured: bool,
    pub source: String,
}

/// `GET /api/v1/health`
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let llm_status = LlmStatus {
        status: if state.llm.is_available() {
            "available"
        } else {
            "unavailable"
        }
        .to_string(),
        provider: state.llm.backend().name().to_string(),
        model: state.llm.config().model.clone(),
        base_url: state.llm.base_url().map(str::to_string),
    };

    let credentials = CredentialsStatus {
        configured: state.credentials.api_key().is_some(),
        source: state.credentials.describe(),
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        llm: llm_status,
        credentials,
        sessions: state.sessions.len().await,
    })
}
