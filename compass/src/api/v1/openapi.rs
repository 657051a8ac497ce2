use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;
use crate::dashboard;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mood Compass API",
        version = "1.0.0",
        description = "Mood diary dashboard. Classifies a free-form self-report, suggests health tips and media, and tracks the mood trend of a session.",
    ),
    paths(
        handlers::health::health_check,
        handlers::settings::get_settings,
        handlers::sessions::create_session,
        handlers::sessions::get_session,
        handlers::sessions::end_session,
        handlers::sessions::get_history,
        handlers::reports::submit_report,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        // Sessions
        dto::sessions::CreateSessionResponse,
        dto::sessions::EndSessionResponse,
        dto::sessions::HistoryItem,
        dto::sessions::HistoryResponse,
        // Reports
        dto::reports::MediaToggle,
        dto::reports::SubmitReportRequest,
        // Dashboard
        dashboard::DashboardView,
        dashboard::ReportView,
        dashboard::MediaSection,
        dashboard::TrendView,
        dashboard::TrendPoint,
        models::Mood,
        models::Recommendation,
        // Handler-local types
        handlers::health::HealthData,
        handlers::health::LlmStatus,
        handlers::health::CredentialsStatus,
        handlers::settings::SettingsData,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "settings", description = "Dashboard control bounds"),
        (name = "sessions", description = "Session lifecycle, dashboard view and history"),
        (name = "reports", description = "Mood report generation"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
