use axum::extract::State;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::v1::response::ApiResponse;

/// Bounds of the movie/book count controls.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsData {
    pub min_recommendations: u32,
    pub max_recommendations: u32,
    pub default_recommendations: u32,
}

/// `GET /api/v1/settings`
#[utoipa::path(
    get,
    path = "/api/v1/settings",
    tag = "settings",
    responses(
        (status = 200, description = "Dashboard control settings", body = SettingsData),
    )
)]
pub async fn get_settings(State(state): State<AppState>) -> ApiResponse<SettingsData> {
    let recommendations = &state.config.recommendations;
    ApiResponse::success(SettingsData {
        min_recommendations: 1,
        max_recommendations: recommendations.max_count,
        default_recommendations: recommendations.default_count,
    })
}
