//! v1 Report handlers.

use axum::extract::{Path, State};

use super::sessions::parse_session_id;
use crate::api::v1::dto::SubmitReportRequest;
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::dashboard::DashboardView;
use crate::error::CompassError;
use crate::models::AnalysisRequest;

/// `POST /api/v1/sessions/{sessionId}/reports`
///
/// Runs one analysis for the session. On failure the session's current
/// report is cleared and the error envelope is returned; history only grows
/// on success.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/reports",
    tag = "reports",
    operation_id = "reports.submit",
    params(("sessionId" = String, Path, description = "Session ID")),
    request_body = SubmitReportRequest,
    responses(
        (status = 200, description = "Report generated", body = DashboardView),
        (status = 400, description = "Empty text or invalid counts", body = ApiError),
        (status = 404, description = "Session not found", body = ApiError),
        (status = 409, description = "An analysis is already in progress", body = ApiError),
        (status = 502, description = "Model call failed", body = ApiError),
        (status = 503, description = "API key missing or rejected", body = ApiError),
    )
)]
pub async fn submit_report(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    axum::Json(req): axum::Json<SubmitReportRequest>,
) -> ApiResponse<DashboardView> {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let session = match state.sessions.get(id).await {
        Ok(session) => session,
        Err(e) => return e.into(),
    };

    let (num_movies, num_books) = match req.counts(state.config.recommendations.max_count) {
        Ok(counts) => counts,
        Err(msg) => return session.reject(CompassError::Validation(msg)).await.into(),
    };

    let request = AnalysisRequest::new(req.text, num_movies, num_books);
    if let Err(e) = session
        .submit(&state.analysis, &request, state.credentials.as_ref())
        .await
    {
        return e.into();
    }

    let snapshot = session.snapshot().await;
    ApiResponse::success(DashboardView::from_state(&snapshot, session.is_busy()))
}
