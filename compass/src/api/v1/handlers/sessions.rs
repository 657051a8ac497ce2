//! v1 Session handlers.

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::api::v1::dto::{
    CreateSessionResponse, EndSessionResponse, HistoryItem, HistoryResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;
use crate::dashboard::DashboardView;

pub(crate) fn parse_session_id<T: serde::Serialize>(raw: &str) -> Result<Uuid, ApiResponse<T>> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiResponse::error(
            ErrorCode::InvalidRequest,
            format!("Invalid session id: {raw}"),
        )
    })
}

/// `POST /api/v1/sessions`
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "sessions",
    operation_id = "sessions.create",
    responses(
        (status = 201, description = "Session created", body = CreateSessionResponse),
    )
)]
pub async fn create_session(State(state): State<AppState>) -> ApiResponse<CreateSessionResponse> {
    let session = state.sessions.create().await;
    ApiResponse::created(CreateSessionResponse {
        session_id: session.id(),
        created_at: session.created_at(),
    })
}

/// `GET /api/v1/sessions/{sessionId}`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    operation_id = "sessions.get",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Dashboard view", body = DashboardView),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<DashboardView> {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match state.sessions.get(id).await {
        Ok(session) => {
            session.touch();
            let snapshot = session.snapshot().await;
            ApiResponse::success(DashboardView::from_state(&snapshot, session.is_busy()))
        }
        Err(e) => e.into(),
    }
}

/// `DELETE /api/v1/sessions/{sessionId}`
#[utoipa::path(
    delete,
    path = "/api/v1/sessions/{sessionId}",
    tag = "sessions",
    operation_id = "sessions.end",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session ended", body = EndSessionResponse),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<EndSessionResponse> {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let session = match state.sessions.get(id).await {
        Ok(session) => session,
        Err(e) => return e.into(),
    };
    if let Err(e) = state.sessions.remove(id).await {
        return e.into();
    }

    let discarded_entries = session.snapshot().await.history().len();
    tracing::info!(session_id = %id, discarded_entries, "Session ended");

    ApiResponse::success(EndSessionResponse {
        session_id: id,
        discarded_entries,
    })
}

/// `GET /api/v1/sessions/{sessionId}/history`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/history",
    tag = "sessions",
    operation_id = "sessions.history",
    params(("sessionId" = String, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Chronological mood history", body = HistoryResponse),
        (status = 404, description = "Session not found", body = ApiError),
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<HistoryResponse> {
    let id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let session = match state.sessions.get(id).await {
        Ok(session) => session,
        Err(e) => return e.into(),
    };

    let snapshot = session.snapshot().await;
    ApiResponse::success(HistoryResponse {
        entries: snapshot.history().iter().map(HistoryItem::from).collect(),
    })
}
