use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let sessions = Router::new()
        .route("/", post(handlers::sessions::create_session))
        .route(
            "/{sessionId}",
            get(handlers::sessions::get_session).delete(handlers::sessions::end_session),
        )
        .route(
            "/{sessionId}/reports",
            post(handlers::reports::submit_report),
        )
        .route(
            "/{sessionId}/history",
            get(handlers::sessions::get_history),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/settings", get(handlers::get_settings))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .nest("/sessions", sessions)
}
