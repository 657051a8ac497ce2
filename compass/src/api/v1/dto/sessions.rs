//! Session request/response DTOs for the v1 API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{HistoryEntry, Mood};

/// Response body for `POST /v1/sessions`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    #[schema(value_type = String)]
    pub created_at: DateTime<Utc>,
}

/// Response body for `DELETE /v1/sessions/{sessionId}`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionResponse {
    pub session_id: Uuid,
    /// Number of history entries discarded with the session.
    pub discarded_entries: usize,
}

/// One row of `GET /v1/sessions/{sessionId}/history`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    /// Chart label, `%m-%d %H:%M`.
    pub label: String,
    pub mood: Mood,
    pub score: u8,
    pub summary: String,
    pub movie_count: usize,
    pub book_count: usize,
}

impl From<&HistoryEntry> for HistoryItem {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            label: entry.day_label(),
            mood: entry.mood,
            score: entry.score(),
            summary: entry.summary.clone(),
            movie_count: entry.movie_count,
            book_count: entry.book_count,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryItem>,
}
