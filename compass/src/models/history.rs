use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AnalysisResult, Mood};

/// One row of the session's mood history, derived from a successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HistoryEntry {
    #[schema(value_type = String)]
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub summary: String,
    pub movie_count: usize,
    pub book_count: usize,
}

impl HistoryEntry {
    pub fn from_result(result: &AnalysisResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            mood: result.overall_mood,
            summary: result.mood_summary.clone(),
            movie_count: result.movie_recommendations.len(),
            book_count: result.book_recommendations.len(),
        }
    }

    pub fn score(&self) -> u8 {
        self.mood.score()
    }

    /// Chart axis label, e.g. `10-16 14:05`.
    pub fn day_label(&self) -> String {
        self.timestamp.format("%m-%d %H:%M").to_string()
    }
}
