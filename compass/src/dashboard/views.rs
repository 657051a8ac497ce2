use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AnalysisResult, HistoryEntry, Mood, Recommendation};
use crate::session::SessionState;

pub const EMPTY_TREND_PROMPT: &str = "Submit your first entry to see your mood history!";
pub const TREND_CAPTION: &str = "Higher score = More positive mood.";

/// A collapsible recommendation group, e.g. `Movies (2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MediaSection {
    pub label: String,
    pub items: Vec<Recommendation>,
}

impl MediaSection {
    fn from_items(kind: &str, items: &[Recommendation]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            label: format!("{kind} ({})", items.len()),
            items: items.to_vec(),
        })
    }
}

/// The report panel for the latest successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub mood: Mood,
    pub score: u8,
    pub summary: String,
    pub health_tips: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<MediaSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub books: Option<MediaSection>,
}

impl ReportView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            mood: result.overall_mood,
            score: result.overall_mood.score(),
            summary: result.mood_summary.clone(),
            health_tips: vec![result.health_tip_1.clone(), result.health_tip_2.clone()],
            movies: MediaSection::from_items("Movies", &result.movie_recommendations),
            books: MediaSection::from_items("Books", &result.book_recommendations),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TrendPoint {
    pub label: String,
    pub score: u8,
    pub mood: Mood,
    #[schema(value_type = String)]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl From<&HistoryEntry> for TrendPoint {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            label: entry.day_label(),
            score: entry.score(),
            mood: entry.mood,
            timestamp: entry.timestamp,
        }
    }
}

/// The sidebar: a chart once there is history, a prompt before that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendView {
    Empty { prompt: String },
    Chart { points: Vec<TrendPoint>, caption: String },
}

impl TrendView {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        if history.is_empty() {
            return TrendView::Empty {
                prompt: EMPTY_TREND_PROMPT.to_string(),
            };
        }
        TrendView::Chart {
            points: history.iter().map(TrendPoint::from).collect(),
            caption: TREND_CAPTION.to_string(),
        }
    }
}

/// Everything the dashboard page renders for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardView {
    pub report: Option<ReportView>,
    pub trend: TrendView,
    pub busy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DashboardView {
    pub fn from_state(state: &SessionState, busy: bool) -> Self {
        Self {
            report: state.current_report().map(ReportView::from_result),
            trend: TrendView::from_history(state.history()),
            busy,
            error: state.last_error().map(str::to_string),
        }
    }
}
