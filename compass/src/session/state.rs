use chrono::{DateTime, Utc};

use crate::error::CompassError;
use crate::models::{AnalysisResult, HistoryEntry};
use crate::services::Outcome;

/// Transient state of one interactive session.
///
/// `history` is append-only and chronological. `current_report` only ever
/// holds the result of the latest successful analysis and is cleared by any
/// failure.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    history: Vec<HistoryEntry>,
    current_report: Option<AnalysisResult>,
    last_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn current_report(&self) -> Option<&AnalysisResult> {
        self.current_report.as_ref()
    }

    /// User-facing message of the most recent failed submission, cleared by
    /// the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply the outcome of one submission.
    pub fn record(&mut self, outcome: &Outcome, at: DateTime<Utc>) {
        match outcome {
            Ok(result) => {
                self.history.push(HistoryEntry::from_result(result, at));
                self.current_report = Some(result.clone());
                self.last_error = None;
            }
            Err(error) => self.record_failure(error),
        }
    }

    /// Clear the report and remember the failure for display.
    pub fn record_failure(&mut self, error: &CompassError) {
        self.current_report = None;
        self.last_error = Some(error.user_message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Mood, Recommendation};
    use chrono::TimeZone;

    fn result(mood: Mood, movies: usize) -> AnalysisResult {
        AnalysisResult {
            overall_mood: mood,
            mood_summary: format!("Feeling {mood}"),
            health_tip_1: "Drink water".to_string(),
            health_tip_2: "Go outside".to_string(),
            movie_recommendations: (0..movies)
                .map(|i| Recommendation {
                    title: format!("Movie {i}"),
                    reason: "Because".to_string(),
                })
                .collect(),
            book_recommendations: Vec::new(),
        }
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, minute, 0).unwrap()
    }

    #[test]
    fn success_appends_history_and_sets_report() {
        let mut state = SessionState::new();
        state.record(&Ok(result(Mood::Happy, 2)), at(0));

        assert_eq!(state.history().len(), 1);
        assert_eq!(state.history()[0].movie_count, 2);
        assert_eq!(state.history()[0].book_count, 0);
        assert_eq!(
            state.current_report().map(|r| r.overall_mood),
            Some(Mood::Happy)
        );
        assert!(state.last_error().is_none());
    }

    #[test]
    fn failure_clears_report_and_keeps_history() {
        let mut state = SessionState::new();
        state.record(&Ok(result(Mood::Calm, 0)), at(0));
        state.record(&Err(CompassError::Provider("boom".into())), at(1));

        assert!(state.current_report().is_none());
        assert_eq!(state.history().len(), 1);
        assert!(state.last_error().unwrap().contains("boom"));
    }

    #[test]
    fn history_preserves_submission_order() {
        let mut state = SessionState::new();
        let moods = [Mood::Sad, Mood::Neutral, Mood::Joyful];
        for (i, mood) in moods.iter().enumerate() {
            state.record(&Ok(result(*mood, 0)), at(i as u32));
        }
        state.record(&Err(CompassError::Validation("empty".into())), at(9));

        let recorded: Vec<Mood> = state.history().iter().map(|e| e.mood).collect();
        assert_eq!(recorded, moods.to_vec());
        assert!(state
            .history()
            .windows(2)
            .all(|pair| pair[0].timestamp <= pair[1].timestamp));
    }

    #[test]
    fn success_after_failure_clears_error() {
        let mut state = SessionState::new();
        state.record(&Err(CompassError::Credentials("missing".into())), at(0));
        assert!(state.last_error().is_some());

        state.record(&Ok(result(Mood::Angry, 0)), at(1));
        assert!(state.last_error().is_none());
        assert_eq!(state.history().len(), 1);
    }
}
