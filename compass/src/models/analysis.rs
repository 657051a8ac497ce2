use serde::{Deserialize, Serialize};

use super::Mood;
use crate::error::{CompassError, Result};

/// A single movie or book suggested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
}

/// Structured outcome of one successful analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnalysisResult {
    pub overall_mood: Mood,
    pub mood_summary: String,
    pub health_tip_1: String,
    pub health_tip_2: String,
    #[serde(default)]
    pub movie_recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub book_recommendations: Vec<Recommendation>,
}

impl AnalysisResult {
    /// Check that each recommendation list holds exactly the requested number
    /// of items (zero when the category was not requested).
    pub fn check_counts(&self, num_movies: u32, num_books: u32) -> std::result::Result<(), String> {
        let movies = self.movie_recommendations.len();
        if movies != num_movies as usize {
            return Err(format!(
                "expected {num_movies} movie recommendations, got {movies}"
            ));
        }

        let books = self.book_recommendations.len();
        if books != num_books as usize {
            return Err(format!(
                "expected {num_books} book recommendations, got {books}"
            ));
        }

        Ok(())
    }
}

/// Parameters of one analysis as submitted from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub user_text: String,
    pub num_movies: u32,
    pub num_books: u32,
}

impl AnalysisRequest {
    pub fn new(user_text: impl Into<String>, num_movies: u32, num_books: u32) -> Self {
        Self {
            user_text: user_text.into(),
            num_movies,
            num_books,
        }
    }

    /// Rejects empty or whitespace-only text. Callers run this before handing
    /// the request to the orchestrator.
    pub fn validate(&self) -> Result<()> {
        if self.user_text.trim().is_empty() {
            return Err(CompassError::Validation(
                "Please describe your current feelings or situation before generating a report."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recommendation(title: &str) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            reason: "fits the mood".to_string(),
        }
    }

    fn result_with(movies: usize, books: usize) -> AnalysisResult {
        AnalysisResult {
            overall_mood: Mood::Calm,
            mood_summary: "Settled".to_string(),
            health_tip_1: "Walk".to_string(),
            health_tip_2: "Sleep".to_string(),
            movie_recommendations: (0..movies).map(|i| recommendation(&format!("M{i}"))).collect(),
            book_recommendations: (0..books).map(|i| recommendation(&format!("B{i}"))).collect(),
        }
    }

    #[test]
    fn missing_recommendation_lists_default_to_empty() {
        let json = r#"{
            "overall_mood": "Happy",
            "mood_summary": "Good news at work",
            "health_tip_1": "Celebrate with friends",
            "health_tip_2": "Keep a regular sleep schedule"
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).expect("deserialize");
        assert_eq!(result.overall_mood, Mood::Happy);
        assert!(result.movie_recommendations.is_empty());
        assert!(result.book_recommendations.is_empty());
    }

    #[test]
    fn missing_tip_is_rejected() {
        let json = r#"{
            "overall_mood": "Happy",
            "mood_summary": "Good news at work",
            "health_tip_1": "Celebrate with friends"
        }"#;
        assert!(serde_json::from_str::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn check_counts_accepts_exact_lengths() {
        assert!(result_with(0, 0).check_counts(0, 0).is_ok());
        assert!(result_with(3, 1).check_counts(3, 1).is_ok());
    }

    #[test]
    fn check_counts_rejects_mismatches() {
        let err = result_with(2, 0).check_counts(3, 0).unwrap_err();
        assert!(err.contains("movie"));

        let err = result_with(0, 1).check_counts(0, 0).unwrap_err();
        assert!(err.contains("book"));
    }

    #[test]
    fn whitespace_text_fails_validation() {
        let request = AnalysisRequest::new("  \n\t", 1, 1);
        assert!(matches!(request.validate(), Err(CompassError::Validation(_))));
        assert!(AnalysisRequest::new("I feel fine", 0, 0).validate().is_ok());
    }
}
