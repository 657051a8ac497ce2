//! Report submission DTOs for the v1 API.

use serde::Deserialize;

/// A recommendation category toggle with its count control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, utoipa::ToSchema)]
pub struct MediaToggle {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub count: u32,
}

impl MediaToggle {
    /// Count sent to the model: zero when disabled, otherwise `count`, which
    /// must lie in `1..=max`.
    pub fn effective_count(&self, kind: &str, max: u32) -> Result<u32, String> {
        if !self.enabled {
            return Ok(0);
        }
        if (1..=max).contains(&self.count) {
            Ok(self.count)
        } else {
            Err(format!(
                "Number of {kind} must be between 1 and {max}, got {}",
                self.count
            ))
        }
    }
}

/// Request body for `POST /v1/sessions/{sessionId}/reports`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SubmitReportRequest {
    /// Free-form description of how the user feels.
    pub text: String,
    #[serde(default)]
    pub movies: MediaToggle,
    #[serde(default)]
    pub books: MediaToggle,
}

impl SubmitReportRequest {
    /// Effective `(movies, books)` counts.
    pub fn counts(&self, max: u32) -> Result<(u32, u32), String> {
        Ok((
            self.movies.effective_count("movies", max)?,
            self.books.effective_count("books", max)?,
        ))
    }
}
