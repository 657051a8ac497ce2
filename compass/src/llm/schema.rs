//! JSON schema declared to the provider as the required response format.

use serde_json::{json, Value};

use crate::models::Mood;

pub const ANALYSIS_SCHEMA_NAME: &str = "user_analysis";

fn recommendation_list(kind: &str) -> Value {
    json!({
        "type": "array",
        "description": format!(
            "A list of {kind} recommendations, or an empty list if none were requested."
        ),
        "items": {
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": format!("The title of the {kind}.")
                },
                "reason": {
                    "type": "string",
                    "description": "A brief, one-sentence reason for the recommendation."
                }
            },
            "required": ["title", "reason"],
            "additionalProperties": false
        }
    })
}

/// Schema of [`crate::models::AnalysisResult`], with the mood constrained to
/// the closed label set.
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "overall_mood": {
                "type": "string",
                "enum": Mood::labels(),
                "description": "The primary emotional state derived from the user's text."
            },
            "mood_summary": {
                "type": "string",
                "description": "A brief explanation of why the text suggests this mood."
            },
            "health_tip_1": {
                "type": "string",
                "description": "A practical, first tip for staying healthy based on the mood."
            },
            "health_tip_2": {
                "type": "string",
                "description": "A second, complementary tip for mental or physical wellness."
            },
            "movie_recommendations": recommendation_list("movie"),
            "book_recommendations": recommendation_list("book")
        },
        "required": [
            "overall_mood",
            "mood_summary",
            "health_tip_1",
            "health_tip_2",
            "movie_recommendations",
            "book_recommendations"
        ],
        "additionalProperties": false
    })
}
