use std::sync::Arc;

use crate::error::{CompassError, Result};
use crate::llm::{prompts, redact_secret, schema, ModelRequest, MoodModel};
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::services::credentials::CredentialStore;

/// Result of one orchestrated analysis: either a complete report or one of
/// the validation, credentials or provider errors.
pub type Outcome = Result<AnalysisResult>;

/// Turns user parameters into one schema-constrained model call and
/// normalizes whatever comes back. Never touches session state.
#[derive(Clone)]
pub struct AnalysisService {
    model: Arc<dyn MoodModel>,
}

impl AnalysisService {
    pub fn new(model: Arc<dyn MoodModel>) -> Self {
        Self { model }
    }

    /// Run one analysis.
    ///
    /// `request.user_text` must already have passed
    /// [`AnalysisRequest::validate`]. The credential store is read before any
    /// network activity; a missing key returns `CompassError::Credentials`
    /// without calling the model.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
        credentials: &dyn CredentialStore,
    ) -> Outcome {
        let Some(api_key) = credentials.api_key() else {
            tracing::warn!(source = %credentials.describe(), "No API key available");
            return Err(CompassError::Credentials(format!(
                "No API key found in {}. Please configure your secrets.",
                credentials.describe()
            )));
        };

        let model_request = ModelRequest {
            system_instruction: prompts::system_instruction(request.num_movies, request.num_books),
            prompt: prompts::analysis_prompt(&request.user_text),
            schema: schema::analysis_schema(),
            api_key,
        };

        tracing::info!(
            text_len = request.user_text.len(),
            num_movies = request.num_movies,
            num_books = request.num_books,
            "Requesting mood analysis"
        );

        let payload = self
            .model
            .analyze(&model_request)
            .await
            .map_err(|error| scrub(error, &model_request.api_key))?;

        let result = parse_payload(&payload, request)?;

        tracing::info!(mood = %result.overall_mood, "Mood analysis complete");
        Ok(result)
    }
}

/// Check the provider payload against the declared schema and the requested
/// recommendation counts.
fn parse_payload(payload: &str, request: &AnalysisRequest) -> Outcome {
    let result: AnalysisResult = serde_json::from_str(payload).map_err(|error| {
        tracing::error!(
            response_len = payload.len(),
            error = %error,
            "LLM response does not match the analysis schema"
        );
        CompassError::Provider(format!(
            "Response does not match the analysis schema: {error}"
        ))
    })?;

    result
        .check_counts(request.num_movies, request.num_books)
        .map_err(|reason| {
            tracing::error!(%reason, "LLM ignored the requested recommendation counts");
            CompassError::Provider(format!("Response does not match the request: {reason}"))
        })?;

    Ok(result)
}

fn scrub(error: CompassError, api_key: &str) -> CompassError {
    match error {
        CompassError::Credentials(msg) => CompassError::Credentials(redact_secret(&msg, api_key)),
        CompassError::Provider(msg) => CompassError::Provider(redact_secret(&msg, api_key)),
        CompassError::Validation(msg) => CompassError::Provider(redact_secret(&msg, api_key)),
        CompassError::Internal(msg) => CompassError::Internal(redact_secret(&msg, api_key)),
        other => CompassError::Provider(redact_secret(&other.to_string(), api_key)),
    }
}
