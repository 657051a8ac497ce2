use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::v1::response::ApiResponse;

#[derive(Error, Debug)]
pub enum CompassError {
    /// Rejected input, caught before any network activity.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model provider secret is missing or was rejected.
    #[error("Credentials error: {0}")]
    Credentials(String),

    /// Transport failure, provider rejection or a response that does not
    /// conform to the declared schema.
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Busy: {0}")]
    Busy(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl CompassError {
    /// Message shown to the person using the dashboard.
    pub fn user_message(&self) -> String {
        match self {
            CompassError::Validation(msg) => msg.clone(),
            CompassError::Credentials(msg) => format!("API Key Error: {msg}"),
            CompassError::Provider(msg) => format!("Model call failed. Details: {msg}"),
            CompassError::NotFound(msg) => msg.clone(),
            CompassError::Busy(msg) => msg.clone(),
            CompassError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for CompassError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, CompassError>;
