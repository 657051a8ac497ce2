//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                                        // present on success
//!   "error": { "code": "provider_error", "message": "..." } // present on error
//! }
//! ```
//!
//! Session ids are UUID v4 strings. A malformed id returns `400 invalid_request`,
//! an unknown one `404 not_found`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::CompassError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
/// Each variant maps to a fixed HTTP status code via [`ErrorCode::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Empty text, out-of-range counts or a malformed body. HTTP 400.
    InvalidRequest,
    /// Unknown session. HTTP 404.
    NotFound,
    /// A submission is already in flight for the session. HTTP 409.
    Conflict,
    /// The model API key is missing or was rejected. HTTP 503.
    CredentialsError,
    /// The model call failed or returned a non-conforming response. HTTP 502.
    ProviderError,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::CredentialsError => StatusCode::SERVICE_UNAVAILABLE,
            Self::ProviderError => StatusCode::BAD_GATEWAY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::CredentialsError => write!(f, "credentials_error"),
            Self::ProviderError => write!(f, "provider_error"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error payload within the API envelope.
///
/// ```json
/// { "code": "conflict", "message": "An analysis is already in progress for this session" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Human-readable description safe to display on the dashboard.
    pub message: String,
}

/// Canonical v1 API response envelope.
///
/// The HTTP status code is derived from the error code (on error) or
/// from the explicit status set via constructors like [`ApiResponse::created`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success response with data (HTTP 200).
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Resource created response (HTTP 201).
    pub fn created(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::CREATED,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<CompassError> for ApiResponse<T> {
    /// Convert a [`CompassError`] into a v1 [`ApiResponse`].
    ///
    /// Credentials and provider errors carry the dashboard message. Internal
    /// details are logged and replaced by a generic message.
    fn from(err: CompassError) -> Self {
        match err {
            CompassError::Validation(msg) => ApiResponse::error(ErrorCode::InvalidRequest, msg),

            CompassError::NotFound(msg) => ApiResponse::error(ErrorCode::NotFound, msg),

            CompassError::Busy(msg) => ApiResponse::error(ErrorCode::Conflict, msg),

            ref credentials @ CompassError::Credentials(_) => {
                ApiResponse::error(ErrorCode::CredentialsError, credentials.user_message())
            }

            ref provider @ CompassError::Provider(_) => {
                ApiResponse::error(ErrorCode::ProviderError, provider.user_message())
            }

            ref internal @ CompassError::Internal(_) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_serializes_without_error() {
        let resp = ApiResponse::success("hello");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn error_response_serializes_without_data() {
        let resp = ApiResponse::<()>::error(ErrorCode::NotFound, "gone");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "gone");
    }

    #[test]
    fn error_code_status_mapping() {
        assert_eq!(ErrorCode::InvalidRequest.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::CredentialsError.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(ErrorCode::ProviderError.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_code_serializes_snake_case() {
        let json = serde_json::to_value(&ErrorCode::CredentialsError).expect("serialize");
        assert_eq!(json, "credentials_error");
        assert_eq!(ErrorCode::ProviderError.to_string(), "provider_error");
    }

    #[test]
    fn created_response_has_201_status() {
        let resp = ApiResponse::created("new-session");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[test]
    fn provider_error_keeps_dashboard_message() {
        let resp: ApiResponse<()> = CompassError::Provider("HTTP 500".into()).into();
        let err = resp.error.as_ref().expect("error");
        assert_eq!(err.code, ErrorCode::ProviderError);
        assert_eq!(err.message, "Model call failed. Details: HTTP 500");
    }

    #[test]
    fn credentials_error_maps_to_credentials_code() {
        let resp: ApiResponse<()> = CompassError::Credentials("missing".into()).into();
        let err = resp.error.as_ref().expect("error");
        assert_eq!(err.code, ErrorCode::CredentialsError);
        assert!(err.message.starts_with("API Key Error"));
    }

    #[test]
    fn busy_maps_to_conflict() {
        let resp: ApiResponse<()> = CompassError::Busy("in flight".into()).into();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_does_not_leak() {
        let resp: ApiResponse<()> = CompassError::Internal("secret debug info".into()).into();
        let err = resp.error.as_ref().expect("error");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "An internal error occurred");
    }
}
