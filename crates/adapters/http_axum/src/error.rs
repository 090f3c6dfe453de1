//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use nutrihub_domain::error::NutriHubError;

/// JSON error body returned by every endpoint.
#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    status: &'static str,
    message: String,
}

/// Failure of a request, rendered as an error envelope.
#[derive(Debug)]
pub enum ApiError {
    /// The request itself is unusable: bad path parameter or body.
    BadRequest(String),
    /// The application layer refused or failed the operation.
    Domain(NutriHubError),
}

impl ApiError {
    /// A path parameter that should be a UUID is not one.
    #[must_use]
    pub fn invalid_id(thing: &str) -> Self {
        Self::BadRequest(format!("Invalid {thing} ID format"))
    }
}

impl From<NutriHubError> for ApiError {
    fn from(err: NutriHubError) -> Self {
        Self::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected request body");
        Self::BadRequest("Invalid request body".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "rejected path parameter");
        Self::BadRequest("Invalid path parameter".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Domain(err) => match &err {
                NutriHubError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
                NutriHubError::NotFound(inner) => (StatusCode::NOT_FOUND, inner.to_string()),
                NutriHubError::Conflict(inner) => (StatusCode::CONFLICT, inner.to_string()),
                NutriHubError::Corrupted(inner) => {
                    tracing::error!(error = %inner, "corrupted stored data");
                    (StatusCode::INTERNAL_SERVER_ERROR, inner.to_string())
                }
                NutriHubError::Storage(inner) => {
                    tracing::error!(error = %inner, "storage error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal server error".to_string(),
                    )
                }
            },
        };

        let body = ErrorBody {
            code: status.as_u16(),
            status: "error",
            message,
        };
        (status, Json(body)).into_response()
    }
}
