//! HTTP error response mapping.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use substations_domain::error::RegistryError;

const SAVE_FAILED: &str = "Помилка сервера при збереженні даних.";
const LOAD_FAILED: &str = "Помилка сервера при отриманні даних.";
const MALFORMED_BODY: &str = "Некоректний формат запиту.";
const MALFORMED_QUERY: &str = "Некоректні параметри запиту.";

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// Maps [`RegistryError`] to an HTTP response with appropriate status code.
///
/// Validation failures become `400` with their localized message; storage
/// failures are logged and become a generic `500` whose wording depends on
/// whether the client was saving or loading.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Error raised while persisting a submission.
    pub fn saving(err: RegistryError) -> Self {
        Self::from_registry(err, SAVE_FAILED)
    }

    /// Error raised while reading the registry.
    pub fn loading(err: RegistryError) -> Self {
        Self::from_registry(err, LOAD_FAILED)
    }

    fn from_registry(err: RegistryError, storage_message: &str) -> Self {
        match err {
            RegistryError::Validation(err) => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            RegistryError::Storage(err) => {
                tracing::error!(error = ?err, "storage error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: storage_message.to_owned(),
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MALFORMED_BODY.to_owned(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected query string");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MALFORMED_QUERY.to_owned(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                message: self.message,
            }),
        )
            .into_response()
    }
}
