//! Error → HTTP response mapping.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use organmatch_types::{ErrorKind, OrganmatchError};
use serde_json::json;

/// Handler error. Wraps the engine error and renders it as
/// `{"error": message, "kind": kind}` with a status chosen by [`ErrorKind`].
#[derive(Debug)]
pub struct ApiError(pub OrganmatchError);

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ValidationFailure => StatusCode::BAD_REQUEST,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<OrganmatchError> for ApiError {
    fn from(err: OrganmatchError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "Rejected JSON body");
        let reason = match rejection {
            JsonRejection::JsonDataError(_) => "does not match the expected fields",
            JsonRejection::JsonSyntaxError(_) => "is not valid JSON",
            JsonRejection::MissingJsonContentType(_) => "must be sent as application/json",
            _ => "could not be read",
        };
        Self(OrganmatchError::invalid_field("body", reason))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(detail = %rejection.body_text(), "Rejected query string");
        Self(OrganmatchError::invalid_field("query", "could not be parsed"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let kind = self.0.kind();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "Internal error");
            "internal error".to_string()
        } else {
            tracing::debug!(error = %self.0, kind = %kind, "Request failed");
            self.0.to_string()
        };
        (
            status,
            Json(json!({ "error": message, "kind": kind.to_string() })),
        )
            .into_response()
    }
}

/// Handler result.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
