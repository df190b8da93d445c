use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use crate::selector::CategoryOutOfRange;

#[derive(ThisError, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    BadRequest(String),

    /// Empty result set where one was required
    #[error("{0}")]
    NotFound(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    /// Create/delete could not be carried out, including deletes of unknown ids
    #[error("{0}")]
    Unprocessable(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Body of every error response.
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub error: u16,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed client-facing text; details only go to the log.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "Bad request",
            ApiError::NotFound(_) => "Not found",
            ApiError::MethodNotAllowed => "Method not allowed",
            ApiError::Unprocessable(_) => "Unprocessable",
            ApiError::Database(_) | ApiError::Other(_) => "Server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(_) | ApiError::Other(_) => {
                tracing::error!("Internal service error: {:#}", self);
            }
            ApiError::Unprocessable(_) => {
                tracing::warn!("Unprocessable request: {}", self);
            }
            _ => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.user_message().to_owned(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<CategoryOutOfRange> for ApiError {
    fn from(err: CategoryOutOfRange) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        let cases = [
            (ApiError::BadRequest("x".into()), 400, "Bad request"),
            (ApiError::NotFound("x".into()), 404, "Not found"),
            (ApiError::MethodNotAllowed, 405, "Method not allowed"),
            (ApiError::Unprocessable("x".into()), 422, "Unprocessable"),
            (ApiError::Database(sqlx::Error::RowNotFound), 500, "Server error"),
            (ApiError::Other(anyhow::anyhow!("boom")), 500, "Server error"),
        ];
        for (err, code, message) in cases {
            assert_eq!(err.status_code().as_u16(), code);
            assert_eq!(err.user_message(), message);
        }
    }

    #[test]
    fn out_of_range_category_is_bad_request() {
        let err: ApiError = CategoryOutOfRange { id: 9, max: 6 }.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "category 9 is outside 0..=6");
    }
}
