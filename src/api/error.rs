//! Errors as reported to HTTP clients
//!
//! Clients only ever see two outcomes besides success: the cab was not found,
//! or something went wrong. Everything else is visible in the logs.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind};

const NOT_FOUND_MESSAGE: &str = "Cab not found";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Body of every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: NOT_FOUND_MESSAGE.to_string(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: INTERNAL_MESSAGE.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err.kind() {
            kind @ (ErrorKind::Validation | ErrorKind::Conflict) => {
                tracing::warn!(?kind, error = %err, "Request rejected by store");
            }
            kind @ (ErrorKind::Unavailable | ErrorKind::Internal) => {
                tracing::error!(?kind, error = %err, "Store operation failed");
            }
        }
        Self::internal()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text()).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_store_error_is_internal() {
        let errors = [
            Error::InvalidId("42".to_string()),
            Error::validation("`model` is required"),
            Error::Conflict("KA01".to_string()),
            Error::storage("unreachable"),
            Error::internal("bug"),
        ];

        for err in errors {
            let api_err = ApiError::from(err);
            assert_eq!(api_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(api_err.message(), "Internal server error");
        }
    }

    #[test]
    fn test_not_found() {
        let api_err = ApiError::not_found();
        assert_eq!(api_err.status(), StatusCode::NOT_FOUND);
        assert_eq!(api_err.message(), "Cab not found");
    }
}
