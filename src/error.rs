use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::database::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    // A malformed id is a 404 while a well-formed id with no matching
    // document is a 400; clients can tell the two apart only by status code.
    #[error("No such workout")]
    InvalidId,

    #[error("No such workout")]
    NotFound,

    #[error("Please fill in all the fields")]
    EmptyFields(Vec<&'static str>),

    #[error("{0}")]
    MalformedPayload(String),

    #[error("{0}")]
    Database(String),

    #[error("Internal error: {0}")]
    InternalError(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidId => StatusCode::NOT_FOUND,
            AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };

        let body = match &self {
            AppError::EmptyFields(fields) => {
                json!({ "error": self.to_string(), "emptyFields": fields })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
