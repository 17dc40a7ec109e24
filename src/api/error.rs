//! Error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::classifier::ModelError;

pub type AppResult<T> = Result<T, CheckError>;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Model not loaded on server")]
    ModelUnavailable,

    #[error("No URL provided")]
    MissingUrl,

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl IntoResponse for CheckError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            CheckError::ModelUnavailable => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Model not loaded on server")
            }
            CheckError::MissingUrl => (StatusCode::BAD_REQUEST, "No URL provided"),
            CheckError::Model(err) => {
                tracing::error!("Model error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
            }
        };

        let body = Json(json!({ "error": error_message }));

        (status, body).into_response()
    }
}
