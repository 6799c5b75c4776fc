use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::detector::DetectorError;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("no file uploaded")]
    MissingFile,

    #[error("invalid upload: {0}")]
    BadUpload(String),

    #[error("uploaded file is not a decodable image")]
    NotAnImage,

    #[error("mood detection failed: {0}")]
    Detection(#[from] DetectorError),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::MissingFile | RelayError::BadUpload(_) | RelayError::NotAnImage => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Detection(DetectorError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            RelayError::Detection(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
        });

        (status, axum::Json(body)).into_response()
    }
}
