use actix_web::http::header::{self, HeaderValue};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use bytes::Bytes;
use thiserror::Error;

use crate::client::InferenceError;
use crate::interpret::MalformedResponseError;
use crate::models::ErrorDetail;
use crate::preprocess::ImageDecodeError;

/// Every way a `/predict` call can end without a prediction.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Invalid image type. Only JPEG and PNG are supported.")]
    InvalidImageType,

    #[error("No file uploaded.")]
    MissingFile,

    #[error("Uploaded file exceeds the {0} byte limit.")]
    UploadTooLarge(usize),

    #[error("Error reading upload: {0}")]
    Upload(String),

    #[error("Error processing image: {0}")]
    ImageDecode(#[from] ImageDecodeError),

    #[error("Error communicating with Databricks endpoint: {0}")]
    Transport(#[from] InferenceError),

    /// The endpoint answered, but not with 200. Relayed to the caller as is.
    #[error("inference endpoint responded with status {status}")]
    Remote {
        status: u16,
        content_type: Option<String>,
        body: Bytes,
    },

    #[error("Error parsing prediction response: {0}")]
    MalformedResponse(#[from] MalformedResponseError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for PredictError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidImageType | Self::MissingFile | Self::Upload(_) | Self::ImageDecode(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::UploadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Remote { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Transport(_) | Self::MalformedResponse(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Remote {
            content_type, body, ..
        } = self
        {
            let mut resp = HttpResponse::build(self.status_code());
            if let Some(value) = content_type
                .as_deref()
                .and_then(|ct| HeaderValue::from_str(ct).ok())
            {
                resp.insert_header((header::CONTENT_TYPE, value));
            }
            return resp.body(body.clone());
        }

        HttpResponse::build(self.status_code()).json(ErrorDetail {
            detail: self.to_string(),
        })
    }
}
