use actix_multipart::{Multipart, MultipartError};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use bytes::Bytes;
use futures_util::{pin_mut, Stream, StreamExt};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::client::InferenceClient;
use crate::error::PredictError;
use crate::interpret::interpret;
use crate::models::{HealthStatus, PredictionResult, UploadedImage};
use crate::preprocess::preprocess;

pub const ALLOWED_IMAGE_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

pub struct AppState {
    pub client: InferenceClient,
    pub max_upload_bytes: usize,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/predict").route(web::post().to(predict)))
        .service(web::resource("/health").route(web::get().to(health)));
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus {
        status: "ok".to_string(),
    })
}

pub async fn predict(
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> Result<HttpResponse, PredictError> {
    let span = info_span!("predict", request_id = %Uuid::new_v4());

    async move {
        let result = classify_upload(&req, payload, &state).await;
        match &result {
            Ok(prediction) => info!(
                predicted_class = %prediction.predicted_class,
                confidence = %prediction.confidence,
                "prediction served"
            ),
            Err(e) if e.status_code().is_server_error() => error!("prediction failed: {e}"),
            Err(e) => warn!("prediction rejected: {e}"),
        }
        result.map(|prediction| HttpResponse::Ok().json(prediction))
    }
    .instrument(span)
    .await
}

async fn classify_upload(
    req: &HttpRequest,
    payload: web::Payload,
    state: &AppState,
) -> Result<PredictionResult, PredictError> {
    let upload = read_upload(req, payload, state.max_upload_bytes).await?;
    info!(
        content_type = %upload.content_type,
        len = upload.bytes.len(),
        "image received"
    );

    // Decoding and resizing are CPU bound, keep them off the event loop.
    let tensor = web::block(move || preprocess(&upload.bytes))
        .await
        .map_err(|e| PredictError::Internal(e.to_string()))??;
    debug!(shape = ?tensor.shape(), "image preprocessed");

    let resp = state.client.invoke(&tensor).await?;
    if resp.status != 200 {
        return Err(PredictError::Remote {
            status: resp.status,
            content_type: resp.content_type,
            body: resp.body,
        });
    }

    Ok(interpret(&resp.body)?)
}

/// Pulls the image out of either a multipart form (first part) or a raw
/// body. The declared type is checked before any image bytes are read.
async fn read_upload(
    req: &HttpRequest,
    payload: web::Payload,
    limit: usize,
) -> Result<UploadedImage, PredictError> {
    let request_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(essence)
        .unwrap_or_default();

    if request_type != "multipart/form-data" {
        let content_type = check_image_type(&request_type)?;
        let bytes = read_limited(payload, limit).await?;
        return Ok(UploadedImage {
            content_type,
            bytes,
        });
    }

    let mut multipart = Multipart::new(req.headers(), payload);
    let field = match multipart.next().await {
        Some(Ok(field)) => field,
        // A form without parts ends before the first part header.
        None | Some(Err(MultipartError::Incomplete)) => return Err(PredictError::MissingFile),
        Some(Err(e)) => return Err(PredictError::Upload(e.to_string())),
    };

    let content_type = check_image_type(&essence(&field.content_type().to_string()))?;
    let bytes = read_limited(field, limit).await?;
    Ok(UploadedImage {
        content_type,
        bytes,
    })
}

fn check_image_type(content_type: &str) -> Result<String, PredictError> {
    if ALLOWED_IMAGE_TYPES.contains(&content_type) {
        Ok(content_type.to_string())
    } else {
        Err(PredictError::InvalidImageType)
    }
}

/// `Image/PNG; charset=x` -> `image/png`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

async fn read_limited<S, E>(stream: S, limit: usize) -> Result<Vec<u8>, PredictError>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    pin_mut!(stream);
    let mut buf = Vec::new();
    while let Some(chunk) = stream.next().await {
        let data = chunk.map_err(|e| PredictError::Upload(e.to_string()))?;
        if buf.len() + data.len() > limit {
            return Err(PredictError::UploadTooLarge(limit));
        }
        buf.extend_from_slice(&data);
    }
    Ok(buf)
}
