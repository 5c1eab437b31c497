use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub confidence: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// An uploaded file as declared by the client.
#[derive(Debug)]
pub struct UploadedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}
