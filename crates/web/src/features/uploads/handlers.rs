use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use storage::{Database, dto::workout::WorkoutRecordResponse};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::WebError;

use super::services;

/// A workout CSV upload. The file arrives base64-encoded, the way the
/// web client submits file payloads.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UploadRequest {
    #[validate(length(min = 1, message = "user_id is required"))]
    pub user_id: String,

    #[validate(length(min = 1, message = "file_name is required"))]
    pub file_name: String,

    /// Base64-encoded UTF-8 CSV content
    #[validate(length(min = 1, message = "file_content is required"))]
    pub file_content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub records_processed: usize,
    pub records: Vec<WorkoutRecordResponse>,
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Every row imported", body = UploadResponse),
        (status = 400, description = "Schema or row validation error; nothing was imported"),
        (status = 500, description = "Database failure; nothing was imported")
    ),
    tag = "uploads"
)]
pub async fn upload_workout_csv(
    State(db): State<Database>,
    Json(req): Json<UploadRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let bytes = general_purpose::STANDARD
        .decode(req.file_content.as_bytes())
        .map_err(|_| WebError::BadRequest("Invalid file content encoding".to_string()))?;
    let csv_text = String::from_utf8(bytes)
        .map_err(|_| WebError::BadRequest("File content is not valid UTF-8".to_string()))?;

    tracing::info!(
        file_name = %req.file_name,
        user_id = %req.user_id,
        "processing workout csv upload"
    );

    let records = services::import_csv(&db, &req.user_id, &csv_text).await?;

    Ok(Json(UploadResponse {
        message: "File processed successfully".to_string(),
        records_processed: records.len(),
        records,
    })
    .into_response())
}
