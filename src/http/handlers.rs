use super::state::AppState;
use crate::extraction::{clean_response, image_mime_type, parse_entries};
use crate::timecard::{TimecardEntry, TimecardSummary};
use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Multipart field carrying the timecard image
pub const FILE_FIELD: &str = "file";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseFailureResponse {
    pub error: String,

    /// Cleaned model output that failed to parse
    pub raw_response: String,
}

struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    bytes: Bytes,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Find the first `file` part that carries a filename and read it fully.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A part without a filename parameter is a plain form value
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /upload_timecard
/// Extract entries from an uploaded timecard image and total the hours
pub async fn upload_timecard(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let upload_id = Uuid::new_v4();

    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            warn!("[{}] Upload is not a multipart form: {}", upload_id, e);
            return error_response(StatusCode::BAD_REQUEST, "No file part");
        }
    };

    let upload = match read_file_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            warn!("[{}] Upload has no file part", upload_id);
            return error_response(StatusCode::BAD_REQUEST, "No file part");
        }
        Err(e) => {
            warn!("[{}] Failed to read upload: {}", upload_id, e);
            return error_response(e.status(), e.body_text());
        }
    };

    if upload.file_name.is_empty() {
        warn!("[{}] Upload has an empty filename", upload_id);
        return error_response(StatusCode::BAD_REQUEST, "No selected file");
    }

    info!(
        "[{}] Received {} ({} bytes)",
        upload_id,
        upload.file_name,
        upload.bytes.len()
    );

    let mime_type = image_mime_type(upload.content_type.as_deref());
    let raw = match state.extractor.extract(&upload.bytes, mime_type).await {
        Ok(text) => text,
        Err(e) => {
            error!("[{}] Extraction failed: {:#}", upload_id, e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", e));
        }
    };

    let cleaned = clean_response(&raw);
    let entries = match parse_entries(&cleaned) {
        Ok(entries) => entries,
        Err(e) => {
            error!("[{}] {}", upload_id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ParseFailureResponse {
                    error: "Failed to parse JSON".to_string(),
                    raw_response: e.raw_response,
                }),
            )
                .into_response();
        }
    };

    let summary = TimecardSummary::compute(entries);

    info!(
        "[{}] Extracted {} entries, total {}",
        upload_id,
        summary.entries.len(),
        summary.total_hours_worked
    );

    (StatusCode::OK, Json(summary)).into_response()
}

/// PUT /edit_timecard
/// Recompute hours for client-edited entries without calling the model
pub async fn edit_timecard(payload: Result<Json<Vec<TimecardEntry>>, JsonRejection>) -> Response {
    let entries = match payload {
        Ok(Json(entries)) => entries,
        Err(e) => {
            warn!("Rejected edit payload: {}", e);
            return error_response(e.status(), e.body_text());
        }
    };

    let summary = TimecardSummary::compute(entries);

    info!(
        "Recomputed {} edited entries, total {}",
        summary.entries.len(),
        summary.total_hours_worked
    );

    (StatusCode::OK, Json(summary)).into_response()
}

/// GET /
/// Liveness text for the frontend's connectivity check
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, "Backend is running!")
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
