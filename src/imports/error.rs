use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for bulk import uploads
///
/// These cover whole-upload failures only; individual row failures are
/// reported inside the FileUploadResult instead.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Only CSV and Excel files are supported")]
    UnsupportedFileType,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Missing 'file' field in multipart upload")]
    MissingFile,

    #[error("Invalid multipart upload: {0}")]
    Upload(String),

    #[error("Error processing file: {0}")]
    Decode(String),
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let status = match &self {
            ImportError::UnsupportedFileType
            | ImportError::MissingColumns(_)
            | ImportError::MissingFile
            | ImportError::Upload(_) => StatusCode::BAD_REQUEST,
            ImportError::Decode(msg) => {
                tracing::error!("Failed to decode uploaded file: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
