// HTTP handler for the bulk booking upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::imports::{decoder, error::ImportError, models::FileUploadResult};

/// Handler for POST /api/upload/bookings
/// Accepts a CSV or Excel file in a multipart "file" field and imports one
/// booking per row, reporting per-row failures in the response body
#[utoipa::path(
    post,
    path = "/api/upload/bookings",
    request_body(
        content = String,
        content_type = "multipart/form-data",
        description = "CSV or Excel file in a 'file' field with customer_name, customer_email, service_name and optional quantity, notes columns"
    ),
    responses(
        (status = 200, description = "Import summary with per-row errors", body = FileUploadResult),
        (status = 400, description = "Unsupported file type or missing required columns"),
        (status = 500, description = "File could not be processed")
    ),
    tag = "imports"
)]
pub async fn upload_bookings_handler(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> Result<Json<FileUploadResult>, ImportError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImportError::Upload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ImportError::Upload(e.to_string()))?;

        tracing::debug!("Importing bookings from {} ({} bytes)", filename, bytes.len());

        // Column validation happens in the decoder, before any row is
        // touched; row-level problems surface in the result body instead.
        let rows = decoder::decode(&filename, &bytes)?;
        let result = state.import_service.import_rows(filename, rows).await;

        return Ok(Json(result));
    }

    Err(ImportError::MissingFile)
}
