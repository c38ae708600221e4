use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One decoded row from an uploaded tabular file
///
/// Quantity is kept as the raw cell text so that parse failures can be
/// reported per row instead of failing the whole upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub customer_name: String,
    pub customer_email: String,
    pub service_name: String,
    pub quantity: Option<String>,
    pub notes: Option<String>,
}

/// Summary of a bulk import run
///
/// Errors are in row order, one entry per failed row, each tagged with the
/// row's 1-based position.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FileUploadResult {
    #[schema(example = "bookings.csv")]
    pub filename: String,
    pub records_processed: usize,
    pub successful_imports: usize,
    pub failed_imports: usize,
    pub errors: Vec<String>,
}
