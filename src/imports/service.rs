use crate::bookings::{
    BookingService, CreateBookingRequest, CustomersRepository, ServicesRepository,
};
use crate::imports::models::{FileUploadResult, ImportRow};

/// Service for bulk booking imports
#[derive(Clone)]
pub struct ImportService {
    customers_repo: CustomersRepository,
    services_repo: ServicesRepository,
    booking_service: BookingService,
}

impl ImportService {
    /// Create a new ImportService
    pub fn new(
        customers_repo: CustomersRepository,
        services_repo: ServicesRepository,
        booking_service: BookingService,
    ) -> Self {
        Self {
            customers_repo,
            services_repo,
            booking_service,
        }
    }

    /// Process decoded rows sequentially, in row order
    ///
    /// Rows are independent: a failed row is recorded with its 1-based
    /// position and never aborts the rest of the batch. Rows already
    /// committed stay committed regardless of later failures.
    pub async fn import_rows(&self, filename: String, rows: Vec<ImportRow>) -> FileUploadResult {
        let records_processed = rows.len();
        let mut successful_imports = 0;
        let mut failed_imports = 0;
        let mut errors = Vec::new();

        for (index, row) in rows.into_iter().enumerate() {
            match self.import_row(row).await {
                Ok(()) => successful_imports += 1,
                Err(message) => {
                    errors.push(format!("Row {}: {}", index + 1, message));
                    failed_imports += 1;
                }
            }
        }

        tracing::info!(
            "Imported {}/{} rows from {} ({} failed)",
            successful_imports,
            records_processed,
            filename,
            failed_imports
        );

        FileUploadResult {
            filename,
            records_processed,
            successful_imports,
            failed_imports,
            errors,
        }
    }

    /// Import a single row
    ///
    /// The customer is found or created by email; the service must already
    /// exist by name. Any failure becomes the row's error message.
    async fn import_row(&self, row: ImportRow) -> Result<(), String> {
        let customer = match self
            .customers_repo
            .find_by_email(&row.customer_email)
            .await
            .map_err(|e| e.to_string())?
        {
            Some(existing) => existing,
            None => self
                .customers_repo
                .insert(&row.customer_name, &row.customer_email)
                .await
                .map_err(|e| e.to_string())?,
        };

        let service = self
            .services_repo
            .find_by_name(&row.service_name)
            .await
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("Service '{}' not found", row.service_name))?;

        let quantity = match row.quantity.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<i32>()
                .map_err(|_| format!("Invalid quantity '{}'", raw))?,
        };

        self.booking_service
            .create_booking(CreateBookingRequest {
                customer_id: customer.id,
                service_id: service.id,
                quantity,
                notes: row.notes,
            })
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}
