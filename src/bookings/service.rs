use chrono::Utc;
use uuid::Uuid;

use crate::bookings::{
    Booking, BookingError, BookingStatus, BookingsRepository, CreateBookingRequest,
    CustomersRepository, QuoteCalculator, ServicesRepository, UpdateBookingRequest,
};

/// Service for booking lifecycle logic
#[derive(Clone)]
pub struct BookingService {
    customers_repo: CustomersRepository,
    services_repo: ServicesRepository,
    bookings_repo: BookingsRepository,
}

impl BookingService {
    /// Create a new BookingService
    pub fn new(
        customers_repo: CustomersRepository,
        services_repo: ServicesRepository,
        bookings_repo: BookingsRepository,
    ) -> Self {
        Self {
            customers_repo,
            services_repo,
            bookings_repo,
        }
    }

    /// Create a new booking
    ///
    /// # Validation
    /// - The referenced customer must exist
    /// - The referenced service must exist
    /// - Quantity must be positive
    ///
    /// Total price and estimated delivery date are derived here, once; the
    /// booking starts in pending status with both timestamps set to now.
    pub async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<Booking, BookingError> {
        self.customers_repo
            .find_by_id(request.customer_id)
            .await?
            .ok_or(BookingError::CustomerNotFound(request.customer_id))?;

        let service = self
            .services_repo
            .find_by_id(request.service_id)
            .await?
            .ok_or(BookingError::ServiceNotFound(request.service_id))?;

        if request.quantity <= 0 {
            return Err(BookingError::InvalidQuantity(format!(
                "Quantity must be positive, got {}",
                request.quantity
            )));
        }

        let total_price = QuoteCalculator::total_price(service.base_price, request.quantity);
        let estimated_delivery_date =
            QuoteCalculator::estimated_delivery(Utc::now(), service.estimated_delivery_days);

        let booking = self
            .bookings_repo
            .create(
                request.customer_id,
                request.service_id,
                request.quantity,
                total_price,
                estimated_delivery_date,
                request.notes.as_deref(),
            )
            .await?;

        tracing::info!(
            "Created booking {} for customer {} (total {})",
            booking.id,
            booking.customer_id,
            booking.total_price
        );
        Ok(booking)
    }

    /// Apply a partial update to a booking
    ///
    /// Unset patch fields are left unchanged and updated_at is always
    /// bumped. When the patch sets status to delivered and supplies an
    /// actual delivery date, the delivery variance and on-time flag are
    /// computed from the stored creation and estimate dates and persisted
    /// alongside the update.
    pub async fn update_booking(
        &self,
        booking_id: Uuid,
        patch: UpdateBookingRequest,
    ) -> Result<Booking, BookingError> {
        let booking = self
            .bookings_repo
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound)?;

        let mut delivery_variance_days = None;
        let mut delivered_on_time = None;

        if patch.status == Some(BookingStatus::Delivered) {
            if let Some(actual_delivery_date) = patch.actual_delivery_date {
                let variance = QuoteCalculator::delivery_variance(
                    booking.created_at,
                    booking.estimated_delivery_date,
                    actual_delivery_date,
                );
                delivery_variance_days = Some(variance.variance_days as i32);
                delivered_on_time = Some(variance.on_time);

                tracing::info!(
                    "Booking {} delivered with variance of {} day(s)",
                    booking_id,
                    variance.variance_days
                );
            }
        }

        self.bookings_repo
            .apply_update(booking_id, &patch, delivery_variance_days, delivered_on_time)
            .await
    }

    /// Get all bookings with an optional status filter
    pub async fn get_bookings(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        self.bookings_repo.find_all(status).await
    }

    /// Get a specific booking by ID
    pub async fn get_booking_by_id(&self, booking_id: Uuid) -> Result<Booking, BookingError> {
        self.bookings_repo
            .find_by_id(booking_id)
            .await?
            .ok_or(BookingError::NotFound)
    }
}
