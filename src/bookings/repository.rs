use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::bookings::error::BookingError;
use crate::bookings::{Booking, BookingStatus, UpdateBookingRequest};
use crate::models::{Customer, Service};

const BOOKING_COLUMNS: &str = "id, customer_id, service_id, quantity, total_price, status, \
     estimated_delivery_date, actual_delivery_date, notes, delivery_variance_days, \
     delivered_on_time, created_at, updated_at";

/// Repository for customer lookups used by the booking workflow
#[derive(Clone)]
pub struct CustomersRepository {
    pool: PgPool,
}

impl CustomersRepository {
    /// Create a new CustomersRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a customer by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, BookingError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone, address, created_at FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Find a customer by email (the bulk-import natural key)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, BookingError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, email, phone, address, created_at FROM customers WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Insert a customer with only name and email set
    ///
    /// Used by bulk import's find-or-create; the unique index on email is
    /// the guard against concurrent duplicate creation.
    pub async fn insert(&self, name: &str, email: &str) -> Result<Customer, BookingError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, email)
            VALUES ($1, $2)
            RETURNING id, name, email, phone, address, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }
}

/// Repository for service lookups used by the booking workflow
#[derive(Clone)]
pub struct ServicesRepository {
    pool: PgPool,
}

impl ServicesRepository {
    /// Create a new ServicesRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a service by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, BookingError> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT id, name, service_type, description, base_price, estimated_delivery_days, \
             created_at FROM services WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// Find a service by name (the bulk-import natural key)
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Service>, BookingError> {
        let service = sqlx::query_as::<_, Service>(
            "SELECT id, name, service_type, description, base_price, estimated_delivery_days, \
             created_at FROM services WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }
}

/// Repository for booking operations
#[derive(Clone)]
pub struct BookingsRepository {
    pool: PgPool,
}

impl BookingsRepository {
    /// Create a new BookingsRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new booking in pending status with its derived fields
    pub async fn create(
        &self,
        customer_id: Uuid,
        service_id: Uuid,
        quantity: i32,
        total_price: Decimal,
        estimated_delivery_date: DateTime<Utc>,
        notes: Option<&str>,
    ) -> Result<Booking, BookingError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            INSERT INTO bookings (customer_id, service_id, quantity, total_price, status,
                                  estimated_delivery_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(customer_id)
        .bind(service_id)
        .bind(quantity)
        .bind(total_price)
        .bind(BookingStatus::Pending)
        .bind(estimated_delivery_date)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Find a booking by ID
    pub async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, BookingError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Find all bookings with an optional exact status filter
    pub async fn find_all(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, BookingError> {
        let bookings = match status {
            Some(status_filter) => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = $1 ORDER BY created_at"
                ))
                .bind(status_filter)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Booking>(&format!(
                    "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bookings)
    }

    /// Apply a partial update to a booking, bumping updated_at
    ///
    /// Unset patch fields keep their stored values. The variance fields are
    /// only ever supplied by the delivered-transition rule in the service
    /// layer.
    pub async fn apply_update(
        &self,
        booking_id: Uuid,
        patch: &UpdateBookingRequest,
        delivery_variance_days: Option<i32>,
        delivered_on_time: Option<bool>,
    ) -> Result<Booking, BookingError> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            r#"
            UPDATE bookings
            SET status = COALESCE($2, status),
                actual_delivery_date = COALESCE($3, actual_delivery_date),
                notes = COALESCE($4, notes),
                delivery_variance_days = COALESCE($5, delivery_variance_days),
                delivered_on_time = COALESCE($6, delivered_on_time),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BOOKING_COLUMNS}
            "#,
        ))
        .bind(booking_id)
        .bind(patch.status)
        .bind(patch.actual_delivery_date)
        .bind(patch.notes.as_deref())
        .bind(delivery_variance_days)
        .bind(delivered_on_time)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(BookingError::NotFound)?;

        Ok(booking)
    }
}
