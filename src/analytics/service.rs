use std::collections::HashMap;

use sqlx::PgPool;

use crate::analytics::models::{AnalyticsOverview, DeliveryPerformance};
use crate::bookings::{Booking, QuoteCalculator};
use crate::error::ApiError;

/// Service for read-only summary statistics
///
/// Runs outside the booking write path; reporting is best-effort, so
/// malformed or incomplete records are skipped rather than failing the
/// whole aggregate.
#[derive(Clone)]
pub struct AnalyticsService {
    pool: PgPool,
}

impl AnalyticsService {
    /// Create a new AnalyticsService
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Per-booking delivery performance for delivered bookings
    ///
    /// Day counts are recomputed from each booking's own stored dates; the
    /// referenced service is read only to confirm it still exists, and
    /// bookings whose service is gone are silently omitted.
    pub async fn delivery_performance(&self) -> Result<Vec<DeliveryPerformance>, ApiError> {
        let bookings = sqlx::query_as::<_, Booking>(
            "SELECT id, customer_id, service_id, quantity, total_price, status, \
             estimated_delivery_date, actual_delivery_date, notes, delivery_variance_days, \
             delivered_on_time, created_at, updated_at \
             FROM bookings \
             WHERE status = 'delivered' AND actual_delivery_date IS NOT NULL \
             ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut performance = Vec::with_capacity(bookings.len());
        for booking in bookings {
            let service_exists: Option<bool> = match sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM services WHERE id = $1)",
            )
            .bind(booking.service_id)
            .fetch_one(&self.pool)
            .await
            {
                Ok(exists) => exists,
                Err(e) => {
                    tracing::warn!(
                        "Skipping booking {} in delivery performance: {}",
                        booking.id,
                        e
                    );
                    continue;
                }
            };
            if !service_exists.unwrap_or(false) {
                tracing::debug!(
                    "Skipping booking {}: referenced service {} is missing",
                    booking.id,
                    booking.service_id
                );
                continue;
            }

            let Some(actual_delivery_date) = booking.actual_delivery_date else {
                continue;
            };

            let variance = QuoteCalculator::delivery_variance(
                booking.created_at,
                booking.estimated_delivery_date,
                actual_delivery_date,
            );

            performance.push(DeliveryPerformance {
                booking_id: booking.id,
                estimated_days: variance.estimated_days,
                actual_days: variance.actual_days,
                variance_days: variance.variance_days,
                on_time: variance.on_time,
            });
        }

        Ok(performance)
    }

    /// Whole-store summary: status counts, on-time rate, entity totals
    pub async fn overview(&self) -> Result<AnalyticsOverview, ApiError> {
        let status_rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM bookings GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        let status_counts: HashMap<String, i64> = status_rows.into_iter().collect();

        // Rate over delivered bookings that carry a persisted on-time flag
        let (total_delivered, on_time_deliveries): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE delivered_on_time) \
             FROM bookings \
             WHERE status = 'delivered' AND delivered_on_time IS NOT NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let on_time_delivery_rate = if total_delivered == 0 {
            0.0
        } else {
            let rate = on_time_deliveries as f64 / total_delivered as f64 * 100.0;
            (rate * 100.0).round() / 100.0
        };

        let total_customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        let total_services: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        let total_bookings: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;

        Ok(AnalyticsOverview {
            status_counts,
            on_time_delivery_rate,
            total_customers,
            total_services,
            total_bookings,
        })
    }
}
