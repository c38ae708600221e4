use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Delivery performance figures for a single delivered booking
///
/// Recomputed from the booking's own dates on every request; the stored
/// variance fields are intentionally not trusted here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeliveryPerformance {
    pub booking_id: Uuid,
    pub estimated_days: i64,
    pub actual_days: i64,
    /// Actual minus estimated elapsed days; negative means early
    pub variance_days: i64,
    pub on_time: bool,
}

/// High-level summary statistics across the whole store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsOverview {
    /// Count of bookings per status value present in storage
    #[schema(value_type = Object)]
    pub status_counts: HashMap<String, i64>,
    /// Percentage (0-100, two decimal places) of delivered bookings with a
    /// persisted on-time flag that were on time; 0 when there are none
    pub on_time_delivery_rate: f64,
    pub total_customers: i64,
    pub total_services: i64,
    pub total_bookings: i64,
}
