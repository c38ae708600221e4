// HTTP handlers for analytics endpoints

use axum::{extract::State, Json};

use crate::analytics::models::{AnalyticsOverview, DeliveryPerformance};
use crate::error::ApiError;

/// Handler for GET /api/analytics/delivery-performance
/// Recomputed per-booking delivery figures for delivered bookings
#[utoipa::path(
    get,
    path = "/api/analytics/delivery-performance",
    responses(
        (status = 200, description = "Delivery performance per delivered booking", body = Vec<DeliveryPerformance>),
        (status = 500, description = "Internal server error")
    ),
    tag = "analytics"
)]
pub async fn get_delivery_performance(
    State(state): State<crate::AppState>,
) -> Result<Json<Vec<DeliveryPerformance>>, ApiError> {
    let performance = state.analytics_service.delivery_performance().await?;

    tracing::debug!("Computed delivery performance for {} bookings", performance.len());
    Ok(Json(performance))
}

/// Handler for GET /api/analytics/overview
/// Whole-store summary statistics
#[utoipa::path(
    get,
    path = "/api/analytics/overview",
    responses(
        (status = 200, description = "Summary statistics", body = AnalyticsOverview),
        (status = 500, description = "Internal server error")
    ),
    tag = "analytics"
)]
pub async fn get_analytics_overview(
    State(state): State<crate::AppState>,
) -> Result<Json<AnalyticsOverview>, ApiError> {
    let overview = state.analytics_service.overview().await?;

    Ok(Json(overview))
}
