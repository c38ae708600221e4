// HTTP handlers for booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::bookings::{
    Booking, BookingError, BookingStatus, CreateBookingRequest, UpdateBookingRequest,
};

/// Query parameters for listing bookings
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// Optional exact status filter
    pub status: Option<BookingStatus>,
}

/// Handler for POST /api/bookings
/// Creates a new booking with derived price and delivery estimate
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created successfully", body = Booking),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Referenced customer or service not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "bookings"
)]
pub async fn create_booking_handler(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>), BookingError> {
    tracing::debug!(
        "Creating booking for customer {} and service {}",
        request.customer_id,
        request.service_id
    );

    request
        .validate()
        .map_err(|e| BookingError::ValidationError(e.to_string()))?;

    let booking = state.booking_service.create_booking(request).await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Handler for GET /api/bookings
/// Retrieves all bookings, optionally filtered by status
#[utoipa::path(
    get,
    path = "/api/bookings",
    params(BookingListQuery),
    responses(
        (status = 200, description = "List of bookings", body = Vec<Booking>),
        (status = 500, description = "Internal server error")
    ),
    tag = "bookings"
)]
pub async fn get_bookings_handler(
    State(state): State<crate::AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<Booking>>, BookingError> {
    let bookings = state.booking_service.get_bookings(query.status).await?;

    tracing::debug!("Retrieved {} bookings", bookings.len());
    Ok(Json(bookings))
}

/// Handler for GET /api/bookings/:id
/// Retrieves a specific booking by ID
#[utoipa::path(
    get,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking found", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "bookings"
)]
pub async fn get_booking_by_id_handler(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<Booking>, BookingError> {
    let booking = state.booking_service.get_booking_by_id(booking_id).await?;

    Ok(Json(booking))
}

/// Handler for PUT /api/bookings/:id
/// Applies a partial update; computes delivery performance when the patch
/// marks the booking delivered with an actual delivery date
#[utoipa::path(
    put,
    path = "/api/bookings/{id}",
    params(("id" = Uuid, Path, description = "Booking ID")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated successfully", body = Booking),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "bookings"
)]
pub async fn update_booking_handler(
    State(state): State<crate::AppState>,
    Path(booking_id): Path<Uuid>,
    Json(patch): Json<UpdateBookingRequest>,
) -> Result<Json<Booking>, BookingError> {
    tracing::debug!("Updating booking {}", booking_id);

    let booking = state
        .booking_service
        .update_booking(booking_id, patch)
        .await?;

    Ok(Json(booking))
}
