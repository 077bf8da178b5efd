use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        bookings::{BookingCreate, BookingCreatedResponse, BookingResponse, ListBookingsQuery},
        users::CurrentUser,
    },
    booking::{AdmissionEngine, AdmissionRequest, PgBookingGateway},
    db::handlers::{bookings::BookingFilter, Bookings},
    errors::{Error, Result},
    types::BookingId,
    AppState,
};

#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    summary = "Create booking",
    request_body = BookingCreate,
    responses(
        (status = 201, description = "Booking created successfully with invoice", body = BookingCreatedResponse),
        (status = 400, description = "Invalid date range or not enough rooms available"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User, hotel or room not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_booking(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(create): Json<BookingCreate>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>)> {
    let request = AdmissionRequest::from(create);

    // The whole admission runs inside one transaction. Room resolution locks
    // the room-type rows, so a concurrent admission for a shared room type
    // waits here until this one commits or rolls back and cannot oversell.
    let mut tx = state.db.begin().await.map_err(|e| Error::Database(e.into()))?;

    let admitted = {
        let mut engine = AdmissionEngine::new(PgBookingGateway::new(&mut tx));
        engine.admit(&current_user.email, &request).await
    };
    // A rejection drops the transaction uncommitted; nothing is persisted.
    let admitted = admitted.map_err(Error::from)?;

    tx.commit().await.map_err(|e| Error::Database(e.into()))?;

    Ok((
        StatusCode::CREATED,
        Json(BookingCreatedResponse {
            id: admitted.booking_id,
            invoice_id: admitted.invoice_id,
            message: "Booking created successfully with invoice.".to_string(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    summary = "List bookings",
    description = "Administrators see every booking; other callers see their own.",
    responses(
        (status = 200, description = "List of bookings", body = Vec<BookingResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    params(ListBookingsQuery),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
    current_user: CurrentUser,
) -> Result<Json<Vec<BookingResponse>>> {
    let (skip, limit) = query.pagination.params();
    let filter = if current_user.is_admin {
        BookingFilter::all(skip, limit)
    } else {
        BookingFilter::for_user(current_user.id, skip, limit)
    };

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let bookings = Bookings::new(&mut pool_conn).list(&filter).await?;

    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/bookings/{booking_id}",
    tag = "bookings",
    summary = "Get booking",
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Booking not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("booking_id" = uuid::Uuid, Path, description = "Booking ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<BookingId>,
    current_user: CurrentUser,
) -> Result<Json<BookingResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let booking = Bookings::new(&mut pool_conn).get_by_id(booking_id).await?;

    // Another guest's booking is indistinguishable from a missing one
    match booking {
        Some(booking) if booking.user_id == current_user.id || current_user.is_admin => Ok(Json(BookingResponse::from(booking))),
        _ => Err(Error::NotFound {
            message: format!("Booking with ID {booking_id} not found."),
        }),
    }
}
