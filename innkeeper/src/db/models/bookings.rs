//! Database models for bookings and their invoices.

use crate::types::{BookingId, HotelId, InvoiceId, RoomId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database request for creating a booking together with its invoice.
///
/// `room_ids` holds one entry per reserved unit, in request order. The same
/// room-type id appearing twice reserves two units of that type.
#[derive(Debug, Clone)]
pub struct BookingCreateDBRequest {
    pub user_id: UserId,
    pub hotel_id: HotelId,
    pub room_ids: Vec<RoomId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub status: String,
}

/// Database response for a booking.
#[derive(Debug, Clone, FromRow)]
pub struct BookingDBResponse {
    pub id: BookingId,
    pub user_id: UserId,
    pub hotel_id: HotelId,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// One entry per reserved unit, in the order the units were requested.
    pub room_ids: Vec<RoomId>,
    pub invoice_id: Option<InvoiceId>,
}

/// Database response for an invoice.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceDBResponse {
    pub id: InvoiceId,
    pub booking_id: BookingId,
    pub issued_at: DateTime<Utc>,
}
