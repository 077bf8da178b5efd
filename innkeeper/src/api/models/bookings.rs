//! API request/response models for bookings.

use super::pagination::Pagination;
use crate::booking::AdmissionRequest;
use crate::db::models::bookings::BookingDBResponse;
use crate::types::{BookingId, HotelId, InvoiceId, RoomId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Status a booking is created with when the caller does not supply one.
pub const DEFAULT_BOOKING_STATUS: &str = "PENDING";

/// A reservation request.
///
/// `room_ids` is ordered and duplicates are meaningful: listing the same
/// room-type id twice reserves two units of that type.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingCreate {
    #[schema(value_type = String, format = "uuid")]
    pub hotel_id: HotelId,
    #[schema(value_type = Vec<String>)]
    pub room_ids: Vec<RoomId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    /// Free-form label; defaults to "PENDING".
    pub status: Option<String>,
}

impl From<BookingCreate> for AdmissionRequest {
    fn from(create: BookingCreate) -> Self {
        Self {
            hotel_id: create.hotel_id,
            room_ids: create.room_ids,
            check_in_date: create.check_in_date,
            check_out_date: create.check_out_date,
            number_of_guests: create.number_of_guests,
            status: create.status.unwrap_or_else(|| DEFAULT_BOOKING_STATUS.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BookingId,
    #[schema(value_type = String, format = "uuid")]
    pub user_id: UserId,
    #[schema(value_type = String, format = "uuid")]
    pub hotel_id: HotelId,
    /// One entry per reserved unit, in request order.
    #[schema(value_type = Vec<String>)]
    pub room_ids: Vec<RoomId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub status: String,
    #[schema(value_type = Option<String>, format = "uuid")]
    pub invoice_id: Option<InvoiceId>,
    pub created_at: DateTime<Utc>,
}

/// Response for a successful admission.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookingCreatedResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: BookingId,
    #[schema(value_type = String, format = "uuid")]
    pub invoice_id: InvoiceId,
    pub message: String,
}

/// Query parameters for listing bookings
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListBookingsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

impl From<BookingDBResponse> for BookingResponse {
    fn from(db: BookingDBResponse) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
            hotel_id: db.hotel_id,
            room_ids: db.room_ids,
            check_in_date: db.check_in_date,
            check_out_date: db.check_out_date,
            number_of_guests: db.number_of_guests,
            status: db.status,
            invoice_id: db.invoice_id,
            created_at: db.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn missing_status_defaults_to_pending() {
        let create = BookingCreate {
            hotel_id: Uuid::new_v4(),
            room_ids: vec![Uuid::new_v4()],
            check_in_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(),
            number_of_guests: 2,
            status: None,
        };

        let request = AdmissionRequest::from(create);
        assert_eq!(request.status, DEFAULT_BOOKING_STATUS);
    }

    #[test]
    fn explicit_status_is_preserved() {
        let create = BookingCreate {
            hotel_id: Uuid::new_v4(),
            room_ids: vec![],
            check_in_date: NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 4, 9).unwrap(),
            number_of_guests: 1,
            status: Some("CONFIRMED".to_string()),
        };

        let request = AdmissionRequest::from(create);
        assert_eq!(request.status, "CONFIRMED");
    }
}
