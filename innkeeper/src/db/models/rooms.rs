//! Database models for room types.

use crate::api::models::rooms::{RoomCreate, RoomUpdate};
use crate::types::{HotelId, RoomId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new room type
#[derive(Debug, Clone)]
pub struct RoomCreateDBRequest {
    pub hotel_id: HotelId,
    pub name: String,
    pub quantity: i32,
}

impl RoomCreateDBRequest {
    pub fn new(hotel_id: HotelId, create: RoomCreate) -> Self {
        Self {
            hotel_id,
            name: create.name,
            quantity: create.quantity,
        }
    }
}

/// Database request for updating a room type
#[derive(Debug, Clone)]
pub struct RoomUpdateDBRequest {
    pub name: Option<String>,
    pub quantity: Option<i32>,
}

impl From<RoomUpdate> for RoomUpdateDBRequest {
    fn from(update: RoomUpdate) -> Self {
        Self {
            name: update.name,
            quantity: update.quantity,
        }
    }
}

/// Database response for a room type.
///
/// `quantity` is the hotel-wide unit count of this type; availability for a
/// stay interval is derived fresh from overlapping bookings on every
/// admission, never stored.
#[derive(Debug, Clone, FromRow)]
pub struct RoomDBResponse {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub name: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
