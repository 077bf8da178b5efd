//! API request/response models for room types.

use super::pagination::Pagination;
use crate::db::models::rooms::RoomDBResponse;
use crate::types::{HotelId, RoomId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomCreate {
    /// Display name of the room type, e.g. "Double deluxe".
    pub name: String,
    /// Total units of this type the hotel offers.
    #[schema(minimum = 1)]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomUpdate {
    pub name: Option<String>,
    #[schema(minimum = 1)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: RoomId,
    #[schema(value_type = String, format = "uuid")]
    pub hotel_id: HotelId,
    pub name: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing a hotel's room types
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListRoomsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

impl From<RoomDBResponse> for RoomResponse {
    fn from(db: RoomDBResponse) -> Self {
        Self {
            id: db.id,
            hotel_id: db.hotel_id,
            name: db.name,
            quantity: db.quantity,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
