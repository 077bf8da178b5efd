//! Database models for hotels.

use crate::api::models::hotels::{HotelCreate, HotelUpdate};
use crate::types::{HotelId, UserId};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database request for creating a new hotel
#[derive(Debug, Clone)]
pub struct HotelCreateDBRequest {
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub created_by: UserId,
}

impl HotelCreateDBRequest {
    pub fn new(created_by: UserId, create: HotelCreate) -> Self {
        Self {
            name: create.name,
            description: create.description,
            city: create.city,
            created_by,
        }
    }
}

/// Database request for updating a hotel
#[derive(Debug, Clone)]
pub struct HotelUpdateDBRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
}

impl From<HotelUpdate> for HotelUpdateDBRequest {
    fn from(update: HotelUpdate) -> Self {
        Self {
            name: update.name,
            description: update.description,
            city: update.city,
        }
    }
}

/// Database response for a hotel
#[derive(Debug, Clone, FromRow)]
pub struct HotelDBResponse {
    pub id: HotelId,
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
