//! API request/response models for hotels.

use super::pagination::Pagination;
use crate::db::models::hotels::HotelDBResponse;
use crate::types::{HotelId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HotelCreate {
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HotelUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HotelResponse {
    #[schema(value_type = String, format = "uuid")]
    pub id: HotelId,
    pub name: String,
    pub description: Option<String>,
    pub city: Option<String>,
    #[schema(value_type = String, format = "uuid")]
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing hotels
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListHotelsQuery {
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,
}

impl From<HotelDBResponse> for HotelResponse {
    fn from(db: HotelDBResponse) -> Self {
        Self {
            id: db.id,
            name: db.name,
            description: db.description,
            city: db.city,
            created_by: db.created_by,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
