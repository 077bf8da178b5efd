//! Database repository for hotels.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::hotels::{HotelCreateDBRequest, HotelDBResponse, HotelUpdateDBRequest},
};
use crate::types::{abbrev_uuid, HotelId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing hotels
#[derive(Debug, Clone)]
pub struct HotelFilter {
    pub skip: i64,
    pub limit: i64,
}

impl HotelFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}

pub struct Hotels<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Hotels<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Hotels<'c> {
    type CreateRequest = HotelCreateDBRequest;
    type UpdateRequest = HotelUpdateDBRequest;
    type Response = HotelDBResponse;
    type Id = HotelId;
    type Filter = HotelFilter;

    #[instrument(skip(self, request), fields(name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let hotel_id = Uuid::new_v4();

        let hotel = sqlx::query_as::<_, HotelDBResponse>(
            r#"
            INSERT INTO hotels (id, name, description, city, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(hotel_id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.city)
        .bind(request.created_by)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(hotel)
    }

    #[instrument(skip(self), fields(hotel_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let hotel = sqlx::query_as::<_, HotelDBResponse>("SELECT * FROM hotels WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(hotel)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let hotels = sqlx::query_as::<_, HotelDBResponse>("SELECT * FROM hotels ORDER BY created_at DESC LIMIT $1 OFFSET $2")
            .bind(filter.limit)
            .bind(filter.skip)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(hotels)
    }

    #[instrument(skip(self, request), fields(hotel_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let hotel = sqlx::query_as::<_, HotelDBResponse>(
            r#"
            UPDATE hotels SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                city = COALESCE($4, city),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.city)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(hotel)
    }

    #[instrument(skip(self), fields(hotel_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
