//! Database repository for room types.

use crate::db::{
    errors::{DbError, Result},
    handlers::repository::Repository,
    models::rooms::{RoomCreateDBRequest, RoomDBResponse, RoomUpdateDBRequest},
};
use crate::types::{abbrev_uuid, HotelId, RoomId};
use sqlx::PgConnection;
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing room types
#[derive(Debug, Clone)]
pub struct RoomFilter {
    pub hotel_id: Option<HotelId>,
    pub skip: i64,
    pub limit: i64,
}

impl RoomFilter {
    pub fn for_hotel(hotel_id: HotelId, skip: i64, limit: i64) -> Self {
        Self {
            hotel_id: Some(hotel_id),
            skip,
            limit,
        }
    }
}

pub struct Rooms<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Rooms<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Fetch the room types matching `ids`, in no particular order.
    ///
    /// Ids with no matching row are silently absent from the result; callers
    /// detect gaps by comparing requested against returned ids.
    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    pub async fn get_by_ids(&mut self, ids: &[RoomId]) -> Result<Vec<RoomDBResponse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rooms = sqlx::query_as::<_, RoomDBResponse>("SELECT * FROM rooms WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rooms)
    }

    /// Fetch the room types matching `ids`, taking a row-level exclusive lock
    /// on each for the remainder of the surrounding transaction.
    ///
    /// Concurrent booking admissions for a common room type serialize on this
    /// lock, so each capacity check observes the other's committed state.
    #[instrument(skip(self, ids), fields(count = ids.len()), err)]
    pub async fn get_by_ids_locked(&mut self, ids: &[RoomId]) -> Result<Vec<RoomDBResponse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rooms = sqlx::query_as::<_, RoomDBResponse>("SELECT * FROM rooms WHERE id = ANY($1) FOR UPDATE")
            .bind(ids)
            .fetch_all(&mut *self.db)
            .await?;

        Ok(rooms)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Rooms<'c> {
    type CreateRequest = RoomCreateDBRequest;
    type UpdateRequest = RoomUpdateDBRequest;
    type Response = RoomDBResponse;
    type Id = RoomId;
    type Filter = RoomFilter;

    #[instrument(skip(self, request), fields(hotel_id = %abbrev_uuid(&request.hotel_id), name = %request.name), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let room_id = Uuid::new_v4();

        let room = sqlx::query_as::<_, RoomDBResponse>(
            r#"
            INSERT INTO rooms (id, hotel_id, name, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(request.hotel_id)
        .bind(&request.name)
        .bind(request.quantity)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(room)
    }

    #[instrument(skip(self), fields(room_id = %abbrev_uuid(&id)), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let room = sqlx::query_as::<_, RoomDBResponse>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(room)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        let rooms = sqlx::query_as::<_, RoomDBResponse>(
            r#"
            SELECT * FROM rooms
            WHERE ($1::uuid IS NULL OR hotel_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.hotel_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(rooms)
    }

    #[instrument(skip(self, request), fields(room_id = %abbrev_uuid(&id)), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let room = sqlx::query_as::<_, RoomDBResponse>(
            r#"
            UPDATE rooms SET
                name = COALESCE($2, name),
                quantity = COALESCE($3, quantity),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.name)
        .bind(request.quantity)
        .fetch_optional(&mut *self.db)
        .await?
        .ok_or(DbError::NotFound)?;

        Ok(room)
    }

    #[instrument(skip(self), fields(room_id = %abbrev_uuid(&id)), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
