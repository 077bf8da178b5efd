use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        rooms::{ListRoomsQuery, RoomCreate, RoomResponse, RoomUpdate},
        users::CurrentUser,
    },
    auth::permissions::require_admin,
    db::{
        handlers::{rooms::RoomFilter, Hotels, Repository, Rooms},
        models::rooms::{RoomCreateDBRequest, RoomUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{HotelId, RoomId},
    AppState,
};

#[utoipa::path(
    get,
    path = "/hotels/{hotel_id}/rooms",
    tag = "rooms",
    summary = "List a hotel's room types",
    responses(
        (status = 200, description = "List of room types", body = Vec<RoomResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("hotel_id" = uuid::Uuid, Path, description = "Hotel ID"),
        ListRoomsQuery
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_rooms(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    Query(query): Query<ListRoomsQuery>,
    _current_user: CurrentUser,
) -> Result<Json<Vec<RoomResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    // Resolve the hotel first so an unknown id is a 404, not an empty list
    if Hotels::new(&mut pool_conn).get_by_id(hotel_id).await?.is_none() {
        return Err(Error::NotFound {
            message: format!("Hotel with ID {hotel_id} not found."),
        });
    }

    let (skip, limit) = query.pagination.params();
    let rooms = Rooms::new(&mut pool_conn).list(&RoomFilter::for_hotel(hotel_id, skip, limit)).await?;

    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/hotels/{hotel_id}/rooms",
    tag = "rooms",
    summary = "Create room type",
    request_body = RoomCreate,
    responses(
        (status = 201, description = "Room type created successfully", body = RoomResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("hotel_id" = uuid::Uuid, Path, description = "Hotel ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_room(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    current_user: CurrentUser,
    Json(create): Json<RoomCreate>,
) -> Result<(StatusCode, Json<RoomResponse>)> {
    require_admin(&current_user)?;

    if create.quantity < 1 {
        return Err(Error::BadRequest {
            message: "Room quantity must be at least 1".to_string(),
        });
    }

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;

    if Hotels::new(&mut pool_conn).get_by_id(hotel_id).await?.is_none() {
        return Err(Error::NotFound {
            message: format!("Hotel with ID {hotel_id} not found."),
        });
    }

    let mut repo = Rooms::new(&mut pool_conn);
    let room = repo.create(&RoomCreateDBRequest::new(hotel_id, create)).await?;

    Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}

#[utoipa::path(
    get,
    path = "/rooms/{room_id}",
    tag = "rooms",
    summary = "Get room type",
    responses(
        (status = 200, description = "Room type details", body = RoomResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("room_id" = uuid::Uuid, Path, description = "Room type ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_room(State(state): State<AppState>, Path(room_id): Path<RoomId>, _current_user: CurrentUser) -> Result<Json<RoomResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut pool_conn);

    match repo.get_by_id(room_id).await? {
        Some(room) => Ok(Json(RoomResponse::from(room))),
        None => Err(Error::NotFound {
            message: format!("Room with ID {room_id} not found."),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/rooms/{room_id}",
    tag = "rooms",
    summary = "Update room type",
    request_body = RoomUpdate,
    responses(
        (status = 200, description = "Room type updated successfully", body = RoomResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("room_id" = uuid::Uuid, Path, description = "Room type ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_room(
    State(state): State<AppState>,
    Path(room_id): Path<RoomId>,
    current_user: CurrentUser,
    Json(update): Json<RoomUpdate>,
) -> Result<Json<RoomResponse>> {
    require_admin(&current_user)?;

    if let Some(quantity) = update.quantity {
        if quantity < 1 {
            return Err(Error::BadRequest {
                message: "Room quantity must be at least 1".to_string(),
            });
        }
    }

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut pool_conn);

    match repo.update(room_id, &RoomUpdateDBRequest::from(update)).await {
        Ok(room) => Ok(Json(RoomResponse::from(room))),
        Err(crate::db::errors::DbError::NotFound) => Err(Error::NotFound {
            message: format!("Room with ID {room_id} not found."),
        }),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/rooms/{room_id}",
    tag = "rooms",
    summary = "Delete room type",
    responses(
        (status = 204, description = "Room type deleted"),
        (status = 400, description = "Room type is referenced by bookings"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Room not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("room_id" = uuid::Uuid, Path, description = "Room type ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_room(State(state): State<AppState>, Path(room_id): Path<RoomId>, current_user: CurrentUser) -> Result<StatusCode> {
    require_admin(&current_user)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Rooms::new(&mut pool_conn);

    if repo.delete(room_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            message: format!("Room with ID {room_id} not found."),
        })
    }
}
