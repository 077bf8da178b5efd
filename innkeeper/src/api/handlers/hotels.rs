use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::models::{
        hotels::{HotelCreate, HotelResponse, HotelUpdate, ListHotelsQuery},
        users::CurrentUser,
    },
    auth::permissions::require_admin,
    db::{
        handlers::{hotels::HotelFilter, Hotels, Repository},
        models::hotels::{HotelCreateDBRequest, HotelUpdateDBRequest},
    },
    errors::{Error, Result},
    types::HotelId,
    AppState,
};

#[utoipa::path(
    get,
    path = "/hotels",
    tag = "hotels",
    summary = "List hotels",
    responses(
        (status = 200, description = "List of hotels", body = Vec<HotelResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    params(ListHotelsQuery),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn list_hotels(
    State(state): State<AppState>,
    Query(query): Query<ListHotelsQuery>,
    _current_user: CurrentUser,
) -> Result<Json<Vec<HotelResponse>>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Hotels::new(&mut pool_conn);

    let (skip, limit) = query.pagination.params();
    let hotels = repo.list(&HotelFilter::new(skip, limit)).await?;

    Ok(Json(hotels.into_iter().map(HotelResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/hotels",
    tag = "hotels",
    summary = "Create hotel",
    request_body = HotelCreate,
    responses(
        (status = 201, description = "Hotel created successfully", body = HotelResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 409, description = "A hotel with this name already exists"),
        (status = 500, description = "Internal server error")
    ),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn create_hotel(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(create): Json<HotelCreate>,
) -> Result<(StatusCode, Json<HotelResponse>)> {
    require_admin(&current_user)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Hotels::new(&mut pool_conn);
    let request = HotelCreateDBRequest::new(current_user.id, create);

    let hotel = repo.create(&request).await?;
    Ok((StatusCode::CREATED, Json(HotelResponse::from(hotel))))
}

#[utoipa::path(
    get,
    path = "/hotels/{hotel_id}",
    tag = "hotels",
    summary = "Get hotel",
    responses(
        (status = 200, description = "Hotel details", body = HotelResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("hotel_id" = uuid::Uuid, Path, description = "Hotel ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    _current_user: CurrentUser,
) -> Result<Json<HotelResponse>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Hotels::new(&mut pool_conn);

    match repo.get_by_id(hotel_id).await? {
        Some(hotel) => Ok(Json(HotelResponse::from(hotel))),
        None => Err(Error::NotFound {
            message: format!("Hotel with ID {hotel_id} not found."),
        }),
    }
}

#[utoipa::path(
    patch,
    path = "/hotels/{hotel_id}",
    tag = "hotels",
    summary = "Update hotel",
    request_body = HotelUpdate,
    responses(
        (status = 200, description = "Hotel updated successfully", body = HotelResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("hotel_id" = uuid::Uuid, Path, description = "Hotel ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn update_hotel(
    State(state): State<AppState>,
    Path(hotel_id): Path<HotelId>,
    current_user: CurrentUser,
    Json(update): Json<HotelUpdate>,
) -> Result<Json<HotelResponse>> {
    require_admin(&current_user)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Hotels::new(&mut pool_conn);

    match repo.update(hotel_id, &HotelUpdateDBRequest::from(update)).await {
        Ok(hotel) => Ok(Json(HotelResponse::from(hotel))),
        Err(crate::db::errors::DbError::NotFound) => Err(Error::NotFound {
            message: format!("Hotel with ID {hotel_id} not found."),
        }),
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/hotels/{hotel_id}",
    tag = "hotels",
    summary = "Delete hotel",
    responses(
        (status = 204, description = "Hotel deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Administrator access required"),
        (status = 404, description = "Hotel not found"),
        (status = 500, description = "Internal server error")
    ),
    params(("hotel_id" = uuid::Uuid, Path, description = "Hotel ID")),
    security(("BearerAuth" = []), ("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn delete_hotel(State(state): State<AppState>, Path(hotel_id): Path<HotelId>, current_user: CurrentUser) -> Result<StatusCode> {
    require_admin(&current_user)?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let mut repo = Hotels::new(&mut pool_conn);

    if repo.delete(hotel_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound {
            message: format!("Hotel with ID {hotel_id} not found."),
        })
    }
}
