//! OpenAPI documentation configuration.
//!
//! The rendered documentation is served at `/docs` by [`crate::build_router`].

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme},
};

use crate::api;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme("BearerAuth", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
        components.add_security_scheme(
            "CookieAuth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("innkeeper_session"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "innkeeper",
        description = "Hotel booking backend: reservation admission, inventory accounting and invoicing"
    ),
    modifiers(&SecurityAddon),
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::hotels::list_hotels,
        api::handlers::hotels::create_hotel,
        api::handlers::hotels::get_hotel,
        api::handlers::hotels::update_hotel,
        api::handlers::hotels::delete_hotel,
        api::handlers::rooms::list_rooms,
        api::handlers::rooms::create_room,
        api::handlers::rooms::get_room,
        api::handlers::rooms::update_room,
        api::handlers::rooms::delete_room,
        api::handlers::bookings::create_booking,
        api::handlers::bookings::list_bookings,
        api::handlers::bookings::get_booking,
    ),
    components(schemas(
        api::models::auth::RegisterRequest,
        api::models::auth::LoginRequest,
        api::models::auth::AuthResponse,
        api::models::auth::AuthSuccessResponse,
        api::models::users::UserResponse,
        api::models::hotels::HotelCreate,
        api::models::hotels::HotelUpdate,
        api::models::hotels::HotelResponse,
        api::models::rooms::RoomCreate,
        api::models::rooms::RoomUpdate,
        api::models::rooms::RoomResponse,
        api::models::bookings::BookingCreate,
        api::models::bookings::BookingResponse,
        api::models::bookings::BookingCreatedResponse,
    )),
    tags(
        (name = "authentication", description = "Account registration and sessions"),
        (name = "hotels", description = "Hotel management"),
        (name = "rooms", description = "Room-type management"),
        (name = "bookings", description = "Reservation admission and retrieval")
    )
)]
pub struct ApiDoc;
