//! # innkeeper: Hotel Booking Backend
//!
//! `innkeeper` is a booking backend for hotels: authenticated guests reserve
//! room types for a date range, subject to per-room-type inventory limits.
//! It provides a RESTful API for managing hotels and their room types, and a
//! booking admission operation that decides each reservation against the
//! existing overlapping reservations before persisting it together with its
//! invoice.
//!
//! ## Overview
//!
//! The interesting part of the system is admission. A room row describes a
//! *room type* - a class of interchangeable rooms with a total unit count -
//! and a booking holds one or more units of one or more types for a half-open
//! stay interval `[check_in, check_out)`. A request is admissible when, for
//! every requested room type, the units already held by bookings overlapping
//! the requested interval plus the units now requested fit within the type's
//! total count. Nothing is ever decremented: availability is recomputed from
//! the overlap query on every admission.
//!
//! The admission pipeline, its collaborator seams and its concurrency story
//! live in the [`booking`] module. Everything else is conventional plumbing:
//! session authentication ([`auth`]), CRUD handlers ([`api`]), repositories
//! over PostgreSQL ([`db`]).
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum) for
//! the HTTP layer and uses PostgreSQL via SQLx for all persistence. Requests
//! pass through authentication (session cookie or bearer token), reach a
//! handler, and interact with the database through repository types. The
//! admission handler wraps the whole decision in a single transaction so that
//! concurrent bookings cannot oversell a room type.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use innkeeper::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Parse CLI arguments and load configuration
//!     let args = innkeeper::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     // Initialize structured logging
//!     innkeeper::telemetry::init_telemetry();
//!
//!     // Create and start the application
//!     let app = Application::new(config).await?;
//!
//!     // Run with graceful shutdown on Ctrl+C
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and automatically runs
//! migrations on startup.

pub mod api;
pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

use crate::{auth::password, config::CorsOrigin, db::handlers::Users, db::models::users::UserCreateDBRequest, openapi::ApiDoc};
use axum::{
    http::{self, HeaderValue},
    routing::{delete, get, patch, post},
    Router,
};
use bon::Builder;
pub use config::Config;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, instrument, Level};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use types::{BookingId, HotelId, InvoiceId, RoomId, UserId};

/// Application state shared across all request handlers.
#[derive(Clone, Builder)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the innkeeper database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Create the initial admin user if it doesn't exist.
///
/// This function is idempotent - it will create a new admin user if one
/// doesn't exist, or update the password if the user already exists. It is
/// called during application startup to ensure there's always an admin user
/// available.
///
/// Returns the user ID of the created or existing admin user.
#[instrument(skip_all)]
pub async fn create_initial_admin_user(email: &str, password: Option<&str>, db: &PgPool) -> errors::Result<UserId> {
    // Hash password if provided
    let password_hash = match password {
        Some(pwd) => Some(password::hash_string(pwd)?),
        None => None,
    };

    // Use a transaction to ensure atomicity
    let mut tx = db.begin().await.map_err(|e| errors::Error::Database(e.into()))?;
    let mut user_repo = Users::new(&mut tx);

    // Check if user already exists
    if let Some(existing_user) = user_repo.get_user_by_email(email).await? {
        // User exists - update password if provided
        if let Some(password_hash) = password_hash {
            user_repo.set_password(existing_user.id, &password_hash).await?;
        }
        tx.commit().await.map_err(|e| errors::Error::Database(e.into()))?;
        return Ok(existing_user.id);
    }

    // Create new admin user
    let user_create = UserCreateDBRequest {
        username: email.to_string(),
        email: email.to_string(),
        display_name: None,
        is_admin: true,
        auth_source: "system".to_string(),
        password_hash,
    };

    let created_user = user_repo.create(&user_create).await?;

    tx.commit().await.map_err(|e| errors::Error::Database(e.into()))?;
    Ok(created_user.id)
}

/// Create CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.auth.security.cors.allowed_origins {
        let header_value = match origin {
            CorsOrigin::Wildcard => "*".parse::<HeaderValue>()?,
            CorsOrigin::Url(url) => url.as_str().parse::<HeaderValue>()?,
        };
        origins.push(header_value);
    }

    let mut cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(config.auth.security.cors.allow_credentials)
        .expose_headers(vec![http::header::LOCATION]);

    if let Some(max_age) = config.auth.security.cors.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the main application router with all endpoints and middleware.
///
/// This function constructs the complete Axum router with:
/// - Authentication routes (register, login, logout)
/// - Hotel and room-type management routes
/// - Booking admission and retrieval routes
/// - OpenAPI documentation at `/docs`
/// - CORS configuration
/// - Tracing middleware
#[instrument(skip_all)]
pub fn build_router(state: &AppState) -> anyhow::Result<Router> {
    // Authentication routes at root level
    let auth_routes = Router::new()
        .route("/authentication/register", post(api::handlers::auth::register))
        .route("/authentication/login", post(api::handlers::auth::login))
        .route("/authentication/logout", post(api::handlers::auth::logout))
        .with_state(state.clone());

    // API routes
    let api_routes = Router::new()
        // Hotel management (admin only for write operations)
        .route("/hotels", get(api::handlers::hotels::list_hotels))
        .route("/hotels", post(api::handlers::hotels::create_hotel))
        .route("/hotels/{hotel_id}", get(api::handlers::hotels::get_hotel))
        .route("/hotels/{hotel_id}", patch(api::handlers::hotels::update_hotel))
        .route("/hotels/{hotel_id}", delete(api::handlers::hotels::delete_hotel))
        // Room types as hotel sub-resources
        .route("/hotels/{hotel_id}/rooms", get(api::handlers::rooms::list_rooms))
        .route("/hotels/{hotel_id}/rooms", post(api::handlers::rooms::create_room))
        .route("/rooms/{room_id}", get(api::handlers::rooms::get_room))
        .route("/rooms/{room_id}", patch(api::handlers::rooms::update_room))
        .route("/rooms/{room_id}", delete(api::handlers::rooms::delete_room))
        // Bookings
        .route("/bookings", post(api::handlers::bookings::create_booking))
        .route("/bookings", get(api::handlers::bookings::list_bookings))
        .route("/bookings/{booking_id}", get(api::handlers::bookings::get_booking))
        .with_state(state.clone());

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(auth_routes)
        .nest("/api/v1", api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Create CORS layer from config
    let cors_layer = create_cors_layer(&state.config)?;

    // Add tracing layer
    let router = router.layer(cors_layer).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    );

    Ok(router)
}

/// Main application struct that owns all resources and lifecycle.
///
/// # Lifecycle
///
/// 1. **Create**: [`Application::new`] connects to the database, runs
///    migrations and provisions the initial admin user
/// 2. **Serve**: [`Application::serve`] binds to a TCP port and starts
///    handling requests
/// 3. **Shutdown**: when the shutdown signal resolves, in-flight requests
///    drain and the connection pool closes
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let pool = PgPool::connect(&config.database_url).await?;
        migrator().run(&pool).await?;

        // Create initial admin user if it doesn't exist
        create_initial_admin_user(&config.admin_email, config.admin_password.as_deref(), &pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create initial admin user: {}", e))?;

        let state = AppState::builder().db(pool.clone()).config(config.clone()).build();
        let router = build_router(&state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "innkeeper listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Close database connections
        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::api::models::users::CurrentUser;
    use axum_test::TestServer;

    fn test_state() -> AppState {
        let config = Config {
            secret_key: Some("test-secret-key-for-jwt".to_string()),
            ..Default::default()
        };
        // connect_lazy defers connections; routing tests never touch the database
        let db = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        AppState::builder().db(db).config(config).build()
    }

    fn test_server() -> TestServer {
        let state = test_state();
        let router = build_router(&state).unwrap();
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn healthz_responds_ok() {
        let server = test_server();

        let response = server.get("/healthz").await;

        response.assert_status_ok();
        response.assert_text("OK");
    }

    #[tokio::test]
    async fn hotel_routes_require_authentication() {
        let server = test_server();

        let response = server.get("/api/v1/hotels").await;

        assert_eq!(response.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn booking_admission_requires_authentication() {
        let server = test_server();

        let response = server
            .post("/api/v1/bookings")
            .json(&serde_json::json!({
                "hotel_id": uuid::Uuid::new_v4(),
                "room_ids": [uuid::Uuid::new_v4()],
                "check_in_date": "2025-04-05",
                "check_out_date": "2025-04-09",
                "number_of_guests": 2
            }))
            .await;

        assert_eq!(response.status_code().as_u16(), 401);
    }

    #[tokio::test]
    async fn authenticated_non_admins_cannot_create_hotels() {
        let state = test_state();
        let router = build_router(&state).unwrap();
        let server = TestServer::new(router).unwrap();

        let user = CurrentUser {
            id: uuid::Uuid::new_v4(),
            username: "guest".to_string(),
            email: "guest@example.com".to_string(),
            is_admin: false,
            display_name: None,
        };
        let token = auth::session::create_session_token(&user, &state.config).unwrap();

        let response = server
            .post("/api/v1/hotels")
            .add_header("authorization", format!("Bearer {token}"))
            .json(&serde_json::json!({ "name": "Harbour View" }))
            .await;

        assert_eq!(response.status_code().as_u16(), 403);
    }
}
