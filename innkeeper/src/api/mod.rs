//! API layer for HTTP request handling and data models.
//!
//! This module contains the REST API implementation, organized into:
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! # API Structure
//!
//! - **Authentication** (`/authentication/*`): registration, login, logout
//! - **Hotels** (`/api/v1/hotels/*`): hotel and room-type management
//! - **Bookings** (`/api/v1/bookings/*`): reservation admission and retrieval
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! the rendered documentation is served at `/docs`.

pub mod handlers;
pub mod models;
