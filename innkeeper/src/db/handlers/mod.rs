//! Repository implementations for database access.
//!
//! This module provides repository structs for each major entity in the
//! system. Each repository:
//!
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed operations
//! - Handles query construction and parameter binding
//! - Returns models from [`crate::db::models`]
//!
//! [`Hotels`] and [`Rooms`] implement the common [`Repository`] trait.
//! [`Users`] and [`Bookings`] have bespoke surfaces: users are never listed
//! or deleted by this service, and bookings are append-only with their own
//! overlap query and invoice-coupled insert.
//!
//! # Common Pattern
//!
//! ```ignore
//! use innkeeper::db::handlers::{hotels::HotelFilter, Hotels, Repository};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Hotels::new(&mut tx);
//!     let hotels = repo.list(&HotelFilter::new(0, 100)).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod bookings;
pub mod hotels;
pub mod repository;
pub mod rooms;
pub mod users;

pub use bookings::Bookings;
pub use hotels::Hotels;
pub use repository::Repository;
pub use rooms::Rooms;
pub use users::Users;
