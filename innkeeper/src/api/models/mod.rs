//! Request/response data structures for API communication.

pub mod auth;
pub mod bookings;
pub mod hotels;
pub mod pagination;
pub mod rooms;
pub mod users;
