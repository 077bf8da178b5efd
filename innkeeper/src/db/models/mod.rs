//! Database record structures matching table schemas.
//!
//! Each entity has up to three shapes: a `*CreateDBRequest` describing an
//! insert, a `*UpdateDBRequest` describing a partial update, and a
//! `*DBResponse` mirroring what the repository reads back. API models convert
//! into the request shapes; response shapes convert into API responses.

pub mod bookings;
pub mod hotels;
pub mod rooms;
pub mod users;
