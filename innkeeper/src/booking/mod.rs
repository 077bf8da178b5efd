//! Booking admission.
//!
//! This module decides whether a reservation request may be committed against
//! the hotel's room-type inventory, and persists admitted bookings together
//! with their invoices. It is the only part of the service with real decision
//! logic; everything it needs from the outside world arrives through the four
//! collaborator traits defined here.
//!
//! # Collaborators
//!
//! - [`UserDirectory`]: resolves the authenticated requester to a guest account
//! - [`HotelCatalog`]: resolves the requested hotel
//! - [`RoomCatalog`]: resolves the requested room-type ids
//! - [`BookingStore`]: the overlap query and the transactional persist
//!
//! The engine is constructed over a single gateway value implementing all
//! four traits ([`AdmissionEngine::new`]). Production code uses
//! [`PgBookingGateway`] over a database transaction; tests substitute an
//! in-memory gateway and exercise the pipeline through the same seam.
//!
//! # Interval semantics
//!
//! Stay intervals are half-open: `[check_in, check_out)`. Two intervals
//! overlap iff `a.check_in < b.check_out && b.check_in < a.check_out`, so a
//! checkout on the day of another booking's check-in does not collide. See
//! [`intervals_overlap`].

mod engine;
mod gateway;

pub use engine::AdmissionEngine;
pub use gateway::PgBookingGateway;

use crate::errors::Error;
use crate::types::{BookingId, HotelId, InvoiceId, RoomId, UserId};
use chrono::NaiveDate;
use thiserror::Error as ThisError;

/// A reservation request, already deserialized and bound to a requester.
///
/// `room_ids` is an ordered list with duplicates meaningful: requesting the
/// same room-type id twice reserves two units of that type.
#[derive(Debug, Clone)]
pub struct AdmissionRequest {
    pub hotel_id: HotelId,
    pub room_ids: Vec<RoomId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub status: String,
}

/// The guest account a requester's identity resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedGuest {
    pub id: UserId,
    pub email: String,
}

/// The hotel a request's `hotel_id` resolved to.
#[derive(Debug, Clone)]
pub struct ResolvedHotel {
    pub id: HotelId,
    pub name: String,
}

/// A room type with its hotel-wide unit count.
#[derive(Debug, Clone)]
pub struct ResolvedRoom {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub name: String,
    pub quantity: i32,
}

/// An existing booking as seen by the capacity check: only its reserved
/// units matter, one entry per unit.
#[derive(Debug, Clone)]
pub struct CommittedBooking {
    pub id: BookingId,
    pub room_ids: Vec<RoomId>,
}

/// A fully validated booking, ready to persist.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: UserId,
    pub hotel_id: HotelId,
    /// One entry per reserved unit, in request order.
    pub room_ids: Vec<RoomId>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub number_of_guests: i32,
    pub status: String,
}

/// The identifiers of a persisted booking and its invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmittedBooking {
    pub booking_id: BookingId,
    pub invoice_id: InvoiceId,
}

/// A room type that cannot cover the requested units for the stay interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomShortage {
    pub room_id: RoomId,
    /// Units asked for in this request.
    pub requested: i64,
    /// Units already held by overlapping bookings.
    pub committed: i64,
    /// Total units the hotel offers of this type.
    pub quantity: i64,
}

/// Why an admission was refused, or that it failed on infrastructure.
///
/// The first five variants are domain rejections: expected outcomes reported
/// to the caller with a specific status and message. `Infrastructure` wraps
/// any unexpected lookup or persistence fault; it is not recoverable here and
/// propagates to the boundary layer unchanged.
#[derive(Debug, ThisError)]
pub enum AdmissionError {
    #[error("User not found.")]
    UserNotFound,

    #[error("Hotel not found.")]
    HotelNotFound,

    /// Names the first requested id that did not resolve to a room type.
    #[error("Room with ID {0} not found.")]
    RoomNotFound(RoomId),

    #[error("Check-out date must be after check-in date.")]
    InvalidDateRange,

    /// Every failing room type is evaluated and reported, not just the first.
    #[error("{}", insufficient_rooms_message(.0))]
    InsufficientRooms(Vec<RoomShortage>),

    #[error(transparent)]
    Infrastructure(#[from] anyhow::Error),
}

fn insufficient_rooms_message(shortages: &[RoomShortage]) -> String {
    let detail = shortages
        .iter()
        .map(|s| {
            format!(
                "room {} has {} of {} units free, {} requested",
                s.room_id,
                (s.quantity - s.committed).max(0),
                s.quantity,
                s.requested
            )
        })
        .collect::<Vec<_>>()
        .join("; ");
    format!("Not enough rooms available: {detail}.")
}

impl From<AdmissionError> for Error {
    fn from(err: AdmissionError) -> Self {
        match err {
            AdmissionError::UserNotFound | AdmissionError::HotelNotFound | AdmissionError::RoomNotFound(_) => {
                Error::NotFound { message: err.to_string() }
            }
            AdmissionError::InvalidDateRange | AdmissionError::InsufficientRooms(_) => {
                Error::BadRequest { message: err.to_string() }
            }
            AdmissionError::Infrastructure(e) => Error::Other(e),
        }
    }
}

/// Half-open interval intersection: `[a_in, a_out)` meets `[b_in, b_out)`.
///
/// This is the contract [`BookingStore::find_overlapping_bookings`]
/// implementations must follow; the Postgres gateway expresses it as
/// `check_in_date < $out AND check_out_date > $in`.
pub fn intervals_overlap(a_in: NaiveDate, a_out: NaiveDate, b_in: NaiveDate, b_out: NaiveDate) -> bool {
    a_in < b_out && b_in < a_out
}

/// Resolves authenticated identities to guest accounts.
#[async_trait::async_trait]
pub trait UserDirectory {
    async fn user_by_email(&mut self, email: &str) -> anyhow::Result<Option<ResolvedGuest>>;
}

/// Resolves hotel identifiers.
#[async_trait::async_trait]
pub trait HotelCatalog {
    async fn hotel_by_id(&mut self, id: HotelId) -> anyhow::Result<Option<ResolvedHotel>>;
}

/// Resolves room-type identifiers.
#[async_trait::async_trait]
pub trait RoomCatalog {
    /// Returns only the room types that exist; the engine detects gaps by
    /// comparing requested against returned ids.
    async fn rooms_by_ids(&mut self, ids: &[RoomId]) -> anyhow::Result<Vec<ResolvedRoom>>;
}

/// The booking side of admission: the overlap query and the persist.
///
/// Implementations decide the transactional scope. The capacity check and
/// the persist are only atomic with respect to concurrent admissions if the
/// implementation makes them so; [`PgBookingGateway`] does, by running the
/// whole admission in one transaction with the room-type rows locked.
#[async_trait::async_trait]
pub trait BookingStore {
    /// Every booking for `hotel_id` whose stay interval intersects
    /// `[check_in, check_out)` under [`intervals_overlap`].
    async fn find_overlapping_bookings(
        &mut self,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> anyhow::Result<Vec<CommittedBooking>>;

    /// Persist the booking and generate its invoice in one atomic unit.
    async fn save_booking_with_invoice(&mut self, booking: &NewBooking) -> anyhow::Result<AdmittedBooking>;
}
