//! Postgres-backed admission gateway.

use anyhow::anyhow;
use chrono::NaiveDate;
use sqlx::PgConnection;

use super::{AdmittedBooking, BookingStore, CommittedBooking, HotelCatalog, NewBooking, ResolvedGuest, ResolvedHotel, ResolvedRoom, RoomCatalog, UserDirectory};
use crate::db::handlers::{Bookings, Hotels, Repository, Rooms, Users};
use crate::db::models::bookings::BookingCreateDBRequest;
use crate::types::{HotelId, RoomId};

/// Implements the four admission collaborators over one database connection.
///
/// Hand this a transaction and the whole admission - lookups, capacity check
/// and persist - happens inside it. Room resolution takes `FOR UPDATE` locks
/// on the room-type rows, so two concurrent admissions sharing a room type
/// serialize: the second one's capacity check runs only after the first has
/// committed or rolled back, and inventory cannot be jointly oversold.
pub struct PgBookingGateway<'c> {
    db: &'c mut PgConnection,
}

impl<'c> PgBookingGateway<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl UserDirectory for PgBookingGateway<'_> {
    async fn user_by_email(&mut self, email: &str) -> anyhow::Result<Option<ResolvedGuest>> {
        let user = Users::new(&mut *self.db).get_user_by_email(email).await?;
        Ok(user.map(|user| ResolvedGuest {
            id: user.id,
            email: user.email,
        }))
    }
}

#[async_trait::async_trait]
impl HotelCatalog for PgBookingGateway<'_> {
    async fn hotel_by_id(&mut self, id: HotelId) -> anyhow::Result<Option<ResolvedHotel>> {
        let hotel = Hotels::new(&mut *self.db).get_by_id(id).await?;
        Ok(hotel.map(|hotel| ResolvedHotel {
            id: hotel.id,
            name: hotel.name,
        }))
    }
}

#[async_trait::async_trait]
impl RoomCatalog for PgBookingGateway<'_> {
    async fn rooms_by_ids(&mut self, ids: &[RoomId]) -> anyhow::Result<Vec<ResolvedRoom>> {
        let rooms = Rooms::new(&mut *self.db).get_by_ids_locked(ids).await?;
        Ok(rooms
            .into_iter()
            .map(|room| ResolvedRoom {
                id: room.id,
                hotel_id: room.hotel_id,
                name: room.name,
                quantity: room.quantity,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl BookingStore for PgBookingGateway<'_> {
    async fn find_overlapping_bookings(
        &mut self,
        hotel_id: HotelId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> anyhow::Result<Vec<CommittedBooking>> {
        let bookings = Bookings::new(&mut *self.db).find_overlapping(hotel_id, check_in, check_out).await?;
        Ok(bookings
            .into_iter()
            .map(|booking| CommittedBooking {
                id: booking.id,
                room_ids: booking.room_ids,
            })
            .collect())
    }

    async fn save_booking_with_invoice(&mut self, booking: &NewBooking) -> anyhow::Result<AdmittedBooking> {
        let request = BookingCreateDBRequest {
            user_id: booking.user_id,
            hotel_id: booking.hotel_id,
            room_ids: booking.room_ids.clone(),
            check_in_date: booking.check_in_date,
            check_out_date: booking.check_out_date,
            number_of_guests: booking.number_of_guests,
            status: booking.status.clone(),
        };

        let created = Bookings::new(&mut *self.db).create_with_invoice(&request).await?;
        let invoice_id = created.invoice_id.ok_or_else(|| anyhow!("booking persisted without an invoice"))?;

        Ok(AdmittedBooking {
            booking_id: created.id,
            invoice_id,
        })
    }
}
