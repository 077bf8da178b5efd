//! The admission decision pipeline.

use std::collections::HashMap;

use tracing::{debug, instrument};

use super::{
    AdmissionError, AdmissionRequest, AdmittedBooking, BookingStore, HotelCatalog, NewBooking, RoomCatalog, RoomShortage, UserDirectory,
};
use crate::types::{abbrev_uuid, RoomId};

/// Runs the ordered admission pipeline over a gateway implementing the four
/// collaborator traits.
///
/// The pipeline short-circuits at the first failure, in this order: requester
/// resolution, hotel resolution, room-type resolution, date-range validation,
/// per-room-type capacity, persist. The order is observable through the
/// rejection a caller receives and is relied on by clients, so it must not
/// change.
pub struct AdmissionEngine<G> {
    gateway: G,
}

impl<G> AdmissionEngine<G>
where
    G: UserDirectory + HotelCatalog + RoomCatalog + BookingStore + Send,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Decide the request and, if admissible, persist the booking with its
    /// invoice.
    ///
    /// Domain rejections leave no trace in storage. Infrastructure faults
    /// from the gateway propagate unchanged.
    #[instrument(skip_all, fields(hotel_id = %abbrev_uuid(&request.hotel_id), units = request.room_ids.len()))]
    pub async fn admit(&mut self, requester_email: &str, request: &AdmissionRequest) -> Result<AdmittedBooking, AdmissionError> {
        let guest = self
            .gateway
            .user_by_email(requester_email)
            .await?
            .ok_or(AdmissionError::UserNotFound)?;

        let hotel = self
            .gateway
            .hotel_by_id(request.hotel_id)
            .await?
            .ok_or(AdmissionError::HotelNotFound)?;

        // Distinct requested room types, first-seen order. The rooms lookup
        // returns only existing rows, so a gap names the missing id.
        let mut distinct: Vec<RoomId> = Vec::new();
        for id in &request.room_ids {
            if !distinct.contains(id) {
                distinct.push(*id);
            }
        }

        let rooms: HashMap<RoomId, _> = self
            .gateway
            .rooms_by_ids(&distinct)
            .await?
            .into_iter()
            .map(|room| (room.id, room))
            .collect();

        for id in &distinct {
            if !rooms.contains_key(id) {
                return Err(AdmissionError::RoomNotFound(*id));
            }
        }

        if request.check_out_date <= request.check_in_date {
            return Err(AdmissionError::InvalidDateRange);
        }

        let overlapping = self
            .gateway
            .find_overlapping_bookings(request.hotel_id, request.check_in_date, request.check_out_date)
            .await?;

        let mut committed: HashMap<RoomId, i64> = HashMap::new();
        for booking in &overlapping {
            for room_id in &booking.room_ids {
                *committed.entry(*room_id).or_insert(0) += 1;
            }
        }

        let mut requested: HashMap<RoomId, i64> = HashMap::new();
        for id in &request.room_ids {
            *requested.entry(*id).or_insert(0) += 1;
        }

        // Every room type is checked before rejecting, so the caller sees
        // all shortages at once rather than one per attempt.
        let mut shortages = Vec::new();
        for id in &distinct {
            let room = &rooms[id];
            let want = requested[id];
            let held = committed.get(id).copied().unwrap_or(0);
            if held + want > i64::from(room.quantity) {
                shortages.push(RoomShortage {
                    room_id: *id,
                    requested: want,
                    committed: held,
                    quantity: i64::from(room.quantity),
                });
            }
        }
        if !shortages.is_empty() {
            return Err(AdmissionError::InsufficientRooms(shortages));
        }

        let booking = NewBooking {
            user_id: guest.id,
            hotel_id: hotel.id,
            room_ids: request.room_ids.clone(),
            check_in_date: request.check_in_date,
            check_out_date: request.check_out_date,
            number_of_guests: request.number_of_guests,
            status: request.status.clone(),
        };

        let admitted = self.gateway.save_booking_with_invoice(&booking).await?;

        debug!(
            booking_id = %abbrev_uuid(&admitted.booking_id),
            guest = %guest.email,
            hotel = %hotel.name,
            "booking admitted"
        );

        Ok(admitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{intervals_overlap, CommittedBooking, ResolvedGuest, ResolvedHotel, ResolvedRoom};
    use crate::types::{HotelId, RoomId, UserId};
    use anyhow::anyhow;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use uuid::Uuid;

    /// In-memory gateway standing in for the database-backed collaborators.
    #[derive(Default)]
    struct FakeGateway {
        users: HashMap<String, ResolvedGuest>,
        hotels: HashMap<HotelId, ResolvedHotel>,
        rooms: HashMap<RoomId, ResolvedRoom>,
        bookings: Vec<(NaiveDate, NaiveDate, CommittedBooking)>,
        saved: Vec<NewBooking>,
        fail_save: bool,
    }

    #[async_trait::async_trait]
    impl UserDirectory for FakeGateway {
        async fn user_by_email(&mut self, email: &str) -> anyhow::Result<Option<ResolvedGuest>> {
            Ok(self.users.get(email).cloned())
        }
    }

    #[async_trait::async_trait]
    impl HotelCatalog for FakeGateway {
        async fn hotel_by_id(&mut self, id: HotelId) -> anyhow::Result<Option<ResolvedHotel>> {
            Ok(self.hotels.get(&id).cloned())
        }
    }

    #[async_trait::async_trait]
    impl RoomCatalog for FakeGateway {
        async fn rooms_by_ids(&mut self, ids: &[RoomId]) -> anyhow::Result<Vec<ResolvedRoom>> {
            Ok(ids.iter().filter_map(|id| self.rooms.get(id).cloned()).collect())
        }
    }

    #[async_trait::async_trait]
    impl BookingStore for FakeGateway {
        async fn find_overlapping_bookings(
            &mut self,
            _hotel_id: HotelId,
            check_in: NaiveDate,
            check_out: NaiveDate,
        ) -> anyhow::Result<Vec<CommittedBooking>> {
            Ok(self
                .bookings
                .iter()
                .filter(|(existing_in, existing_out, _)| intervals_overlap(*existing_in, *existing_out, check_in, check_out))
                .map(|(_, _, booking)| booking.clone())
                .collect())
        }

        async fn save_booking_with_invoice(&mut self, booking: &NewBooking) -> anyhow::Result<AdmittedBooking> {
            if self.fail_save {
                return Err(anyhow!("connection reset by peer"));
            }
            self.saved.push(booking.clone());
            Ok(AdmittedBooking {
                booking_id: Uuid::new_v4(),
                invoice_id: Uuid::new_v4(),
            })
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const GUEST_EMAIL: &str = "guest@example.com";

    /// A gateway with one guest, one hotel and one room type of `quantity`
    /// units, plus the matching ids.
    fn gateway_with_room(quantity: i32) -> (FakeGateway, HotelId, RoomId) {
        let hotel_id = Uuid::new_v4();
        let room_id = Uuid::new_v4();

        let mut gateway = FakeGateway::default();
        gateway.users.insert(
            GUEST_EMAIL.to_string(),
            ResolvedGuest {
                id: UserId::new_v4(),
                email: GUEST_EMAIL.to_string(),
            },
        );
        gateway.hotels.insert(
            hotel_id,
            ResolvedHotel {
                id: hotel_id,
                name: "Harbour View".to_string(),
            },
        );
        gateway.rooms.insert(
            room_id,
            ResolvedRoom {
                id: room_id,
                hotel_id,
                name: "Double".to_string(),
                quantity,
            },
        );

        (gateway, hotel_id, room_id)
    }

    fn request(hotel_id: HotelId, room_ids: Vec<RoomId>, check_in: NaiveDate, check_out: NaiveDate) -> AdmissionRequest {
        AdmissionRequest {
            hotel_id,
            room_ids,
            check_in_date: check_in,
            check_out_date: check_out,
            number_of_guests: 2,
            status: "PENDING".to_string(),
        }
    }

    fn committed(room_ids: Vec<RoomId>, check_in: NaiveDate, check_out: NaiveDate) -> (NaiveDate, NaiveDate, CommittedBooking) {
        (
            check_in,
            check_out,
            CommittedBooking {
                id: Uuid::new_v4(),
                room_ids,
            },
        )
    }

    #[test_log::test(tokio::test)]
    async fn unknown_requester_is_rejected_first() {
        let (gateway, hotel_id, room_id) = gateway_with_room(5);
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                "nobody@example.com",
                &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 12)),
            )
            .await;

        assert!(matches!(result, Err(AdmissionError::UserNotFound)));
    }

    #[test_log::test(tokio::test)]
    async fn unknown_hotel_is_rejected() {
        let (gateway, _, room_id) = gateway_with_room(5);
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(Uuid::new_v4(), vec![room_id], date(2025, 4, 10), date(2025, 4, 12)),
            )
            .await;

        assert!(matches!(result, Err(AdmissionError::HotelNotFound)));
    }

    #[test_log::test(tokio::test)]
    async fn missing_room_is_rejected_naming_the_first_missing_id() {
        let (gateway, hotel_id, room_id) = gateway_with_room(5);
        let missing_a = Uuid::new_v4();
        let missing_b = Uuid::new_v4();
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(
                    hotel_id,
                    vec![room_id, missing_a, missing_b],
                    date(2025, 4, 10),
                    date(2025, 4, 12),
                ),
            )
            .await;

        match result {
            Err(AdmissionError::RoomNotFound(id)) => assert_eq!(id, missing_a),
            other => panic!("expected RoomNotFound, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn inverted_dates_are_rejected() {
        let (gateway, hotel_id, room_id) = gateway_with_room(5);
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 9)))
            .await;

        assert!(matches!(result, Err(AdmissionError::InvalidDateRange)));
    }

    #[test_log::test(tokio::test)]
    async fn zero_night_stay_is_rejected() {
        let (gateway, hotel_id, room_id) = gateway_with_room(5);
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 10)))
            .await;

        assert!(matches!(result, Err(AdmissionError::InvalidDateRange)));
    }

    #[test_log::test(tokio::test)]
    async fn date_validation_precedes_the_capacity_check() {
        // Quantity 6 with a single unit committed would pass the capacity
        // check; the inverted dates must reject before it runs.
        let (mut gateway, hotel_id, room_id) = gateway_with_room(6);
        gateway
            .bookings
            .push(committed(vec![room_id], date(2025, 4, 1), date(2025, 4, 30)));
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 9)))
            .await;

        assert!(matches!(result, Err(AdmissionError::InvalidDateRange)));
    }

    #[test_log::test(tokio::test)]
    async fn fully_committed_room_type_is_rejected() {
        // One unit, already held for an overlapping stay.
        let (mut gateway, hotel_id, room_id) = gateway_with_room(1);
        gateway
            .bookings
            .push(committed(vec![room_id], date(2025, 4, 8), date(2025, 4, 14)));
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 12)))
            .await;

        match result {
            Err(AdmissionError::InsufficientRooms(shortages)) => {
                assert_eq!(shortages.len(), 1);
                assert_eq!(shortages[0].room_id, room_id);
                assert_eq!(shortages[0].committed, 1);
                assert_eq!(shortages[0].requested, 1);
            }
            other => panic!("expected InsufficientRooms, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn free_room_type_is_admitted_and_persisted() {
        let (gateway, hotel_id, room_id) = gateway_with_room(2);
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 5), date(2025, 4, 9)))
            .await;

        assert!(result.is_ok());
        let saved = &engine.gateway.saved;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].room_ids, vec![room_id]);
        assert_eq!(saved[0].hotel_id, hotel_id);
        assert_eq!(saved[0].status, "PENDING");
    }

    #[test_log::test(tokio::test)]
    async fn duplicate_ids_reserve_multiple_units() {
        // Two units of a five-unit type with nothing committed.
        let (gateway, hotel_id, room_id) = gateway_with_room(5);
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_id, room_id], date(2025, 4, 5), date(2025, 4, 9)),
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(engine.gateway.saved[0].room_ids, vec![room_id, room_id]);
    }

    #[test_log::test(tokio::test)]
    async fn duplicate_ids_count_against_remaining_units() {
        // Five units all committed; two more requested must be refused.
        let (mut gateway, hotel_id, room_id) = gateway_with_room(5);
        gateway
            .bookings
            .push(committed(vec![room_id; 5], date(2025, 4, 1), date(2025, 4, 30)));
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_id, room_id], date(2025, 4, 5), date(2025, 4, 9)),
            )
            .await;

        assert!(matches!(result, Err(AdmissionError::InsufficientRooms(_))));
    }

    #[test_log::test(tokio::test)]
    async fn committed_units_accumulate_across_overlapping_bookings() {
        // Three units held by two separate overlapping bookings of a
        // four-unit type; requesting two more must fail, one more succeeds.
        let (mut gateway, hotel_id, room_id) = gateway_with_room(4);
        gateway
            .bookings
            .push(committed(vec![room_id, room_id], date(2025, 4, 1), date(2025, 4, 20)));
        gateway
            .bookings
            .push(committed(vec![room_id], date(2025, 4, 9), date(2025, 4, 11)));
        let mut engine = AdmissionEngine::new(gateway);

        let refused = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_id, room_id], date(2025, 4, 10), date(2025, 4, 12)),
            )
            .await;
        assert!(matches!(refused, Err(AdmissionError::InsufficientRooms(_))));

        let admitted = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 12)),
            )
            .await;
        assert!(admitted.is_ok());
    }

    #[test_log::test(tokio::test)]
    async fn back_to_back_stays_do_not_collide() {
        // The existing stay checks out the day the new one checks in.
        let (mut gateway, hotel_id, room_id) = gateway_with_room(1);
        gateway
            .bookings
            .push(committed(vec![room_id], date(2025, 4, 10), date(2025, 4, 15)));
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_id], date(2025, 4, 15), date(2025, 4, 20)),
            )
            .await;

        assert!(result.is_ok());
    }

    #[test_log::test(tokio::test)]
    async fn single_day_intersection_collides() {
        let (mut gateway, hotel_id, room_id) = gateway_with_room(1);
        gateway
            .bookings
            .push(committed(vec![room_id], date(2025, 4, 10), date(2025, 4, 15)));
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_id], date(2025, 4, 14), date(2025, 4, 20)),
            )
            .await;

        assert!(matches!(result, Err(AdmissionError::InsufficientRooms(_))));
    }

    #[test_log::test(tokio::test)]
    async fn every_failing_room_type_is_reported() {
        let (mut gateway, hotel_id, room_a) = gateway_with_room(1);
        let room_b = Uuid::new_v4();
        gateway.rooms.insert(
            room_b,
            ResolvedRoom {
                id: room_b,
                hotel_id,
                name: "Suite".to_string(),
                quantity: 1,
            },
        );
        gateway
            .bookings
            .push(committed(vec![room_a, room_b], date(2025, 4, 1), date(2025, 4, 30)));
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(
                GUEST_EMAIL,
                &request(hotel_id, vec![room_a, room_b], date(2025, 4, 10), date(2025, 4, 12)),
            )
            .await;

        match result {
            Err(AdmissionError::InsufficientRooms(shortages)) => {
                let ids: Vec<_> = shortages.iter().map(|s| s.room_id).collect();
                assert!(ids.contains(&room_a));
                assert!(ids.contains(&room_b));
            }
            other => panic!("expected InsufficientRooms, got {other:?}"),
        }
    }

    #[test_log::test(tokio::test)]
    async fn rejections_leave_nothing_persisted() {
        let (mut gateway, hotel_id, room_id) = gateway_with_room(1);
        gateway
            .bookings
            .push(committed(vec![room_id], date(2025, 4, 8), date(2025, 4, 14)));
        let mut engine = AdmissionEngine::new(gateway);

        let _ = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 10), date(2025, 4, 12)))
            .await;

        assert!(engine.gateway.saved.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn persistence_failure_surfaces_as_infrastructure() {
        let (mut gateway, hotel_id, room_id) = gateway_with_room(5);
        gateway.fail_save = true;
        let mut engine = AdmissionEngine::new(gateway);

        let result = engine
            .admit(GUEST_EMAIL, &request(hotel_id, vec![room_id], date(2025, 4, 5), date(2025, 4, 9)))
            .await;

        assert!(matches!(result, Err(AdmissionError::Infrastructure(_))));
    }

    #[test]
    fn overlap_predicate_is_half_open() {
        // Back-to-back intervals share a boundary date but no night.
        assert!(!intervals_overlap(
            date(2025, 4, 10),
            date(2025, 4, 15),
            date(2025, 4, 15),
            date(2025, 4, 20)
        ));
        assert!(intervals_overlap(
            date(2025, 4, 10),
            date(2025, 4, 15),
            date(2025, 4, 14),
            date(2025, 4, 20)
        ));
        // Containment and identity
        assert!(intervals_overlap(
            date(2025, 4, 10),
            date(2025, 4, 20),
            date(2025, 4, 12),
            date(2025, 4, 13)
        ));
        assert!(intervals_overlap(
            date(2025, 4, 10),
            date(2025, 4, 15),
            date(2025, 4, 10),
            date(2025, 4, 15)
        ));
    }

    #[test]
    fn rejection_messages_match_the_caller_contract() {
        assert_eq!(AdmissionError::UserNotFound.to_string(), "User not found.");
        assert_eq!(AdmissionError::HotelNotFound.to_string(), "Hotel not found.");

        let id = Uuid::new_v4();
        assert_eq!(AdmissionError::RoomNotFound(id).to_string(), format!("Room with ID {id} not found."));

        assert_eq!(
            AdmissionError::InvalidDateRange.to_string(),
            "Check-out date must be after check-in date."
        );

        let shortage = RoomShortage {
            room_id: id,
            requested: 2,
            committed: 5,
            quantity: 5,
        };
        let message = AdmissionError::InsufficientRooms(vec![shortage]).to_string();
        assert!(message.contains("Not enough rooms available"));
        assert!(message.contains(&id.to_string()));
    }

    #[test]
    fn rejections_map_to_the_documented_status_codes() {
        use crate::errors::Error;
        use axum::http::StatusCode;

        let not_found: Error = AdmissionError::UserNotFound.into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.user_message(), "User not found.");

        let bad_request: Error = AdmissionError::InvalidDateRange.into();
        assert_eq!(bad_request.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad_request.user_message(), "Check-out date must be after check-in date.");

        let infra: Error = AdmissionError::Infrastructure(anyhow!("boom")).into();
        assert_eq!(infra.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
