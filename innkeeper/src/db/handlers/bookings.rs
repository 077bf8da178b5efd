//! Database repository for bookings and invoices.

use crate::db::{
    errors::Result,
    models::bookings::{BookingCreateDBRequest, BookingDBResponse, InvoiceDBResponse},
};
use crate::types::{abbrev_uuid, BookingId, HotelId, UserId};
use chrono::NaiveDate;
use sqlx::{Connection, PgConnection};
use tracing::instrument;
use uuid::Uuid;

/// Filter for listing bookings
#[derive(Debug, Clone)]
pub struct BookingFilter {
    pub user_id: Option<UserId>,
    pub hotel_id: Option<HotelId>,
    pub skip: i64,
    pub limit: i64,
}

impl BookingFilter {
    pub fn for_user(user_id: UserId, skip: i64, limit: i64) -> Self {
        Self {
            user_id: Some(user_id),
            hotel_id: None,
            skip,
            limit,
        }
    }

    pub fn all(skip: i64, limit: i64) -> Self {
        Self {
            user_id: None,
            hotel_id: None,
            skip,
            limit,
        }
    }
}

const BOOKING_SELECT: &str = r#"
    SELECT b.id, b.user_id, b.hotel_id, b.check_in_date, b.check_out_date,
           b.number_of_guests, b.status, b.created_at,
           COALESCE(ARRAY_AGG(br.room_id ORDER BY br.id) FILTER (WHERE br.room_id IS NOT NULL), ARRAY[]::uuid[]) AS room_ids,
           i.id AS invoice_id
    FROM bookings b
    LEFT JOIN booking_rooms br ON br.booking_id = b.id
    LEFT JOIN invoices i ON i.booking_id = b.id
"#;

/// Repository for bookings.
///
/// Bookings are append-only: they are created through admission and read back,
/// never updated. Modification and cancellation are out of scope.
pub struct Bookings<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Bookings<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a booking, its per-unit room references and its invoice as one
    /// atomic unit. Either all three land or none do.
    #[instrument(skip(self, request), fields(hotel_id = %abbrev_uuid(&request.hotel_id), units = request.room_ids.len()), err)]
    pub async fn create_with_invoice(&mut self, request: &BookingCreateDBRequest) -> Result<BookingDBResponse> {
        let booking_id = Uuid::new_v4();
        let invoice_id = Uuid::new_v4();

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (id, user_id, hotel_id, check_in_date, check_out_date, number_of_guests, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(request.user_id)
        .bind(request.hotel_id)
        .bind(request.check_in_date)
        .bind(request.check_out_date)
        .bind(request.number_of_guests)
        .bind(&request.status)
        .fetch_one(&mut *tx)
        .await?;

        // One row per reserved unit, preserving request order and duplicates
        for room_id in &request.room_ids {
            sqlx::query("INSERT INTO booking_rooms (booking_id, room_id) VALUES ($1, $2)")
                .bind(booking_id)
                .bind(room_id)
                .execute(&mut *tx)
                .await?;
        }

        let invoice = sqlx::query_as::<_, InvoiceDBResponse>("INSERT INTO invoices (id, booking_id) VALUES ($1, $2) RETURNING *")
            .bind(invoice_id)
            .bind(booking_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(BookingDBResponse {
            id: row.id,
            user_id: row.user_id,
            hotel_id: row.hotel_id,
            check_in_date: row.check_in_date,
            check_out_date: row.check_out_date,
            number_of_guests: row.number_of_guests,
            status: row.status,
            created_at: row.created_at,
            room_ids: request.room_ids.clone(),
            invoice_id: Some(invoice.id),
        })
    }

    #[instrument(skip(self), fields(booking_id = %abbrev_uuid(&id)), err)]
    pub async fn get_by_id(&mut self, id: BookingId) -> Result<Option<BookingDBResponse>> {
        let booking = sqlx::query_as::<_, BookingDBResponse>(&format!("{BOOKING_SELECT} WHERE b.id = $1 GROUP BY b.id, i.id"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(booking)
    }

    #[instrument(skip(self, filter), fields(limit = filter.limit, skip = filter.skip), err)]
    pub async fn list(&mut self, filter: &BookingFilter) -> Result<Vec<BookingDBResponse>> {
        let bookings = sqlx::query_as::<_, BookingDBResponse>(&format!(
            r#"
            {BOOKING_SELECT}
            WHERE ($1::uuid IS NULL OR b.user_id = $1)
              AND ($2::uuid IS NULL OR b.hotel_id = $2)
            GROUP BY b.id, i.id
            ORDER BY b.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.user_id)
        .bind(filter.hotel_id)
        .bind(filter.limit)
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bookings)
    }

    /// Fetch every booking for `hotel_id` whose half-open stay interval
    /// intersects `[check_in, check_out)`.
    ///
    /// Back-to-back stays do not intersect: a checkout on the same day as
    /// another booking's check-in leaves both admissible.
    #[instrument(skip(self), fields(hotel_id = %abbrev_uuid(&hotel_id), %check_in, %check_out), err)]
    pub async fn find_overlapping(&mut self, hotel_id: HotelId, check_in: NaiveDate, check_out: NaiveDate) -> Result<Vec<BookingDBResponse>> {
        let bookings = sqlx::query_as::<_, BookingDBResponse>(&format!(
            r#"
            {BOOKING_SELECT}
            WHERE b.hotel_id = $1
              AND b.check_in_date < $3
              AND b.check_out_date > $2
            GROUP BY b.id, i.id
            "#
        ))
        .bind(hotel_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(bookings)
    }
}

// Bare bookings row, before the room references and invoice are attached.
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: BookingId,
    user_id: UserId,
    hotel_id: HotelId,
    check_in_date: NaiveDate,
    check_out_date: NaiveDate,
    number_of_guests: i32,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}
