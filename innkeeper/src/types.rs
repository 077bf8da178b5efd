//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases for better type safety:
//!
//! - [`UserId`]: guest account identifier
//! - [`HotelId`]: hotel identifier
//! - [`RoomId`]: room-type identifier (a room row describes a *class* of
//!   interchangeable rooms, not a single physical room)
//! - [`BookingId`]: booking identifier
//! - [`InvoiceId`]: invoice identifier

use uuid::Uuid;

// Type aliases for IDs
pub type UserId = Uuid;
pub type HotelId = Uuid;
pub type RoomId = Uuid;
pub type BookingId = Uuid;
pub type InvoiceId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}
