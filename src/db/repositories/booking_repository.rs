use time::OffsetDateTime;
use uuid::Uuid;

use crate::db::models::{BookingStatus, RoomBooking};
use crate::db::store::Collections;

pub struct BookingRepository;

impl BookingRepository {
    pub fn insert(col: &mut Collections, booking: RoomBooking) {
        col.bookings.insert(booking.id, booking);
    }

    pub fn get(col: &Collections, booking_id: Uuid) -> Option<&RoomBooking> {
        col.bookings.get(&booking_id)
    }

    pub fn get_mut(col: &mut Collections, booking_id: Uuid) -> Option<&mut RoomBooking> {
        col.bookings.get_mut(&booking_id)
    }

    /// CONFIRMED bookings on one room, minus an optional excluded booking.
    /// Pending bookings never appear here; they do not hold the room.
    pub fn confirmed_for_room(
        col: &Collections,
        room_id: Uuid,
        exclude_booking_id: Option<Uuid>,
    ) -> impl Iterator<Item = &RoomBooking> {
        col.bookings.values().filter(move |b| {
            b.room_id == room_id
                && b.status == BookingStatus::Confirmed
                && Some(b.id) != exclude_booking_id
        })
    }

    pub fn confirmed(col: &Collections) -> impl Iterator<Item = &RoomBooking> {
        col.bookings
            .values()
            .filter(|b| b.status == BookingStatus::Confirmed)
    }

    pub fn by_event(col: &Collections, event_id: Uuid) -> Vec<&RoomBooking> {
        let mut bookings: Vec<&RoomBooking> = col
            .bookings
            .values()
            .filter(|b| b.event_id == event_id)
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    pub fn by_requester(col: &Collections, user_id: Uuid) -> Vec<&RoomBooking> {
        let mut bookings: Vec<&RoomBooking> = col
            .bookings
            .values()
            .filter(|b| b.booked_by == user_id)
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    pub fn by_status(col: &Collections, status: BookingStatus) -> Vec<&RoomBooking> {
        let mut bookings: Vec<&RoomBooking> = col
            .bookings
            .values()
            .filter(|b| b.status == status)
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }

    /// Room-deletion guard: a CONFIRMED booking that has not ended yet
    /// keeps its room alive.
    pub fn has_active_confirmed(col: &Collections, room_id: Uuid, now: OffsetDateTime) -> bool {
        col.bookings.values().any(|b| {
            b.room_id == room_id
                && b.status == BookingStatus::Confirmed
                && b.end_date_time >= now
        })
    }
}
