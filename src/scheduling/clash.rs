use std::collections::HashSet;

use time::OffsetDateTime;
use uuid::Uuid;

use super::overlap::overlaps;
use crate::db::{
    BookingRepository, BookingSummary, Collections, EventRepository, EventSummary, Room,
    RoomRepository,
};

/// Advisory check: events in APPROVED or PENDING_APPROVAL whose interval
/// crosses the candidate window. The result is surfaced as a warning and
/// never blocks a write. Sorted by start time for a stable order.
pub fn find_event_clashes(
    col: &Collections,
    start: OffsetDateTime,
    end: OffsetDateTime,
    exclude_event_id: Option<Uuid>,
) -> Vec<EventSummary> {
    let mut clashes: Vec<EventSummary> = EventRepository::clash_candidates(col, exclude_event_id)
        .filter(|e| overlaps(e.start_date_time, e.end_date_time, start, end))
        .map(EventSummary::from)
        .collect();
    clashes.sort_by_key(|c| (c.start_date_time, c.id));
    clashes
}

/// Blocking check: CONFIRMED bookings on the room that cross the window.
/// A non-empty result must fail the booking attempt; pending bookings do
/// not hold the room.
pub fn find_room_clashes(
    col: &Collections,
    room_id: Uuid,
    start: OffsetDateTime,
    end: OffsetDateTime,
    exclude_booking_id: Option<Uuid>,
) -> Vec<BookingSummary> {
    let mut clashes: Vec<BookingSummary> =
        BookingRepository::confirmed_for_room(col, room_id, exclude_booking_id)
            .filter(|b| overlaps(b.start_date_time, b.end_date_time, start, end))
            .map(|b| {
                let event_title = EventRepository::get(col, b.event_id).map(|e| e.title.clone());
                BookingSummary::new(b, event_title)
            })
            .collect();
    clashes.sort_by_key(|c| (c.start_date_time, c.id));
    clashes
}

/// All rooms minus those with a CONFIRMED booking overlapping the window,
/// sorted by name.
pub fn available_rooms(
    col: &Collections,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> Vec<Room> {
    let booked: HashSet<Uuid> = BookingRepository::confirmed(col)
        .filter(|b| overlaps(b.start_date_time, b.end_date_time, start, end))
        .map(|b| b.room_id)
        .collect();

    let mut rooms: Vec<Room> = RoomRepository::all(col)
        .filter(|r| !booked.contains(&r.id))
        .cloned()
        .collect();
    rooms.sort_by(|a, b| a.name.cmp(&b.name));
    rooms
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use time::macros::datetime;
    use uuid::Uuid;

    use super::{available_rooms, find_event_clashes, find_room_clashes};
    use crate::db::{
        BookingStatus, Collections, Event, EventCategory, EventStatus, Room, RoomBooking,
    };

    const NOW: OffsetDateTime = datetime!(2026-02-01 00:00 UTC);

    fn event(status: EventStatus, start: OffsetDateTime, end: OffsetDateTime) -> Event {
        Event {
            id: Uuid::new_v4(),
            title: "Robotics Workshop".to_string(),
            society_id: Uuid::new_v4(),
            society_name: "Robotics Society".to_string(),
            category: EventCategory::Technical,
            description: "Build a line follower".to_string(),
            start_date_time: start,
            end_date_time: end,
            status,
            approval_remarks: None,
            proposal_url: None,
            max_participants: 50,
            registered_participants: Vec::new(),
            prizes: Vec::new(),
            winners: Vec::new(),
            room_id: None,
            room_name: None,
            created_by: Uuid::new_v4(),
            created_at: NOW,
            updated_at: NOW,
        }
    }

    fn room(name: &str) -> Room {
        Room {
            id: Uuid::new_v4(),
            name: name.to_string(),
            location: "Block A".to_string(),
            capacity: 80,
            resources: Vec::new(),
            created_at: NOW,
            updated_at: NOW,
        }
    }

    fn booking(
        room_id: Uuid,
        status: BookingStatus,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> RoomBooking {
        RoomBooking {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            room_id,
            booked_by: Uuid::new_v4(),
            start_date_time: start,
            end_date_time: end,
            status,
            approved_by: None,
            approved_at: None,
            rejected_by: None,
            rejected_at: None,
            remarks: None,
            created_at: NOW,
            updated_at: NOW,
        }
    }

    #[test]
    fn event_clashes_cover_subset_superset_and_partial_windows() {
        let mut col = Collections::default();
        let e = event(
            EventStatus::Approved,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 12:00 UTC),
        );
        let id = e.id;
        col.events.insert(id, e);

        for (start, end) in [
            (datetime!(2026-03-01 10:30 UTC), datetime!(2026-03-01 11:30 UTC)),
            (datetime!(2026-03-01 09:00 UTC), datetime!(2026-03-01 13:00 UTC)),
            (datetime!(2026-03-01 11:00 UTC), datetime!(2026-03-01 13:00 UTC)),
        ] {
            let clashes = find_event_clashes(&col, start, end, None);
            assert_eq!(clashes.len(), 1, "window {start}..{end} should clash");
            assert_eq!(clashes[0].id, id);
        }

        let outside = find_event_clashes(
            &col,
            datetime!(2026-03-01 12:00 UTC),
            datetime!(2026-03-01 14:00 UTC),
            None,
        );
        assert!(outside.is_empty());
    }

    #[test]
    fn draft_and_completed_events_never_clash() {
        let mut col = Collections::default();
        for status in [
            EventStatus::Draft,
            EventStatus::Rejected,
            EventStatus::Completed,
        ] {
            let e = event(
                status,
                datetime!(2026-03-01 10:00 UTC),
                datetime!(2026-03-01 12:00 UTC),
            );
            col.events.insert(e.id, e);
        }

        let clashes = find_event_clashes(
            &col,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 12:00 UTC),
            None,
        );
        assert!(clashes.is_empty());
    }

    #[test]
    fn excluded_event_is_ignored_on_update() {
        let mut col = Collections::default();
        let e = event(
            EventStatus::PendingApproval,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 12:00 UTC),
        );
        let id = e.id;
        col.events.insert(id, e);

        let clashes = find_event_clashes(
            &col,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 12:00 UTC),
            Some(id),
        );
        assert!(clashes.is_empty());
    }

    #[test]
    fn pending_bookings_do_not_block_a_room() {
        let mut col = Collections::default();
        let r = room("R1");
        let room_id = r.id;
        col.rooms.insert(room_id, r);

        let b = booking(
            room_id,
            BookingStatus::PendingApproval,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 11:00 UTC),
        );
        col.bookings.insert(b.id, b);

        let clashes = find_room_clashes(
            &col,
            room_id,
            datetime!(2026-03-01 10:30 UTC),
            datetime!(2026-03-01 10:45 UTC),
            None,
        );
        assert!(clashes.is_empty());
    }

    #[test]
    fn confirmed_booking_blocks_overlap_but_not_touching_window() {
        let mut col = Collections::default();
        let r = room("R1");
        let room_id = r.id;
        col.rooms.insert(room_id, r);

        let b = booking(
            room_id,
            BookingStatus::Confirmed,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 11:00 UTC),
        );
        col.bookings.insert(b.id, b);

        let inside = find_room_clashes(
            &col,
            room_id,
            datetime!(2026-03-01 10:30 UTC),
            datetime!(2026-03-01 10:45 UTC),
            None,
        );
        assert_eq!(inside.len(), 1);

        let touching = find_room_clashes(
            &col,
            room_id,
            datetime!(2026-03-01 11:00 UTC),
            datetime!(2026-03-01 12:00 UTC),
            None,
        );
        assert!(touching.is_empty());
    }

    #[test]
    fn available_rooms_excludes_only_clashing_confirmed_rooms() {
        let mut col = Collections::default();
        let r1 = room("Auditorium");
        let r2 = room("Seminar Hall");
        let r1_id = r1.id;
        let r2_id = r2.id;
        col.rooms.insert(r1_id, r1);
        col.rooms.insert(r2_id, r2);

        let b = booking(
            r1_id,
            BookingStatus::Confirmed,
            datetime!(2026-03-01 10:00 UTC),
            datetime!(2026-03-01 11:00 UTC),
        );
        col.bookings.insert(b.id, b);

        let rooms = available_rooms(
            &col,
            datetime!(2026-03-01 10:30 UTC),
            datetime!(2026-03-01 11:30 UTC),
        );
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, r2_id);

        let rooms = available_rooms(
            &col,
            datetime!(2026-03-01 11:00 UTC),
            datetime!(2026-03-01 12:00 UTC),
        );
        assert_eq!(rooms.len(), 2);
    }
}
