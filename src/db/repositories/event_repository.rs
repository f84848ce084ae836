use uuid::Uuid;

use crate::db::models::{Event, EventFilter, EventStatus};
use crate::db::store::Collections;

pub struct EventRepository;

impl EventRepository {
    pub fn insert(col: &mut Collections, event: Event) {
        col.events.insert(event.id, event);
    }

    pub fn get(col: &Collections, event_id: Uuid) -> Option<&Event> {
        col.events.get(&event_id)
    }

    pub fn get_mut(col: &mut Collections, event_id: Uuid) -> Option<&mut Event> {
        col.events.get_mut(&event_id)
    }

    pub fn remove(col: &mut Collections, event_id: Uuid) -> Option<Event> {
        col.events.remove(&event_id)
    }

    /// Events that participate in clash detection: APPROVED or
    /// PENDING_APPROVAL, minus an optional excluded event.
    pub fn clash_candidates(
        col: &Collections,
        exclude_event_id: Option<Uuid>,
    ) -> impl Iterator<Item = &Event> {
        col.events.values().filter(move |e| {
            matches!(
                e.status,
                EventStatus::Approved | EventStatus::PendingApproval
            ) && Some(e.id) != exclude_event_id
        })
    }

    pub fn by_creator(col: &Collections, creator_id: Uuid) -> Vec<&Event> {
        let mut events: Vec<&Event> = col
            .events
            .values()
            .filter(|e| e.created_by == creator_id)
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events
    }

    pub fn by_participant(col: &Collections, user_id: Uuid) -> Vec<&Event> {
        let mut events: Vec<&Event> = col
            .events
            .values()
            .filter(|e| e.is_registered(user_id))
            .collect();
        events.sort_by_key(|e| e.start_date_time);
        events
    }

    pub fn by_status(col: &Collections, status: EventStatus) -> Vec<&Event> {
        let mut events: Vec<&Event> = col
            .events
            .values()
            .filter(|e| e.status == status)
            .collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events
    }

    pub fn all(col: &Collections) -> Vec<&Event> {
        let mut events: Vec<&Event> = col.events.values().collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events
    }

    pub fn count_by_status(col: &Collections, status: EventStatus) -> usize {
        col.events.values().filter(|e| e.status == status).count()
    }

    /// Listing query: every filter is optional, results sorted by start
    /// time ascending.
    pub fn search<'a>(col: &'a Collections, filter: &EventFilter) -> Vec<&'a Event> {
        let mut events: Vec<&Event> = col
            .events
            .values()
            .filter(|e| filter.status.is_none_or(|s| e.status == s))
            .filter(|e| filter.category.is_none_or(|c| e.category == c))
            .filter(|e| {
                filter.society_name.as_deref().is_none_or(|name| {
                    e.society_name.to_lowercase().contains(&name.to_lowercase())
                })
            })
            .filter(|e| filter.starts_after.is_none_or(|t| e.start_date_time >= t))
            .filter(|e| filter.starts_before.is_none_or(|t| e.start_date_time <= t))
            .filter(|e| {
                filter.search.as_deref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    e.title.to_lowercase().contains(&needle)
                        || e.description.to_lowercase().contains(&needle)
                })
            })
            .collect();
        events.sort_by_key(|e| (e.start_date_time, e.id));
        events
    }
}
