use std::collections::HashSet;

use time::OffsetDateTime;
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthUser;
use crate::db::{
    Collections, Event, EventRepository, EventStatus, EventSummary, NewEvent, Store, UpdateEvent,
    User, UserRepository, UserRole, WinnerAssignment,
};
use crate::error::{AppError, AppResult};
use crate::rewards::{self, XpTier};
use crate::scheduling::{find_event_clashes, overlaps};

/// What can happen to an event. Status never changes except through
/// `EventStatus::transition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Submit,
    Approve,
    Reject,
    Conclude,
}

impl EventStatus {
    pub fn transition(self, action: EventAction) -> Result<EventStatus, AppError> {
        match (self, action) {
            (EventStatus::Draft, EventAction::Submit) => Ok(EventStatus::PendingApproval),
            (_, EventAction::Submit) => Err(AppError::Conflict(
                "Only draft events can be submitted for approval.".to_string(),
            )),

            (EventStatus::PendingApproval, EventAction::Approve) => Ok(EventStatus::Approved),
            (EventStatus::PendingApproval, EventAction::Reject) => Ok(EventStatus::Rejected),
            (_, EventAction::Approve | EventAction::Reject) => Err(AppError::AlreadyProcessed(
                "Event is not pending approval.".to_string(),
            )),

            (EventStatus::Approved, EventAction::Conclude) => Ok(EventStatus::Completed),
            (EventStatus::Completed, EventAction::Conclude) => Err(AppError::AlreadyProcessed(
                "Event is already concluded.".to_string(),
            )),
            (_, EventAction::Conclude) => Err(AppError::Conflict(
                "Only approved events can be concluded.".to_string(),
            )),
        }
    }
}

/// An event write plus the advisory clash warning that rode along with it.
#[derive(Debug)]
pub struct EventWriteOutcome {
    pub event: Event,
    pub clashes: Vec<EventSummary>,
}

#[derive(Debug)]
pub struct RegistrationOutcome {
    pub event: Event,
    pub student: User,
}

fn validate_interval(start: OffsetDateTime, end: OffsetDateTime) -> AppResult<()> {
    if end > start {
        Ok(())
    } else {
        Err(AppError::Validation(
            "End date must be after start date.".to_string(),
        ))
    }
}

fn owned_event<'a>(
    col: &'a mut Collections,
    event_id: Uuid,
    actor: &AuthUser,
    denial: &str,
) -> AppResult<&'a mut Event> {
    let event = EventRepository::get_mut(col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;
    if event.created_by != actor.id {
        return Err(AppError::Authorization(denial.to_string()));
    }
    Ok(event)
}

pub fn create_event(
    store: &Store,
    actor: &AuthUser,
    payload: NewEvent,
    now: OffsetDateTime,
) -> AppResult<EventWriteOutcome> {
    actor.require_role(UserRole::SocietyAdmin)?;
    payload.validate()?;
    validate_interval(payload.start_date_time, payload.end_date_time)?;

    let status = if payload.proposal_url.is_some() {
        EventStatus::PendingApproval
    } else if payload.submit_for_approval {
        return Err(AppError::Validation(
            "A proposal document is required to submit for approval.".to_string(),
        ));
    } else {
        EventStatus::Draft
    };

    let mut col = store.write();

    let society_name = UserRepository::get(&col, actor.id)
        .and_then(|u| u.society_name.clone())
        .unwrap_or_default();

    let clashes = find_event_clashes(&col, payload.start_date_time, payload.end_date_time, None);

    let event = Event {
        id: Uuid::new_v4(),
        title: payload.title,
        society_id: actor.id,
        society_name,
        category: payload.category,
        description: payload.description,
        start_date_time: payload.start_date_time,
        end_date_time: payload.end_date_time,
        status,
        approval_remarks: None,
        proposal_url: payload.proposal_url,
        max_participants: payload.max_participants,
        registered_participants: Vec::new(),
        prizes: payload.prizes,
        winners: Vec::new(),
        room_id: None,
        room_name: None,
        created_by: actor.id,
        created_at: now,
        updated_at: now,
    };
    EventRepository::insert(&mut col, event.clone());

    Ok(EventWriteOutcome { event, clashes })
}

pub fn update_event(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    payload: UpdateEvent,
    now: OffsetDateTime,
) -> AppResult<EventWriteOutcome> {
    actor.require_role(UserRole::SocietyAdmin)?;
    payload.validate()?;

    let mut col = store.write();
    let event = owned_event(
        &mut col,
        event_id,
        actor,
        "You do not have permission to edit this event.",
    )?;

    if event.status == EventStatus::Completed {
        return Err(AppError::Conflict(
            "Cannot edit a completed event.".to_string(),
        ));
    }

    // Every guard runs before the first field is touched, so a rejected
    // update leaves the event exactly as it was.
    let interval_changed =
        payload.start_date_time.is_some() || payload.end_date_time.is_some();
    let start = payload.start_date_time.unwrap_or(event.start_date_time);
    let end = payload.end_date_time.unwrap_or(event.end_date_time);
    if interval_changed {
        validate_interval(start, end)?;
    }

    let next_status = if payload.submit_for_approval {
        let has_proposal = event.proposal_url.is_some() || payload.proposal_url.is_some();
        if !has_proposal {
            return Err(AppError::Validation(
                "A proposal document is required to submit for approval.".to_string(),
            ));
        }
        Some(event.status.transition(EventAction::Submit)?)
    } else {
        None
    };

    if let Some(title) = payload.title {
        event.title = title;
    }
    if let Some(category) = payload.category {
        event.category = category;
    }
    if let Some(description) = payload.description {
        event.description = description;
    }
    if let Some(max_participants) = payload.max_participants {
        event.max_participants = max_participants;
    }
    if let Some(prizes) = payload.prizes {
        event.prizes = prizes;
    }
    if let Some(proposal_url) = payload.proposal_url {
        event.proposal_url = Some(proposal_url);
    }
    event.start_date_time = start;
    event.end_date_time = end;
    if let Some(status) = next_status {
        event.status = status;
    }
    event.updated_at = now;
    let event = event.clone();

    let clashes = if interval_changed {
        find_event_clashes(&col, event.start_date_time, event.end_date_time, Some(event.id))
    } else {
        Vec::new()
    };

    Ok(EventWriteOutcome { event, clashes })
}

pub fn delete_event(store: &Store, actor: &AuthUser, event_id: Uuid) -> AppResult<()> {
    actor.require_role(UserRole::SocietyAdmin)?;

    let mut col = store.write();
    let event = owned_event(
        &mut col,
        event_id,
        actor,
        "You do not have permission to delete this event.",
    )?;

    if matches!(event.status, EventStatus::Approved | EventStatus::Completed) {
        return Err(AppError::Conflict(
            "Cannot delete an approved or completed event.".to_string(),
        ));
    }

    EventRepository::remove(&mut col, event_id);
    Ok(())
}

pub fn approve_event(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    remarks: Option<String>,
    now: OffsetDateTime,
) -> AppResult<Event> {
    actor.require_role(UserRole::SuperAdmin)?;

    let mut col = store.write();
    let event = EventRepository::get_mut(&mut col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;

    event.status = event.status.transition(EventAction::Approve)?;
    if let Some(remarks) = remarks {
        event.approval_remarks = Some(remarks);
    }
    event.updated_at = now;

    Ok(event.clone())
}

pub fn reject_event(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    remarks: String,
    now: OffsetDateTime,
) -> AppResult<Event> {
    actor.require_role(UserRole::SuperAdmin)?;
    if remarks.trim().is_empty() {
        return Err(AppError::Validation(
            "Rejection remarks are required.".to_string(),
        ));
    }

    let mut col = store.write();
    let event = EventRepository::get_mut(&mut col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;

    event.status = event.status.transition(EventAction::Reject)?;
    event.approval_remarks = Some(remarks);
    event.updated_at = now;

    Ok(event.clone())
}

/// Registration is open only while the event is APPROVED and not yet over,
/// the student is not already registered, and seats remain. The capacity
/// check and the insert happen under one exclusive guard.
pub fn register(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<RegistrationOutcome> {
    actor.require_role(UserRole::Student)?;

    let mut col = store.write();
    let event = EventRepository::get_mut(&mut col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;

    if event.status != EventStatus::Approved {
        return Err(AppError::Conflict(format!(
            "Event is not open for registration. Current status: {}",
            event.status
        )));
    }
    if now > event.end_date_time {
        return Err(AppError::Conflict("Event has already ended.".to_string()));
    }
    if event.is_registered(actor.id) {
        return Err(AppError::Conflict(
            "You are already registered for this event.".to_string(),
        ));
    }
    if event.is_full() {
        return Err(AppError::Conflict("Event is full.".to_string()));
    }

    event.registered_participants.push(actor.id);
    event.updated_at = now;
    let event = event.clone();

    // Registration bonus, separate from conclude-time participation XP
    rewards::award_xp(&mut col, &[actor.id], XpTier::Participant.points(), now);

    let student = UserRepository::get(&col, actor.id)
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?
        .clone();

    Ok(RegistrationOutcome { event, student })
}

pub fn cancel_registration(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<Event> {
    actor.require_role(UserRole::Student)?;

    let mut col = store.write();
    let event = EventRepository::get_mut(&mut col, event_id)
        .ok_or_else(|| AppError::NotFound("Event not found.".to_string()))?;

    if !event.is_registered(actor.id) {
        return Err(AppError::Conflict(
            "You are not registered for this event.".to_string(),
        ));
    }
    if now >= event.start_date_time {
        return Err(AppError::Conflict(
            "Cannot cancel registration after event has started.".to_string(),
        ));
    }

    event.registered_participants.retain(|id| *id != actor.id);
    event.updated_at = now;

    Ok(event.clone())
}

fn validate_winners(event: &Event, winners: &[WinnerAssignment]) -> AppResult<()> {
    let mut positions = HashSet::new();
    for winner in winners {
        if !positions.insert(winner.position.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate prize position: {}",
                winner.position
            )));
        }
        if !event.is_registered(winner.user_id) {
            return Err(AppError::Validation(format!(
                "User {} is not a participant of this event.",
                winner.user_id
            )));
        }
    }
    Ok(())
}

/// Concludes an APPROVED event: validates and stores the winner list,
/// awards tiered XP to winners and base XP to every other registered
/// participant, then marks the event COMPLETED. Winners receive only
/// their tier award, never an additional participation bonus.
pub fn conclude_event(
    store: &Store,
    actor: &AuthUser,
    event_id: Uuid,
    winners: Vec<WinnerAssignment>,
    now: OffsetDateTime,
) -> AppResult<Event> {
    actor.require_role(UserRole::SocietyAdmin)?;

    let mut col = store.write();
    let event = owned_event(
        &mut col,
        event_id,
        actor,
        "You do not have permission to conclude this event.",
    )?;

    let next = event.status.transition(EventAction::Conclude)?;
    validate_winners(event, &winners)?;

    event.winners = winners;
    event.status = next;
    event.updated_at = now;

    let awards: Vec<(Uuid, u32)> = event
        .winners
        .iter()
        .map(|w| (w.user_id, XpTier::from_position(&w.position).points()))
        .collect();
    let winner_ids: HashSet<Uuid> = event.winner_ids().collect();
    let non_winners: Vec<Uuid> = event
        .registered_participants
        .iter()
        .copied()
        .filter(|id| !winner_ids.contains(id))
        .collect();
    let event = event.clone();

    // Each award stands alone; see rewards::award_xp for the partial
    // failure policy.
    for (user_id, points) in awards {
        rewards::award_xp(&mut col, &[user_id], points, now);
    }
    rewards::award_xp(&mut col, &non_winners, XpTier::Participant.points(), now);

    Ok(event)
}

/// Upcoming APPROVED events the student has not joined, narrowed to their
/// favorite categories when set, minus anything that would clash with an
/// event they are already registered for.
pub fn highlights_for_student(
    col: &Collections,
    student: &User,
    now: OffsetDateTime,
    limit: usize,
) -> Vec<Event> {
    let registered: Vec<(OffsetDateTime, OffsetDateTime)> =
        EventRepository::by_participant(col, student.id)
            .into_iter()
            .map(|e| (e.start_date_time, e.end_date_time))
            .collect();

    let mut candidates: Vec<&Event> = col
        .events
        .values()
        .filter(|e| e.status == EventStatus::Approved)
        .filter(|e| e.start_date_time >= now)
        .filter(|e| !e.is_registered(student.id))
        .filter(|e| {
            student.favorite_categories.is_empty()
                || student.favorite_categories.contains(&e.category)
        })
        .filter(|e| {
            !registered
                .iter()
                .any(|(start, end)| overlaps(e.start_date_time, e.end_date_time, *start, *end))
        })
        .collect();
    candidates.sort_by_key(|e| (e.start_date_time, e.id));
    candidates.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::EventAction;
    use crate::db::EventStatus;
    use crate::error::AppError;

    const ALL: [EventStatus; 5] = [
        EventStatus::Draft,
        EventStatus::PendingApproval,
        EventStatus::Approved,
        EventStatus::Rejected,
        EventStatus::Completed,
    ];

    #[test]
    fn submit_is_legal_only_from_draft() {
        for status in ALL {
            let result = status.transition(EventAction::Submit);
            if status == EventStatus::Draft {
                assert_eq!(result.unwrap(), EventStatus::PendingApproval);
            } else {
                assert!(matches!(result, Err(AppError::Conflict(_))));
            }
        }
    }

    #[test]
    fn approve_and_reject_are_legal_only_from_pending() {
        for status in ALL {
            let approve = status.transition(EventAction::Approve);
            let reject = status.transition(EventAction::Reject);
            if status == EventStatus::PendingApproval {
                assert_eq!(approve.unwrap(), EventStatus::Approved);
                assert_eq!(reject.unwrap(), EventStatus::Rejected);
            } else {
                assert!(matches!(approve, Err(AppError::AlreadyProcessed(_))));
                assert!(matches!(reject, Err(AppError::AlreadyProcessed(_))));
            }
        }
    }

    #[test]
    fn conclude_is_legal_only_from_approved() {
        for status in ALL {
            let result = status.transition(EventAction::Conclude);
            match status {
                EventStatus::Approved => assert_eq!(result.unwrap(), EventStatus::Completed),
                EventStatus::Completed => {
                    assert!(matches!(result, Err(AppError::AlreadyProcessed(_))))
                }
                _ => assert!(matches!(result, Err(AppError::Conflict(_)))),
            }
        }
    }
}
